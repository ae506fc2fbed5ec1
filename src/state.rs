use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::Database;
use crate::services::{AnalyticsService, CourseService};

/// Shared application state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Database,
    pub courses: CourseService,
    pub analytics: AnalyticsService,
}

impl AppState {
    pub fn new(config: AppConfig, db: Database) -> Self {
        Self {
            config: Arc::new(config),
            courses: CourseService::new(db.clone()),
            analytics: AnalyticsService::new(&db),
            db,
        }
    }
}
