pub mod manager;
pub mod models;

pub use manager::{Database, DatabaseError, SCHEMA_SQL};
pub use models::{Course, CourseSummary};
