use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub instructor_id: i32,
}

/// Public projection returned by the course listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CourseSummary {
    pub id: i32,
    pub name: String,
    pub description: String,
}
