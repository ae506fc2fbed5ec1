use tracing::{debug, info};

use crate::api::{CoursePatch, NewCourse};
use crate::database::{Course, CourseSummary, Database, DatabaseError};

/// Course reads and writes. Writes run on the primary inside a
/// transaction; the listing reads from the replica.
#[derive(Debug, Clone)]
pub struct CourseService {
    db: Database,
}

impl CourseService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a course owned by `instructor_id`, returning its id
    pub async fn create(&self, course: &NewCourse, instructor_id: i32) -> Result<i32, DatabaseError> {
        let mut tx = self.db.primary().begin().await?;

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO courses (name, description, instructor_id)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(&course.name)
        .bind(&course.description)
        .bind(instructor_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Created course {} for instructor {}", id, instructor_id);
        Ok(id)
    }

    pub async fn list(&self) -> Result<Vec<CourseSummary>, DatabaseError> {
        let courses = sqlx::query_as::<_, CourseSummary>(
            "SELECT id, name, description FROM courses ORDER BY id",
        )
        .fetch_all(self.db.replica())
        .await?;

        Ok(courses)
    }

    /// Apply the provided fields to an existing course. Ownership is not
    /// checked: any caller that passed the role guard may edit any course.
    pub async fn update(&self, id: i32, patch: &CoursePatch) -> Result<Course, DatabaseError> {
        let mut tx = self.db.primary().begin().await?;

        let existing = sqlx::query_as::<_, Course>(
            "SELECT id, name, description, instructor_id FROM courses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DatabaseError::NotFound("Course not found".to_string()))?;

        if patch.is_empty() {
            debug!("Empty update for course {}", id);
            tx.commit().await?;
            return Ok(existing);
        }

        let updated = sqlx::query_as::<_, Course>(
            "UPDATE courses
             SET name = COALESCE($2, name), description = COALESCE($3, description)
             WHERE id = $1
             RETURNING id, name, description, instructor_id",
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.description.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Updated course {}", id);
        Ok(updated)
    }
}
