use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::database::{Database, DatabaseError};

/// One (assignment, enrolled student) combination of a course.
/// Outer joins leave the assignment or student half null.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct CourseDetailRow {
    pub course_id: i32,
    pub course_name: String,
    pub assignment_id: Option<i32>,
    pub assignment_title: Option<String>,
    pub student_id: Option<i32>,
    pub student_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct AverageGradeRow {
    pub student_id: i32,
    pub student_name: String,
    pub average_grade: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct StudentCountRow {
    pub course_id: i32,
    pub course_name: String,
    pub student_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct StudentRow {
    pub student_id: i32,
    pub student_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct AssignmentCountRow {
    pub course_id: i32,
    pub course_name: String,
    pub assignment_count: i64,
}

const COURSE_DETAILS_SQL: &str = r#"
    SELECT
        c.id    AS course_id,
        c.name  AS course_name,
        a.id    AS assignment_id,
        a.title AS assignment_title,
        u.id    AS student_id,
        u.name  AS student_name
    FROM courses c
    LEFT JOIN assignments a ON a.course_id = c.id
    LEFT JOIN enrollments e ON e.course_id = c.id
    LEFT JOIN users u ON u.id = e.student_id
    WHERE c.id = $1
    ORDER BY a.id, u.id
"#;

const AVERAGE_GRADES_SQL: &str = r#"
    SELECT
        u.id   AS student_id,
        u.name AS student_name,
        CAST(AVG(g.grade) AS DOUBLE PRECISION) AS average_grade
    FROM users u
    JOIN grades g ON g.student_id = u.id
    JOIN assignments a ON a.id = g.assignment_id
    JOIN courses c ON c.id = a.course_id
    WHERE c.id = $1
    GROUP BY u.id, u.name
    ORDER BY u.id
"#;

const STUDENT_COUNT_SQL: &str = r#"
    SELECT
        c.id   AS course_id,
        c.name AS course_name,
        COUNT(e.student_id) AS student_count
    FROM courses c
    LEFT JOIN enrollments e ON e.course_id = c.id
    GROUP BY c.id, c.name
    ORDER BY c.id
"#;

// A student counts as graded with any grade row on any assignment of the course
const STUDENTS_WITHOUT_GRADES_SQL: &str = r#"
    SELECT
        u.id   AS student_id,
        u.name AS student_name
    FROM users u
    JOIN enrollments e ON e.student_id = u.id
    WHERE e.course_id = $1
      AND NOT EXISTS (
          SELECT 1
          FROM grades g
          JOIN assignments a ON a.id = g.assignment_id
          WHERE a.course_id = $1
            AND g.student_id = u.id
      )
    ORDER BY u.id
"#;

const ASSIGNMENT_RANKING_SQL: &str = r#"
    SELECT
        c.id   AS course_id,
        c.name AS course_name,
        COUNT(a.id) AS assignment_count
    FROM courses c
    LEFT JOIN assignments a ON a.course_id = c.id
    GROUP BY c.id, c.name
    ORDER BY assignment_count DESC, c.id ASC
"#;

/// Read-only aggregate queries, always run against the replica binding
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    pool: PgPool,
}

impl AnalyticsService {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.replica().clone(),
        }
    }

    pub async fn course_details(&self, course_id: i32) -> Result<Vec<CourseDetailRow>, DatabaseError> {
        Ok(sqlx::query_as::<_, CourseDetailRow>(COURSE_DETAILS_SQL)
            .bind(course_id)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn average_grades(&self, course_id: i32) -> Result<Vec<AverageGradeRow>, DatabaseError> {
        Ok(sqlx::query_as::<_, AverageGradeRow>(AVERAGE_GRADES_SQL)
            .bind(course_id)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn courses_with_student_count(&self) -> Result<Vec<StudentCountRow>, DatabaseError> {
        Ok(sqlx::query_as::<_, StudentCountRow>(STUDENT_COUNT_SQL).fetch_all(&self.pool).await?)
    }

    pub async fn students_without_grades(&self, course_id: i32) -> Result<Vec<StudentRow>, DatabaseError> {
        Ok(sqlx::query_as::<_, StudentRow>(STUDENTS_WITHOUT_GRADES_SQL)
            .bind(course_id)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn courses_by_assignment_count(&self) -> Result<Vec<AssignmentCountRow>, DatabaseError> {
        Ok(sqlx::query_as::<_, AssignmentCountRow>(ASSIGNMENT_RANKING_SQL).fetch_all(&self.pool).await?)
    }
}
