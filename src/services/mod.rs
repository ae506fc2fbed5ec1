pub mod analytics_service;
pub mod course_service;

pub use analytics_service::{
    AnalyticsService, AssignmentCountRow, AverageGradeRow, CourseDetailRow, StudentCountRow,
    StudentRow,
};
pub use course_service::CourseService;
