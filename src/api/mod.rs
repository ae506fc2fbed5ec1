pub mod payload;

pub use payload::{CoursePatch, NewCourse};
