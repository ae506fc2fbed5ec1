// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here sits behind `jwt_auth_middleware`. Mutating course
// routes additionally carry the instructor role guard.

pub mod analytics;
pub mod course;
pub mod token;

pub use token::test_token;
