// handlers/public/mod.rs - Public handlers (no authentication required)

pub mod health;

pub use health::health;
