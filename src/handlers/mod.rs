// handlers/mod.rs - Handler tiers
//
// Public (no auth) → Protected (JWT auth, optional role guard)
pub mod protected;
pub mod public;
