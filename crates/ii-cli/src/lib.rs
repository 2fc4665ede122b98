//! Infrastructure intent CLI library crate.
//!
//! Re-exports the config and session modules so the binary (`main.rs`) and
//! external crates (e.g. `ii-e2e-tests`) can drive a session directly.

pub mod config;
pub mod session;
