//! Import error types
//!
//! Error taxonomy for the streaming import engine. Structural errors carry
//! the byte offset at which the token stream stopped matching the expected
//! shape.

mod types;

pub use types::{ImportError, ImportResult};
