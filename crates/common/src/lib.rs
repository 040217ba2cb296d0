//! Shared types used across the finance orchestration crates.

pub mod error_code;
pub mod types;

pub use error_code::ErrorCode;
pub use types::EntityId;
