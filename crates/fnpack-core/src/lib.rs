//! # fnpack-core
//!
//! Core types and utilities shared across the fnpack crates.
//!
//! This crate provides:
//! - `FnpackError` for unified error handling
//! - `Application`, the root directory a function is packaged from
//!
//! ## Architecture
//!
//! - `error`: Error types and result aliases
//! - `types`: Core data types

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{FnpackError, FnpackResult};
pub use types::Application;
