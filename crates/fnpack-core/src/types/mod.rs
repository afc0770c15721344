//! Core data types shared by the fnpack crates.

pub mod application;

pub use application::Application;
