//! Core building blocks shared by every run
//!
//! - **config**: go-affected.toml parsing and validation
//! - **context**: Run context built once in main and passed by reference
//! - **error**: Error types with contextual help messages and exit codes
//! - **vcs**: Git operations (merge-base, changed files) via system git

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
