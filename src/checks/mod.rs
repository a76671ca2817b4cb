//! Environment checks run before any work starts
//!
//! - **git**: `git --version` succeeds
//! - **go**: `go version` succeeds
//!
//! A failed check is an environment error: it is reported and the process
//! exits without touching the repository.

mod runner;
mod tools;
mod trait_def;

pub use runner::create_default_runner;
pub use trait_def::CheckContext;
