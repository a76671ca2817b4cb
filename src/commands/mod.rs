//! CLI commands for go-affected
//!
//! - **test**: Run `go test` for packages affected by changes
//!
//! Commands accept `&RunContext` so config is loaded once in main.


pub use test::{TestArgs, run_test};
