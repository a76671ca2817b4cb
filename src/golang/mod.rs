//! Go toolchain collaborators
//!
//! - **list**: `go list -e -json` as the `DependencyQuery` backend
//! - **test**: `go test` as the `TestInvoker`

pub mod list;

pub use list::GoList;
pub use test::{GoTest, TestInvoker, TestOutcome, split_flags};
