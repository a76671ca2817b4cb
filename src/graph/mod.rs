//! Package graph analysis
//!
//! The toolchain owns the graph; this module only walks it through the
//! `DependencyQuery` seam, one batch per level.

pub mod affected;
pub mod namespace;
pub mod query;
pub mod sets;

pub use affected::AffectedAnalysis;
pub use namespace::NamespaceFilter;
pub use query::{DependencyQuery, UnitDescriptor};
