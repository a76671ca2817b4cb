//! Dependency query abstraction
//!
//! The traversal never talks to a toolchain directly. It asks a
//! `DependencyQuery` for descriptors, which keeps the algorithm testable against
//! an in-memory graph and leaves room for backends other than `go list`.

use crate::core::error::AffectedResult;
use serde::Serialize;
use std::path::PathBuf;

/// One build unit (Go package) as reported by the toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitDescriptor {
  /// Canonical identifier (import path)
  pub identifier: String,

  /// Direct imports; may contain duplicates
  pub direct_imports: Vec<String>,

  /// Full transitive dependency closure, excluding the unit itself
  pub transitive_dependencies: Vec<String>,

  /// Root identifier of the module that owns this unit (empty if none)
  pub owner_module: String,

  /// Directory holding the owning module's root, when the toolchain reports one
  pub module_dir: Option<PathBuf>,
}

/// Resolve identifiers or paths to descriptors.
///
/// Contract:
/// - One call is one batch; implementations should issue a single external
///   invocation per call rather than one per target
/// - Output order need not match input order
/// - Targets that do not name a real unit are omitted, not errors
/// - A failure of the underlying tool is an error and aborts the run
pub trait DependencyQuery {
  fn resolve(&self, targets: &[String]) -> AffectedResult<Vec<UnitDescriptor>>;
}

impl<Q: DependencyQuery + ?Sized> DependencyQuery for &Q {
  fn resolve(&self, targets: &[String]) -> AffectedResult<Vec<UnitDescriptor>> {
    (**self).resolve(targets)
  }
}
