//! Module namespace filter used to prune the import walk
//!
//! Only imports that belong to the entrypoint's own module are expanded.
//! Standard library and third-party packages are never queried.

use serde::Serialize;
use std::fmt;

/// How an import identifier is judged to belong to a module
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceFilter {
  /// Identifier contains the module path anywhere.
  ///
  /// Matches the historical behaviour. Over-includes identifiers that merely
  /// embed the module path (`github.com/x/mod-extra` for module `github.com/x/mod`)
  /// and under-includes aliased paths.
  #[default]
  Contains,

  /// Identifier is the module path or lives below it (`module/...`)
  Prefix,
}

impl NamespaceFilter {
  /// Whether `identifier` is inside `module`.
  ///
  /// An empty module admits nothing: without a module root there is no way to
  /// tell project packages from the standard library.
  pub fn admits(self, module: &str, identifier: &str) -> bool {
    if module.is_empty() {
      return false;
    }
    match self {
      NamespaceFilter::Contains => identifier.contains(module),
      NamespaceFilter::Prefix => identifier
        .strip_prefix(module)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
    }
  }
}

impl fmt::Display for NamespaceFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NamespaceFilter::Contains => write!(f, "contains"),
      NamespaceFilter::Prefix => write!(f, "prefix"),
    }
  }
}
