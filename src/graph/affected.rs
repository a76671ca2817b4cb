//! Affected package analysis
//!
//! Given a set of changed files and one or more entrypoint packages, determine:
//! - Which packages directly contain the changed files
//! - Which packages reachable from each entrypoint depend on those packages
//! - The set of packages that need testing (direct + affected)
//!
//! Algorithm, per entrypoint:
//! 1. Resolve the entrypoint to a descriptor (its module root scopes the walk)
//! 2. Map changed files → directories → module-qualified paths → packages (one query)
//! 3. Breadth-first walk over direct imports inside the module namespace.
//!    Each level is one batched query; every package is queried at most once
//!    per run. A package is affected when its transitive deps intersect the
//!    changed set.

use super::namespace::NamespaceFilter;
use super::query::{DependencyQuery, UnitDescriptor};
use super::sets::{UnitSet, intersect};
use crate::core::error::{AffectedError, AffectedResult, ToolchainError};
use crate::utils::{parent_dir, path_to_git_format};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A package added to the affected set, and the changed packages it imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportTrace {
  pub unit: String,
  pub changed: Vec<String>,
}

/// An entrypoint whose dependency closure contains a changed package.
///
/// Informational only: the entrypoint is not added to the test targets unless
/// a file inside it changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AffectedEntrypoint {
  pub entrypoint: String,
  pub unit: String,
  pub changed: Vec<String>,
}

/// Complete affected analysis for one run.
#[derive(Debug, Clone, Default)]
pub struct AffectedAnalysis {
  /// Files that changed
  pub changed_files: Vec<String>,

  /// Packages directly containing changed files
  pub changed_units: UnitSet,

  /// Packages reached by the walk that depend on a changed package
  pub affected_units: UnitSet,

  /// Entrypoints whose dependencies changed
  pub affected_entrypoints: Vec<AffectedEntrypoint>,

  /// One entry per affected package, in discovery order
  pub traces: Vec<ImportTrace>,

  /// Packages queried by the walk
  pub visited_count: usize,
}

impl AffectedAnalysis {
  /// Packages to test: changed packages first, then affected ones, no repeats
  pub fn test_targets(&self) -> Vec<String> {
    let mut targets = self.changed_units.clone();
    targets.extend(self.affected_units.iter().cloned());
    targets.into_vec()
  }

  pub fn is_empty(&self) -> bool {
    self.changed_units.is_empty() && self.affected_units.is_empty()
  }
}

/// Turn a caller-supplied entrypoint into something the toolchain resolves.
///
/// - `cmd/app/main.go` → its directory
/// - an existing directory relative to `root` → `./dir` (resolved as a path)
/// - anything else is passed through as an import path
pub fn normalize_entrypoint(root: &Path, reference: &str) -> String {
  let reference = reference.trim();
  let target = if reference.ends_with(".go") {
    parent_dir(Path::new(reference))
  } else {
    reference.trim_end_matches('/').to_string()
  };

  if target.is_empty() || target == "." {
    return ".".to_string();
  }
  if target.starts_with("./") || target.starts_with("../") || Path::new(&target).is_absolute() {
    return target;
  }
  if root.join(&target).is_dir() {
    return format!("./{}", target);
  }
  target
}

/// Resolve one entrypoint to exactly one package descriptor.
pub fn resolve_entrypoint<Q: DependencyQuery>(query: &Q, root: &Path, reference: &str) -> AffectedResult<UnitDescriptor> {
  let target = normalize_entrypoint(root, reference);
  let mut resolved = query.resolve(std::slice::from_ref(&target))?;

  match resolved.len() {
    0 => Err(AffectedError::Toolchain(ToolchainError::EntrypointNotFound {
      entrypoint: reference.to_string(),
    })),
    1 => Ok(resolved.remove(0)),
    n => Err(AffectedError::with_help(
      format!("Entrypoint '{}' matches {} packages", reference, n),
      "Entrypoints must name a single Go file or package, not a pattern.",
    )),
  }
}

/// Qualify a module-relative directory with the module root.
///
/// Without a module root the directory is passed as a relative path instead.
fn qualify(module: &str, dir: &str) -> String {
  let module = module.trim_end_matches('/');
  match (module.is_empty(), dir.is_empty() || dir == ".") {
    (true, true) => ".".to_string(),
    (true, false) => format!("./{}", dir),
    (false, true) => module.to_string(),
    (false, false) => format!("{}/{}", module, dir),
  }
}

/// Directory of each changed file, relative to the module root.
///
/// Changed paths are relative to `root`. When the module directory is known
/// they are re-based onto it, so a run from below (or above) the module root
/// still yields module-relative directories; files outside the module are
/// skipped. Without a module directory `root` is taken as the module root.
fn module_relative_dirs(root: &Path, module_dir: Option<&Path>, changed_files: &[impl AsRef<Path>]) -> Vec<String> {
  let Some(module_dir) = module_dir else {
    return changed_files.iter().map(|file| parent_dir(file.as_ref())).collect();
  };

  let root = canonical(root);
  let module_dir = canonical(module_dir);
  changed_files
    .iter()
    .filter_map(|file| root.join(file).strip_prefix(&module_dir).ok().map(parent_dir))
    .collect()
}

/// Resolve symlinks (e.g. `/tmp` vs `/private/tmp`) so prefixes compare; keep the
/// path as given when it does not exist.
fn canonical(path: &Path) -> PathBuf {
  std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Map changed files to the packages containing them.
///
/// Directories are deduplicated, qualified under `module` and resolved in a
/// single query. Directories that hold no package are dropped.
pub fn changed_units<Q: DependencyQuery>(
  query: &Q,
  changed_files: &[impl AsRef<Path>],
  root: &Path,
  module: &str,
  module_dir: Option<&Path>,
) -> AffectedResult<UnitSet> {
  let dirs: UnitSet = module_relative_dirs(root, module_dir, changed_files)
    .iter()
    .map(|dir| qualify(module, dir))
    .collect();

  if dirs.is_empty() {
    return Ok(UnitSet::new());
  }

  let resolved = query.resolve(dirs.as_slice())?;
  Ok(resolved.into_iter().map(|unit| unit.identifier).collect())
}

/// Breadth-first walk state shared across all entrypoints of a run.
pub struct Traversal<'q, Q> {
  query: &'q Q,
  filter: NamespaceFilter,
  visited: HashSet<String>,
  affected: UnitSet,
  traces: Vec<ImportTrace>,
}

impl<'q, Q: DependencyQuery> Traversal<'q, Q> {
  pub fn new(query: &'q Q, filter: NamespaceFilter) -> Self {
    Self {
      query,
      filter,
      visited: HashSet::new(),
      affected: UnitSet::new(),
      traces: Vec::new(),
    }
  }

  /// Walk the imports of `entry`, recording packages that depend on `changed`.
  ///
  /// Issues one query per level. Identifiers are marked visited before they are
  /// queried, so a package requested once is never requested again, even if
  /// the toolchain drops it or reports it under another name.
  pub fn walk(&mut self, entry: &UnitDescriptor, changed: &UnitSet) -> AffectedResult<()> {
    let namespace = entry.owner_module.as_str();
    let mut frontier = vec![entry.clone()];

    loop {
      let mut next = UnitSet::new();
      for unit in &frontier {
        for import in &unit.direct_imports {
          if self.filter.admits(namespace, import) && !self.visited.contains(import) {
            next.insert(import.as_str());
          }
        }
      }

      if next.is_empty() {
        return Ok(());
      }

      self.visited.extend(next.iter().cloned());
      let resolved = self.query.resolve(next.as_slice())?;

      for unit in &resolved {
        let hits = intersect(&unit.transitive_dependencies, changed.as_slice());
        if !hits.is_empty() && self.affected.insert(unit.identifier.as_str()) {
          self.traces.push(ImportTrace {
            unit: unit.identifier.clone(),
            changed: hits.into_iter().cloned().collect(),
          });
        }
        self.visited.insert(unit.identifier.clone());
      }

      frontier = resolved;
    }
  }

  #[cfg(test)]
  pub fn is_visited(&self, identifier: &str) -> bool {
    self.visited.contains(identifier)
  }

  pub fn visited_count(&self) -> usize {
    self.visited.len()
  }

  #[cfg(test)]
  pub fn affected(&self) -> &UnitSet {
    &self.affected
  }

  /// Consume the walk, returning affected packages and their traces
  pub fn finish(self) -> (UnitSet, Vec<ImportTrace>) {
    (self.affected, self.traces)
  }
}

/// Analyze which packages are affected by `changed_files`, starting from each
/// entrypoint in order.
///
/// Any query failure aborts the analysis; no partial result is returned.
pub fn analyze<Q: DependencyQuery>(
  query: &Q,
  root: &Path,
  entrypoints: &[String],
  changed_files: &[PathBuf],
  filter: NamespaceFilter,
) -> AffectedResult<AffectedAnalysis> {
  if changed_files.is_empty() {
    return Ok(AffectedAnalysis::default());
  }

  let changed_file_names: Vec<String> = changed_files.iter().map(|p| path_to_git_format(p)).collect();

  let mut traversal = Traversal::new(query, filter);
  let mut all_changed = UnitSet::new();
  let mut affected_entrypoints = Vec::new();

  for reference in entrypoints {
    let entry = resolve_entrypoint(query, root, reference)?;
    let changed = changed_units(
      query,
      changed_files,
      root,
      &entry.owner_module,
      entry.module_dir.as_deref(),
    )?;

    let hits = intersect(&entry.transitive_dependencies, changed.as_slice());
    if !hits.is_empty() {
      affected_entrypoints.push(AffectedEntrypoint {
        entrypoint: reference.clone(),
        unit: entry.identifier.clone(),
        changed: hits.into_iter().cloned().collect(),
      });
    }

    traversal.walk(&entry, &changed)?;
    all_changed.extend(changed.into_vec());
  }

  let visited_count = traversal.visited_count();
  let (affected_units, traces) = traversal.finish();

  Ok(AffectedAnalysis {
    changed_files: changed_file_names,
    changed_units: all_changed,
    affected_units,
    affected_entrypoints,
    traces,
    visited_count,
  })
}
