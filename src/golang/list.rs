//! `go list` backend for the dependency query
//!
//! One `go list -e -json <targets...>` subprocess per batch. `-e` makes the
//! toolchain report per-package problems inside the JSON stream instead of
//! failing the whole command, which lets unresolvable directories be dropped
//! while a real toolchain failure (non-zero exit) stays fatal.

use crate::core::error::{AffectedError, AffectedResult, ResultExt, ToolchainError};
use crate::graph::{DependencyQuery, UnitDescriptor};
use serde::Deserialize;
use serde::de::IgnoredAny;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Subset of `go list -json` output we care about
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GoPackage {
  import_path: String,
  #[serde(default)]
  imports: Vec<String>,
  #[serde(default)]
  deps: Vec<String>,
  #[serde(default)]
  module: Option<GoModule>,
  #[serde(default)]
  error: Option<IgnoredAny>,
  #[serde(default)]
  go_files: Vec<String>,
  #[serde(default)]
  cgo_files: Vec<String>,
  #[serde(default)]
  test_go_files: Vec<String>,
  #[serde(default)]
  x_test_go_files: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GoModule {
  path: String,
  #[serde(default)]
  dir: Option<PathBuf>,
}

impl GoPackage {
  /// A package entry that names a real, testable package.
  ///
  /// Entries with an error and no Go sources are directories the toolchain
  /// could not turn into a package (no Go files, missing, outside the module).
  /// Packages that merely fail to compile still carry their sources and are kept.
  fn is_resolvable(&self) -> bool {
    let has_sources = !(self.go_files.is_empty()
      && self.cgo_files.is_empty()
      && self.test_go_files.is_empty()
      && self.x_test_go_files.is_empty());
    self.error.is_none() || has_sources
  }

  fn into_descriptor(self) -> UnitDescriptor {
    let (owner_module, module_dir) = match self.module {
      Some(module) => (module.path, module.dir),
      None => (String::new(), None),
    };
    UnitDescriptor {
      identifier: self.import_path,
      direct_imports: self.imports,
      transitive_dependencies: self.deps,
      owner_module,
      module_dir,
    }
  }
}

/// Decode the concatenated JSON objects `go list -json` prints.
pub(crate) fn parse_list_output(data: &[u8]) -> AffectedResult<Vec<UnitDescriptor>> {
  let stream = serde_json::Deserializer::from_slice(data).into_iter::<GoPackage>();
  let mut units = Vec::new();

  for package in stream {
    let package = package.map_err(|e| {
      AffectedError::Toolchain(ToolchainError::MalformedOutput {
        command: "go list -e -json".to_string(),
        reason: e.to_string(),
      })
    })?;

    if package.is_resolvable() {
      units.push(package.into_descriptor());
    }
  }

  Ok(units)
}

/// Dependency query backed by the system `go` binary
pub struct GoList {
  binary: String,
  root: PathBuf,
}

impl GoList {
  pub fn new(binary: impl Into<String>, root: &Path) -> Self {
    Self {
      binary: binary.into(),
      root: root.to_path_buf(),
    }
  }
}

impl DependencyQuery for GoList {
  fn resolve(&self, targets: &[String]) -> AffectedResult<Vec<UnitDescriptor>> {
    if targets.is_empty() {
      return Ok(Vec::new());
    }

    let output = Command::new(&self.binary)
      .current_dir(&self.root)
      .args(["list", "-e", "-json"])
      .args(targets)
      .output()
      .with_context(|| format!("Failed to execute {} list", self.binary))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(AffectedError::Toolchain(ToolchainError::CommandFailed {
        command: format!("{} list -e -json {}", self.binary, targets.join(" ")),
        stderr: stderr.to_string(),
      }));
    }

    parse_list_output(&output.stdout)
  }
}
