//! Check trait abstraction for environment checks
//!
//! Every check implements the `Check` trait and is registered in
//! `create_default_runner()`. A run only starts once all of them pass.

use crate::core::config::ToolchainConfig;
use crate::core::error::AffectedResult;
use std::path::PathBuf;

/// Result of running a check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
  /// Name of the check that ran
  pub check_name: String,
  /// Whether the check passed
  pub passed: bool,
  /// Human-readable message
  pub message: String,
}

impl CheckResult {
  /// Create a passing check result
  pub fn pass(check_name: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      check_name: check_name.into(),
      passed: true,
      message: message.into(),
    }
  }

  /// Create a failing check result
  pub fn fail(check_name: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      check_name: check_name.into(),
      passed: false,
      message: message.into(),
    }
  }
}

/// Context passed to checks
#[derive(Debug, Clone)]
pub struct CheckContext {
  /// Directory the run happens in
  pub root: PathBuf,
  /// External binaries the run will invoke
  pub toolchain: ToolchainConfig,
}

/// Environment check trait
pub trait Check {
  /// Unique name for this check; for tool checks, the tool it looks for
  fn name(&self) -> &str;

  /// Run the check and return a result
  fn run(&self, ctx: &CheckContext) -> AffectedResult<CheckResult>;
}
