//! Check runner for executing environment checks

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::{AffectedError, AffectedResult, EnvironmentError};

/// Check runner that executes multiple checks
pub struct CheckRunner {
  checks: Vec<Box<dyn Check>>,
}

impl CheckRunner {
  /// Create a new check runner
  pub fn new() -> Self {
    Self { checks: Vec::new() }
  }

  /// Add a check to the runner
  pub fn add_check(&mut self, check: Box<dyn Check>) {
    self.checks.push(check);
  }

  /// Run all checks and collect results
  pub fn run_all(&self, ctx: &CheckContext) -> AffectedResult<Vec<CheckResult>> {
    self.checks.iter().map(|check| check.run(ctx)).collect()
  }

  /// Run checks in order; the first failure becomes an environment error
  pub fn require_all(&self, ctx: &CheckContext) -> AffectedResult<Vec<CheckResult>> {
    let results = self.run_all(ctx)?;
    if let Some(failed) = results.iter().find(|r| !r.passed) {
      return Err(AffectedError::Environment(EnvironmentError::ToolMissing {
        tool: failed.check_name.clone(),
      }));
    }
    Ok(results)
  }

  /// Get all registered checks
  #[cfg(test)]
  pub fn checks(&self) -> &[Box<dyn Check>] {
    &self.checks
  }
}

impl Default for CheckRunner {
  fn default() -> Self {
    Self::new()
  }
}

/// Create a runner with all built-in checks (git first, then go)
pub fn create_default_runner() -> CheckRunner {
  let mut runner = CheckRunner::new();

  runner.add_check(Box::new(super::tools::GitAvailableCheck));
  runner.add_check(Box::new(super::tools::GoAvailableCheck));

  runner
}
