//! Required tool checks (git, go)

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::AffectedResult;
use std::path::Path;
use std::process::Command;

/// Run a binary with a harmless argument, returning its trimmed stdout on success
///
/// Runs inside the project root so a `toolchain` directive in go.mod applies.
fn version_line(root: &Path, binary: &str, args: &[&str]) -> Option<String> {
  Command::new(binary)
    .current_dir(root)
    .args(args)
    .output()
    .ok()
    .filter(|output| output.status.success())
    .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// `git` must be runnable
pub struct GitAvailableCheck;

impl Check for GitAvailableCheck {
  fn name(&self) -> &str {
    "git"
  }

  fn run(&self, ctx: &CheckContext) -> AffectedResult<CheckResult> {
    Ok(match version_line(&ctx.root, &ctx.toolchain.git, &["--version"]) {
      Some(version) => CheckResult::pass(self.name(), version),
      None => CheckResult::fail(self.name(), format!("could not run `{} --version`", ctx.toolchain.git)),
    })
  }
}

/// `go` must be runnable
pub struct GoAvailableCheck;

impl Check for GoAvailableCheck {
  fn name(&self) -> &str {
    "go"
  }

  fn run(&self, ctx: &CheckContext) -> AffectedResult<CheckResult> {
    Ok(match version_line(&ctx.root, &ctx.toolchain.go, &["version"]) {
      Some(version) => CheckResult::pass(self.name(), version),
      None => CheckResult::fail(self.name(), format!("could not run `{} version`", ctx.toolchain.go)),
    })
  }
}
