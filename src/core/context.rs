//! Run context - build once, pass everywhere
//!
//! ```text
//! main.rs:
//!   RunContext::build() -> &RunContext
//!   |
//!   v
//! commands/test.rs:
//!   fn run_test(ctx: &RunContext, args)
//! ```
//!
//! The context only holds what is known before any external tool runs: the
//! working directory and the merged configuration. Collaborators (git, go) are
//! created from it on demand so the environment checks can run first.

use crate::checks::CheckContext;
use crate::core::config::AffectedConfig;
use crate::core::error::AffectedResult;
use crate::core::vcs::SystemGit;
use crate::golang::{GoList, GoTest};
use std::path::{Path, PathBuf};

pub struct RunContext {
  /// Directory the run happens in; changed paths are relative to it
  pub root: PathBuf,

  /// Configuration file contents, or defaults when none was found
  pub config: AffectedConfig,
}

impl RunContext {
  /// Build the context for `root`, loading config from `config_path` or by discovery.
  pub fn build(root: &Path, config_path: Option<&Path>) -> AffectedResult<Self> {
    let config = AffectedConfig::load(root, config_path)?;
    Ok(Self {
      root: root.to_path_buf(),
      config,
    })
  }

  /// Context for the environment checks
  pub fn check_context(&self) -> CheckContext {
    CheckContext {
      root: self.root.clone(),
      toolchain: self.config.toolchain.clone(),
    }
  }

  /// Open the git repository the run happens in
  pub fn git(&self) -> AffectedResult<SystemGit> {
    SystemGit::open(&self.config.toolchain.git, &self.root)
  }

  /// Dependency query for this run
  pub fn go_list(&self) -> GoList {
    GoList::new(self.config.toolchain.go.clone(), &self.root)
  }

  /// Test invoker for this run
  pub fn go_test(&self) -> GoTest {
    GoTest::new(self.config.toolchain.go.clone(), &self.root)
  }

  /// Get working directory as Path reference (convenience)
  pub fn root(&self) -> &Path {
    &self.root
  }
}
