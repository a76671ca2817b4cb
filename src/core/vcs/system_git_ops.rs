//! Change detection for SystemGit (merge-base, diff)

use super::system_git::SystemGit;
use crate::core::error::{AffectedError, AffectedResult, GitError, ResultExt};
use crate::utils::path_from_git_bytes;
use std::path::PathBuf;

impl SystemGit {
  /// Find the commit HEAD forked from `branch`
  ///
  /// Prefers `git merge-base --fork-point`, which consults the branch reflog.
  /// When the reflog has no record (fresh clones, CI checkouts) git exits 1 with
  /// no output; fall back to the plain common ancestor of HEAD and `branch`.
  pub fn merge_base(&self, branch: &str) -> AffectedResult<String> {
    let output = self
      .git_cmd()
      .args(["merge-base", "--fork-point", branch])
      .output()
      .context("Failed to run git merge-base --fork-point")?;

    if output.status.success() {
      let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
      if !sha.is_empty() {
        return Ok(sha);
      }
    }

    let output = self
      .git_cmd()
      .args(["merge-base", "HEAD", branch])
      .output()
      .context("Failed to run git merge-base")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      // Exit 1 without a message means the histories are unrelated
      if output.status.code() == Some(1) && stderr.trim().is_empty() {
        return Err(AffectedError::Git(GitError::MergeBaseNotFound {
          branch: branch.to_string(),
        }));
      }
      return Err(AffectedError::Git(GitError::CommandFailed {
        command: format!("git merge-base HEAD {}", branch),
        stderr: stderr.to_string(),
      }));
    }

    let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if sha.is_empty() {
      return Err(AffectedError::Git(GitError::MergeBaseNotFound {
        branch: branch.to_string(),
      }));
    }
    Ok(sha)
  }

  /// List files that differ between `base` and the working tree
  ///
  /// Paths are relative to the directory the repository was opened from;
  /// files outside it are not reported. `-z` keeps names byte-exact (no
  /// C-style quoting of quotes, backslashes, tabs or newlines).
  pub fn changed_files(&self, base: &str) -> AffectedResult<Vec<PathBuf>> {
    let output = self
      .git_cmd()
      .args(["diff", "-z", "--name-only", "--relative", base])
      .output()
      .context("Failed to run git diff")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(AffectedError::Git(GitError::CommandFailed {
        command: format!("git diff -z --name-only --relative {}", base),
        stderr: stderr.to_string(),
      }));
    }

    let files = output
      .stdout
      .split(|b| *b == 0)
      .filter(|name| !name.is_empty())
      .map(path_from_git_bytes)
      .collect();

    Ok(files)
  }

  /// Changed files since HEAD forked from `branch`
  pub fn changed_files_since_merge_base(&self, branch: &str) -> AffectedResult<Vec<PathBuf>> {
    let base = self.merge_base(branch)?;
    self.changed_files(&base)
  }
}
