//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const MODULE: &str = "example.com/m";

/// A Go module inside a git repository, with `main` as the base branch
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Create a new module with a committed go.mod on `main`
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    std::fs::write(path.join("go.mod"), format!("module {}\n\ngo 1.21\n", MODULE))?;

    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial module setup"])?;

    Ok(Self { _root: root, path })
  }

  /// Add a package in `dir` importing other packages of this module
  pub fn add_package(&self, dir: &str, imports: &[&str]) -> Result<PathBuf> {
    let pkg_path = self.path.join(dir);
    std::fs::create_dir_all(&pkg_path)?;

    let name = package_name(dir);
    let mut source = format!("package {}\n\n", name);
    for import in imports {
      source.push_str(&format!("import \"{}/{}\"\n", MODULE, import));
    }
    source.push_str("\nfunc Value() int {\n\treturn 1");
    for import in imports {
      source.push_str(&format!(" + {}.Value()", package_name(import)));
    }
    source.push_str("\n}\n");

    let file = pkg_path.join(format!("{}.go", name));
    std::fs::write(&file, source)?;
    Ok(file)
  }

  /// Create a branch off the current HEAD and switch to it
  pub fn checkout_new_branch(&self, name: &str) -> Result<()> {
    git(&self.path, &["checkout", "-b", name])?;
    Ok(())
  }

  /// Commit current changes
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;

    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Append a line to a file relative to the module root
  pub fn touch_file(&self, path: &str) -> Result<()> {
    let file = self.path.join(path);
    let mut content = std::fs::read_to_string(&file)?;
    content.push_str("\n// touched\n");
    std::fs::write(file, content)?;
    Ok(())
  }

  /// Write a file relative to the module root
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let file = self.path.join(path);
    if let Some(parent) = file.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file, content)?;
    Ok(())
  }
}

fn package_name(dir: &str) -> &str {
  dir.rsplit('/').next().unwrap_or(dir)
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

fn go_available() -> bool {
  Command::new("go")
    .arg("version")
    .output()
    .map(|output| output.status.success())
    .unwrap_or(false)
}

/// Whether a test that needs the Go toolchain should return early.
///
/// Prints a notice so a run without `go` does not pass silently. With
/// `GO_AFFECTED_REQUIRE_GO` set a missing toolchain fails the test instead.
pub fn skip_without_go(test: &str) -> bool {
  if go_available() {
    return false;
  }
  if std::env::var_os("GO_AFFECTED_REQUIRE_GO").is_some() {
    panic!("{}: `go` is not on PATH and GO_AFFECTED_REQUIRE_GO is set", test);
  }
  eprintln!("skipping {}: `go` is not on PATH", test);
  true
}

/// Run the go-affected binary, whatever its exit status
pub fn run_go_affected(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_go-affected");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run go-affected")
}

/// Run the go-affected binary and require success
pub fn run_go_affected_ok(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_go_affected(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "go-affected command failed: go-affected {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}
