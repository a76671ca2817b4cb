//! Integration tests for the affected analysis against a real Go toolchain
//!
//! Every test returns early when `go` is not installed.

use crate::helpers::{MODULE, TestWorkspace, run_go_affected, run_go_affected_ok, skip_without_go};
use anyhow::Result;

/// c <- b <- a, committed on main, with a feature branch checked out
fn linear_chain() -> Result<TestWorkspace> {
  let ws = TestWorkspace::new()?;
  ws.add_package("c", &[])?;
  ws.add_package("b", &["c"])?;
  ws.add_package("a", &["b"])?;
  ws.commit("Add a, b and c")?;
  ws.checkout_new_branch("feature")?;
  Ok(ws)
}

fn lines(stdout: &[u8]) -> Vec<String> {
  String::from_utf8_lossy(stdout).lines().map(String::from).collect()
}

#[test]
fn test_no_changes() -> Result<()> {
  if skip_without_go("test_no_changes") {
    return Ok(());
  }
  let ws = linear_chain()?;

  let output = run_go_affected_ok(&ws.path, &["--head", "main", "--entrypoints", "a"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("no files changed"), "got: {}", stdout);
  assert!(!stdout.contains("go test"), "nothing should run, got: {}", stdout);

  Ok(())
}

#[test]
fn test_linear_chain_targets() -> Result<()> {
  if skip_without_go("test_linear_chain_targets") {
    return Ok(());
  }
  let ws = linear_chain()?;
  ws.touch_file("c/c.go")?;
  ws.commit("Change c")?;

  let output = run_go_affected_ok(&ws.path, &["--head", "main", "--entrypoints", "a", "--format", "names"])?;

  assert_eq!(
    lines(&output.stdout),
    vec![format!("{}/c", MODULE), format!("{}/b", MODULE)]
  );

  Ok(())
}

#[test]
fn test_uncommitted_change_dry_run() -> Result<()> {
  if skip_without_go("test_uncommitted_change_dry_run") {
    return Ok(());
  }
  let ws = linear_chain()?;
  ws.touch_file("c/c.go")?;

  let output = run_go_affected_ok(
    &ws.path,
    &["--head", "main", "--entrypoints", "a/a.go", "--go-test-flags", "-count=1", "--dry-run"],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("entrypoint a/a.go is affected"), "got: {}", stdout);
  assert!(
    stdout.contains(&format!("package {}/b imports [\"{}/c\"]", MODULE, MODULE)),
    "got: {}",
    stdout
  );
  assert!(stdout.contains("DRY RUN: Would execute:"), "got: {}", stdout);
  assert!(
    stdout.contains(&format!("go test -count=1 {}/c {}/b", MODULE, MODULE)),
    "got: {}",
    stdout
  );

  Ok(())
}

#[test]
fn test_change_outside_packages_has_no_targets() -> Result<()> {
  if skip_without_go("test_change_outside_packages_has_no_targets") {
    return Ok(());
  }
  let ws = linear_chain()?;
  ws.write_file("README.md", "# m\n")?;
  ws.commit("Add README")?;

  let output = run_go_affected_ok(&ws.path, &["--head", "main", "--entrypoints", "a", "--dry-run"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("no updates"), "got: {}", stdout);
  assert!(!stdout.contains("DRY RUN"), "got: {}", stdout);

  Ok(())
}

#[test]
fn test_json_plan() -> Result<()> {
  if skip_without_go("test_json_plan") {
    return Ok(());
  }
  let ws = linear_chain()?;
  ws.touch_file("b/b.go")?;
  ws.commit("Change b")?;

  let output = run_go_affected_ok(
    &ws.path,
    &["--head", "main", "--entrypoints", "a", "--namespace", "prefix", "--format", "json"],
  )?;
  let plan: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(plan["head"], "main");
  assert_eq!(plan["namespace"], "prefix");
  assert_eq!(plan["changed_files"], serde_json::json!(["b/b.go"]));
  assert_eq!(plan["changed_units"], serde_json::json!([format!("{}/b", MODULE)]));
  assert_eq!(plan["test_targets"], serde_json::json!([format!("{}/b", MODULE)]));
  assert_eq!(plan["affected_entrypoints"][0]["unit"], format!("{}/a", MODULE));

  Ok(())
}

#[test]
fn test_go_test_exit_code_is_forwarded() -> Result<()> {
  if skip_without_go("test_go_test_exit_code_is_forwarded") {
    return Ok(());
  }
  let ws = linear_chain()?;
  ws.write_file(
    "c/c_test.go",
    "package c\n\nimport \"testing\"\n\nfunc TestFails(t *testing.T) {\n\tt.Fatal(\"boom\")\n}\n",
  )?;
  ws.commit("Add failing test")?;

  let output = run_go_affected(&ws.path, &["--head", "main", "--entrypoints", "a"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert_eq!(output.status.code(), Some(1), "stdout: {}", stdout);
  assert!(stdout.contains(&format!("go test {}/c", MODULE)), "got: {}", stdout);

  Ok(())
}

#[test]
fn test_unknown_entrypoint() -> Result<()> {
  if skip_without_go("test_unknown_entrypoint") {
    return Ok(());
  }
  let ws = linear_chain()?;
  ws.touch_file("c/c.go")?;

  let output = run_go_affected(&ws.path, &["--head", "main", "--entrypoints", "does/not/exist"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr.contains("did not resolve to a package"), "got: {}", stderr);

  Ok(())
}

#[test]
fn test_unknown_branch() -> Result<()> {
  if skip_without_go("test_unknown_branch") {
    return Ok(());
  }
  let ws = linear_chain()?;

  let output = run_go_affected(&ws.path, &["--head", "no-such-branch", "--entrypoints", "a"])?;

  assert_eq!(output.status.code(), Some(2));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Git command failed"));

  Ok(())
}

#[test]
fn test_run_from_module_subdirectory() -> Result<()> {
  if skip_without_go("test_run_from_module_subdirectory") {
    return Ok(());
  }
  let ws = TestWorkspace::new()?;
  ws.add_package("sub/pkg", &[])?;
  ws.add_package("app", &["sub/pkg"])?;
  ws.commit("Add sub/pkg and app")?;
  ws.checkout_new_branch("feature")?;
  ws.touch_file("sub/pkg/pkg.go")?;

  // git reports `pkg/pkg.go` here; it still belongs to example.com/m/sub/pkg
  let output = run_go_affected_ok(
    &ws.path.join("sub"),
    &["--head", "main", "--entrypoints", "../app", "--format", "names"],
  )?;

  assert_eq!(lines(&output.stdout), vec![format!("{}/sub/pkg", MODULE)]);

  Ok(())
}
