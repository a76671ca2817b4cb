//! Utility functions for cross-platform path handling

use std::path::{Path, PathBuf};

/// Convert a path to Git/Go format (always forward slashes)
///
/// Both git output and Go import paths use forward slashes, even on Windows.
pub fn path_to_git_format(path: &Path) -> String {
  #[cfg(target_os = "windows")]
  {
    path.to_string_lossy().replace('\\', "/")
  }
  #[cfg(not(target_os = "windows"))]
  {
    path.to_string_lossy().to_string()
  }
}

/// Build a path from raw bytes printed by git
///
/// Unix paths are arbitrary bytes; elsewhere git prints UTF-8.
pub fn path_from_git_bytes(bytes: &[u8]) -> PathBuf {
  #[cfg(unix)]
  {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
  }
  #[cfg(not(unix))]
  {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
  }
}

/// Directory containing `path`, in forward-slash form
///
/// Returns an empty string for files at the top level (`main.go` → `""`).
pub fn parent_dir(path: &Path) -> String {
  path.parent().map(path_to_git_format).unwrap_or_default()
}
