//! Error types for go-affected with contextual messages and exit codes
//!
//! Every collaborator failure (git, go toolchain, config) is a typed error that
//! travels back up to `main`, which prints it once and exits with the mapped code.
//! Nothing below `main` aborts the process.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for go-affected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, unresolvable entrypoint)
  User = 1,
  /// System error (git, go toolchain, I/O)
  System = 2,
  /// Environment not usable (required tool missing)
  Environment = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for go-affected
#[derive(Debug)]
pub enum AffectedError {
  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// Go toolchain errors (`go list`, `go test`)
  Toolchain(ToolchainError),

  /// A required external tool is not available
  Environment(EnvironmentError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl AffectedError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    AffectedError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    AffectedError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      AffectedError::Message { message, context, help } => AffectedError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      AffectedError::Io(err) => AffectedError::Message {
        message: format!("I/O error: {}", err),
        context: Some(ctx_str),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      AffectedError::Config(_) => ExitCode::User,
      AffectedError::Git(_) => ExitCode::System,
      AffectedError::Toolchain(ToolchainError::EntrypointNotFound { .. }) => ExitCode::User,
      AffectedError::Toolchain(_) => ExitCode::System,
      AffectedError::Environment(_) => ExitCode::Environment,
      AffectedError::Io(_) => ExitCode::System,
      AffectedError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      AffectedError::Config(e) => e.help_message(),
      AffectedError::Git(e) => e.help_message(),
      AffectedError::Toolchain(e) => e.help_message(),
      AffectedError::Environment(e) => e.help_message(),
      AffectedError::Message { help, .. } => help.clone(),
      AffectedError::Io(_) => None,
    }
  }
}

impl fmt::Display for AffectedError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AffectedError::Config(e) => write!(f, "{}", e),
      AffectedError::Git(e) => write!(f, "{}", e),
      AffectedError::Toolchain(e) => write!(f, "{}", e),
      AffectedError::Environment(e) => write!(f, "{}", e),
      AffectedError::Io(e) => write!(f, "I/O error: {}", e),
      AffectedError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for AffectedError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      AffectedError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for AffectedError {
  fn from(err: io::Error) -> Self {
    AffectedError::Io(err)
  }
}

impl From<toml_edit::de::Error> for AffectedError {
  fn from(err: toml_edit::de::Error) -> Self {
    AffectedError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for AffectedError {
  fn from(err: serde_json::Error) -> Self {
    AffectedError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Explicitly requested config file does not exist
  NotFound { path: PathBuf },

  /// Missing required setting (neither flag nor config provided it)
  MissingField { field: String },

  /// Setting present but not one of the accepted values
  InvalidValue { field: String, value: String, expected: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Pass an existing file to --config, or drop the flag to use go-affected.toml discovery.".to_string())
      }
      ConfigError::MissingField { field } => Some(format!(
        "Pass --{} on the command line or set it under [defaults] in go-affected.toml.",
        field.replace('_', "-")
      )),
      ConfigError::InvalidValue { expected, .. } => Some(format!("Valid values: {}", expected)),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => {
        write!(f, "Config file not found: {}", path.display())
      }
      ConfigError::MissingField { field } => {
        write!(f, "Missing required setting: {}", field)
      }
      ConfigError::InvalidValue { field, value, .. } => {
        write!(f, "Invalid value '{}' for {}", value, field)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// No common ancestor between HEAD and the base branch
  MergeBaseNotFound { branch: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { path } => Some(format!(
        "Run go-affected from inside a git checkout (looked at: {})",
        path.display()
      )),
      GitError::MergeBaseNotFound { branch } => Some(format!(
        "Make sure '{}' exists locally (e.g. `git fetch origin {}`) and shares history with HEAD.",
        branch, branch
      )),
      GitError::CommandFailed { .. } => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::MergeBaseNotFound { branch } => {
        write!(f, "No merge-base found between HEAD and '{}'", branch)
      }
    }
  }
}

/// Go toolchain errors
#[derive(Debug)]
pub enum ToolchainError {
  /// `go` exited with a failure status
  CommandFailed { command: String, stderr: String },

  /// `go list` produced output we could not decode
  MalformedOutput { command: String, reason: String },

  /// An entrypoint did not resolve to any package
  EntrypointNotFound { entrypoint: String },
}

impl ToolchainError {
  fn help_message(&self) -> Option<String> {
    match self {
      ToolchainError::EntrypointNotFound { entrypoint } => Some(format!(
        "Check that '{}' is a Go file or package directory inside the current module.",
        entrypoint
      )),
      ToolchainError::CommandFailed { .. } => Some("Run the command by hand to see the full toolchain output.".to_string()),
      ToolchainError::MalformedOutput { .. } => None,
    }
  }
}

impl fmt::Display for ToolchainError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ToolchainError::CommandFailed { command, stderr } => {
        write!(f, "Go command failed: {}\n{}", command, stderr)
      }
      ToolchainError::MalformedOutput { command, reason } => {
        write!(f, "Could not decode output of {}: {}", command, reason)
      }
      ToolchainError::EntrypointNotFound { entrypoint } => {
        write!(f, "Entrypoint '{}' did not resolve to a package", entrypoint)
      }
    }
  }
}

/// Environment errors
#[derive(Debug)]
pub enum EnvironmentError {
  /// Binary not found on PATH
  ToolMissing { tool: String },
}

impl EnvironmentError {
  fn help_message(&self) -> Option<String> {
    match self {
      EnvironmentError::ToolMissing { tool } => Some(format!(
        "Install {} and make sure it is reachable via $PATH (or point [toolchain] at it in go-affected.toml).",
        tool
      )),
    }
  }
}

impl fmt::Display for EnvironmentError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EnvironmentError::ToolMissing { tool } => {
        write!(f, "{}: must be installed and accessible via $PATH", tool)
      }
    }
  }
}

/// Result type alias for go-affected
pub type AffectedResult<T> = Result<T, AffectedError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> AffectedResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> AffectedResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<AffectedError>,
{
  fn context(self, ctx: impl Into<String>) -> AffectedResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> AffectedResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &AffectedError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
