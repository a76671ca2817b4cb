use crate::core::error::{AffectedError, AffectedResult, ConfigError, ResultExt};
use crate::graph::NamespaceFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for go-affected
/// Searched in order: go-affected.toml, .go-affected.toml, .config/go-affected.toml
///
/// Every field is optional; command-line flags take precedence.
///
/// # Example
///
/// ```toml
/// [defaults]
/// head = "main"
/// entrypoints = ["cmd/server/main.go", "cmd/worker"]
/// go_test_flags = "-race -count=1"
///
/// [traversal]
/// namespace = "prefix"
///
/// [toolchain]
/// go = "/usr/local/go/bin/go"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AffectedConfig {
  #[serde(default)]
  pub defaults: DefaultsConfig,
  #[serde(default)]
  pub traversal: TraversalConfig,
  #[serde(default)]
  pub toolchain: ToolchainConfig,
}

/// Fallback values for the command-line flags
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
  /// Base branch to compare against
  #[serde(default)]
  pub head: Option<String>,

  /// Entrypoint files or package paths
  #[serde(default)]
  pub entrypoints: Vec<String>,

  /// Flags passed through to `go test`
  #[serde(default)]
  pub go_test_flags: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraversalConfig {
  /// How an import is judged to belong to the entrypoint's module
  #[serde(default)]
  pub namespace: Option<String>,
}

impl TraversalConfig {
  /// Parse the configured namespace filter, if any
  pub fn namespace_filter(&self) -> AffectedResult<Option<NamespaceFilter>> {
    self.namespace.as_deref().map(parse_namespace_filter).transpose()
  }
}

/// External binaries used by the run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
  #[serde(default = "default_go")]
  pub go: String,
  #[serde(default = "default_git")]
  pub git: String,
}

fn default_go() -> String {
  "go".to_string()
}

fn default_git() -> String {
  "git".to_string()
}

impl Default for ToolchainConfig {
  fn default() -> Self {
    Self {
      go: default_go(),
      git: default_git(),
    }
  }
}

/// Parse a namespace filter name (`contains` or `prefix`)
pub fn parse_namespace_filter(value: &str) -> AffectedResult<NamespaceFilter> {
  match value.to_lowercase().as_str() {
    "contains" | "substring" => Ok(NamespaceFilter::Contains),
    "prefix" => Ok(NamespaceFilter::Prefix),
    _ => Err(AffectedError::Config(ConfigError::InvalidValue {
      field: "traversal.namespace".to_string(),
      value: value.to_string(),
      expected: "contains, prefix".to_string(),
    })),
  }
}

impl AffectedConfig {
  /// Find config file in search order: go-affected.toml, .go-affected.toml, .config/go-affected.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [
      path.join("go-affected.toml"),
      path.join(".go-affected.toml"),
      path.join(".config").join("go-affected.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from an explicit path, or discover it under `root`.
  ///
  /// A missing discovered config is not an error (defaults apply); a missing
  /// explicit config is.
  pub fn load(root: &Path, explicit: Option<&Path>) -> AffectedResult<Self> {
    let config_path = match explicit {
      Some(path) => {
        if !path.exists() {
          return Err(AffectedError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
          }));
        }
        path.to_path_buf()
      }
      None => match Self::find_config_path(root) {
        Some(path) => path,
        None => return Ok(Self::default()),
      },
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    Self::parse(&content).with_context(|| format!("Failed to parse config from {}", config_path.display()))
  }

  /// Parse and validate config text
  pub fn parse(content: &str) -> AffectedResult<Self> {
    let config: AffectedConfig = toml_edit::de::from_str(content)?;
    config.traversal.namespace_filter()?;
    Ok(config)
  }
}
