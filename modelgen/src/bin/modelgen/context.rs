use anyhow::{Context, Result};
use modelgen::{PrimaryKeyPolicy, Target, UnsupportedPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "modelgen.toml";

/// Project context for modelgen operations
pub struct ProjectContext {
    /// Directory holding `modelgen.toml`, or the working directory when there is none
    pub project_root: PathBuf,
    /// Path to the config file, whether or not it exists
    pub config_path: PathBuf,
    /// Loaded configuration, defaults when no file was found
    pub config: ModelgenConfig,
}

/// Configuration stored in modelgen.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelgenConfig {
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub config: ConfigSettings,
    #[serde(default)]
    pub sql: SqlSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub target: Target,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSettings {
    #[serde(default = "default_config_input")]
    pub input: String,
    /// Defaults to a per-target location when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default = "default_struct_name")]
    pub struct_name: String,
    #[serde(default = "default_config_package")]
    pub package: String,
    #[serde(default)]
    pub skip_unsupported: bool,
}

impl Default for ConfigSettings {
    fn default() -> Self {
        Self {
            input: default_config_input(),
            output: None,
            struct_name: default_struct_name(),
            package: default_config_package(),
            skip_unsupported: false,
        }
    }
}

impl ConfigSettings {
    pub fn output_for(&self, target: Target) -> String {
        self.output.clone().unwrap_or_else(|| match target {
            Target::Go => "internal/config/config.go".to_string(),
            Target::Rust => "src/config.rs".to_string(),
        })
    }

    pub fn unsupported_policy(&self) -> UnsupportedPolicy {
        if self.skip_unsupported {
            UnsupportedPolicy::Skip
        } else {
            UnsupportedPolicy::Error
        }
    }
}

fn default_config_input() -> String {
    "config.json".to_string()
}

fn default_struct_name() -> String {
    "Config".to_string()
}

fn default_config_package() -> String {
    "config".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlSettings {
    #[serde(default = "default_sql_input_dir")]
    pub input_dir: String,
    /// Defaults to a per-target location when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
    #[serde(default = "default_sql_package")]
    pub package: String,
    #[serde(default)]
    pub all_primary_keys: bool,
}

impl Default for SqlSettings {
    fn default() -> Self {
        Self {
            input_dir: default_sql_input_dir(),
            output_dir: None,
            package: default_sql_package(),
            all_primary_keys: false,
        }
    }
}

impl SqlSettings {
    pub fn output_dir_for(&self, target: Target) -> String {
        self.output_dir.clone().unwrap_or_else(|| match target {
            Target::Go => "internal/model".to_string(),
            Target::Rust => "src/model".to_string(),
        })
    }

    pub fn primary_key_policy(&self) -> PrimaryKeyPolicy {
        if self.all_primary_keys {
            PrimaryKeyPolicy::AllColumns
        } else {
            PrimaryKeyPolicy::FirstMatch
        }
    }
}

fn default_sql_input_dir() -> String {
    "database".to_string()
}

fn default_sql_package() -> String {
    "model".to_string()
}

impl ProjectContext {
    /// Find and load project context from current directory or ancestors
    pub fn find() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Self::find_from(&current_dir)
    }

    /// Find project context starting from the given directory.
    ///
    /// Without a `modelgen.toml` anywhere above `start`, `start` itself becomes
    /// the project root and every setting takes its default.
    pub fn find_from(start: &Path) -> Result<Self> {
        match Self::find_config_dir(start) {
            Some(root) => Self::from_root(root),
            None => Ok(Self {
                project_root: start.to_path_buf(),
                config_path: start.join(CONFIG_FILE),
                config: ModelgenConfig::default(),
            }),
        }
    }

    /// Create context from a directory holding `modelgen.toml`
    pub fn from_root(project_root: PathBuf) -> Result<Self> {
        let config_path = project_root.join(CONFIG_FILE);
        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: ModelgenConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Self {
            project_root,
            config_path,
            config,
        })
    }

    fn find_config_dir(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .find(|dir| dir.join(CONFIG_FILE).is_file())
            .map(Path::to_path_buf)
    }

    pub fn has_config_file(&self) -> bool {
        self.config_path.is_file()
    }

    /// Resolve a configured path against the project root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.project_root.join(path)
    }

    /// Target from the command line, falling back to the config file.
    pub fn target(&self, flag: Option<Target>) -> Target {
        flag.unwrap_or(self.config.output.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ModelgenConfig::default();
        assert_eq!(config.output.target, Target::Go);
        assert_eq!(config.config.input, "config.json");
        assert_eq!(config.config.output_for(Target::Go), "internal/config/config.go");
        assert_eq!(config.config.output_for(Target::Rust), "src/config.rs");
        assert_eq!(config.sql.input_dir, "database");
        assert_eq!(config.sql.output_dir_for(Target::Go), "internal/model");
        assert_eq!(config.sql.primary_key_policy(), PrimaryKeyPolicy::FirstMatch);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ModelgenConfig = toml::from_str(
            "[output]\ntarget = \"rust\"\n\n[sql]\nall_primary_keys = true\noutput_dir = \"gen\"\n",
        )
        .unwrap();
        assert_eq!(config.output.target, Target::Rust);
        assert_eq!(config.sql.input_dir, "database");
        assert_eq!(config.sql.output_dir_for(Target::Rust), "gen");
        assert_eq!(config.sql.primary_key_policy(), PrimaryKeyPolicy::AllColumns);
        assert_eq!(config.config.struct_name, "Config");
    }

    #[test]
    fn test_find_walks_up_to_config_file() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE), "[config]\nstruct_name = \"Settings\"\n").unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = ProjectContext::find_from(&nested).unwrap();
        assert_eq!(ctx.project_root, temp.path());
        assert!(ctx.has_config_file());
        assert_eq!(ctx.config.config.struct_name, "Settings");
        assert_eq!(ctx.resolve("database"), temp.path().join("database"));
    }

    #[test]
    fn test_missing_config_uses_start_dir() {
        let temp = tempfile::tempdir().unwrap();
        let ctx = ProjectContext::find_from(temp.path()).unwrap();
        assert_eq!(ctx.project_root, temp.path());
        assert!(!ctx.has_config_file());
        assert_eq!(ctx.target(None), Target::Go);
        assert_eq!(ctx.target(Some(Target::Rust)), Target::Rust);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE), "[output]\ntarget = \"cobol\"\n").unwrap();
        assert!(ProjectContext::find_from(temp.path()).is_err());
    }
}
