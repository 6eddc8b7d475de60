// ABOUTME: Configuration for the hostkey CLI.
// ABOUTME: Loaded from TOML with defaults for every key; command-line flags win.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Registry key the legacy client stores host keys under.
pub const DEFAULT_REGISTRY_SECTION: &str =
    r"HKEY_CURRENT_USER\Software\SimonTatham\PuTTY\SshHostKeys";

/// How legacy records are written out.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LegacyFormat {
    /// One `key=value` per line.
    #[default]
    Plain,
    /// A registry editor export that can be imported directly.
    Reg,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Stop at the first record that fails to convert.
    #[serde(default)]
    pub strict: bool,

    #[serde(default)]
    pub legacy_format: LegacyFormat,

    /// Section header written in `reg` output.
    #[serde(default = "default_registry_section")]
    pub registry_section: String,
}

fn default_registry_section() -> String {
    DEFAULT_REGISTRY_SECTION.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict: false,
            legacy_format: LegacyFormat::default(),
            registry_section: default_registry_section(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Load config if the file exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save config to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Get the default config file path (~/.config/hostkey/config.toml)
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .context("Could not determine home directory")
            })?
            .join("hostkey");
        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            strict = true
            legacy_format = "reg"
            registry_section = 'HKEY_CURRENT_USER\Software\Other\SshHostKeys'
        "#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(config.strict);
        assert_eq!(config.legacy_format, LegacyFormat::Reg);
        assert_eq!(
            config.registry_section,
            r"HKEY_CURRENT_USER\Software\Other\SshHostKeys"
        );
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "strict = true").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(config.strict);
        assert_eq!(config.legacy_format, LegacyFormat::Plain);
        assert_eq!(config.registry_section, DEFAULT_REGISTRY_SECTION);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            strict: true,
            legacy_format: LegacyFormat::Reg,
            registry_section: "HKEY_CURRENT_USER\\Test".to_string(),
        };

        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"legacy_format = "xml""#).unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_default_path_ends_with_config_toml() {
        let path = Config::default_path().unwrap();
        assert!(path.ends_with("hostkey/config.toml"));
    }
}
