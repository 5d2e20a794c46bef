//! Configuration file support for folderwalk.
//!
//! Loads `folderwalk.toml` from the working directory, or from the user's
//! config directory when the working directory has none.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings that may be kept in `folderwalk.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub server: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub skip_verify: Option<bool>,
    pub output_dir: Option<PathBuf>,
}

/// The config file name
pub const CONFIG_FILE_NAME: &str = "folderwalk.toml";

impl FileConfig {
    /// Load configuration from an explicit path. A missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Look for the config file in the working directory, then in the user
    /// config directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if a file exists and parses successfully
    /// - `Ok(None)` if no file exists
    /// - `Err(...)` if a file exists but fails to parse
    pub fn discover(working_dir: &Path) -> Result<Option<Self>> {
        let candidates = [
            Some(working_dir.join(CONFIG_FILE_NAME)),
            dirs::config_dir().map(|dir| dir.join("folderwalk").join(CONFIG_FILE_NAME)),
        ];

        for path in candidates.into_iter().flatten() {
            if path.exists() {
                return Self::load_from(&path).map(Some);
            }
        }
        Ok(None)
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub server: String,
    pub client_id: String,
    pub client_secret: String,
    pub skip_verify: bool,
    pub output_dir: PathBuf,
}

/// Values given on the command line or through the environment
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub server: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub skip_verify: bool,
    pub output_dir: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Merge overrides over the file config. Command-line and environment
    /// values win; every missing required value is reported at once.
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Result<Self> {
        let server = overrides.server.or(file.server);
        let client_id = overrides.client_id.or(file.client_id);
        let client_secret = overrides.client_secret.or(file.client_secret);

        let missing: Vec<&str> = [
            ("server", server.is_none()),
            ("client_id", client_id.is_none()),
            ("client_secret", client_secret.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        match (server, client_id, client_secret) {
            (Some(server), Some(client_id), Some(client_secret)) => Ok(Self {
                server,
                client_id,
                client_secret,
                skip_verify: overrides.skip_verify || file.skip_verify.unwrap_or(false),
                output_dir: overrides
                    .output_dir
                    .or(file.output_dir)
                    .unwrap_or_else(|| PathBuf::from(".")),
            }),
            _ => anyhow::bail!(
                "Missing required values: {}. Provide them as flags, environment variables, .env or {}",
                missing.join(", "),
                CONFIG_FILE_NAME
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn full_overrides() -> Overrides {
        Overrides {
            server: Some("cli.panopto.com".to_string()),
            client_id: Some("cli-id".to_string()),
            client_secret: Some("cli-secret".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_load_file_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"
server = "file.panopto.com"
client_id = "file-id"
skip_verify = true
output_dir = "exports"
"#,
        )
        .unwrap();

        let config = FileConfig::discover(dir.path()).unwrap().unwrap();
        assert_eq!(config.server.as_deref(), Some("file.panopto.com"));
        assert_eq!(config.client_secret, None);
        assert_eq!(config.skip_verify, Some(true));
        assert_eq!(config.output_dir, Some(PathBuf::from("exports")));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "server = \"a\"\npassword = \"b\"\n").unwrap();

        assert!(FileConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = FileConfig {
            server: Some("file.panopto.com".to_string()),
            client_id: Some("file-id".to_string()),
            client_secret: Some("file-secret".to_string()),
            skip_verify: Some(true),
            output_dir: Some(PathBuf::from("exports")),
        };

        let resolved = ResolvedConfig::resolve(full_overrides(), file).unwrap();
        assert_eq!(resolved.server, "cli.panopto.com");
        assert_eq!(resolved.client_secret, "cli-secret");
        assert!(resolved.skip_verify);
        assert_eq!(resolved.output_dir, PathBuf::from("exports"));
    }

    #[test]
    fn test_file_fills_gaps() {
        let overrides = Overrides {
            server: Some("cli.panopto.com".to_string()),
            ..Default::default()
        };
        let file = FileConfig {
            client_id: Some("file-id".to_string()),
            client_secret: Some("file-secret".to_string()),
            ..Default::default()
        };

        let resolved = ResolvedConfig::resolve(overrides, file).unwrap();
        assert_eq!(resolved.client_id, "file-id");
        assert!(!resolved.skip_verify);
        assert_eq!(resolved.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_missing_values_all_reported() {
        let overrides = Overrides {
            client_id: Some("cli-id".to_string()),
            ..Default::default()
        };

        let err = ResolvedConfig::resolve(overrides, FileConfig::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("server"));
        assert!(message.contains("client_secret"));
        assert!(!message.contains("client_id,"));
    }
}
