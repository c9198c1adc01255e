use crate::core::models::PathSet;
use crate::core::presets;
use crate::utils::{Logger, PacksmithError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "packsmith.config.json";

/// Configuration file format (packsmith.config.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PacksmithConfig {
    /// Source directory relative to the project root (default: "src")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_dir: Option<String>,

    /// Template/public directory (default: "public")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_dir: Option<String>,

    /// Output directory (default: "dist")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist_dir: Option<String>,

    /// Static-asset subpath inside the output directory (default: "static")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<String>,

    /// Mode used when the CLI passes none (default: "development")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Dev-server port (default: 8081)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl Default for PacksmithConfig {
    fn default() -> Self {
        Self {
            src_dir: Some("src".to_string()),
            public_dir: Some("public".to_string()),
            dist_dir: Some("dist".to_string()),
            static_dir: Some(PathSet::DEFAULT_STATIC_PREFIX.to_string()),
            mode: None,
            port: Some(presets::DEV_SERVER_PORT),
        }
    }
}

/// Config loader that supports config files with CLI override
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file if it exists
    /// Searches for packsmith.config.json in the project root
    pub fn load_from_file(root: &Path) -> Result<Option<PacksmithConfig>> {
        let config_path = root.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            Logger::debug(&format!("No {} found, using defaults", CONFIG_FILE_NAME));
            return Ok(None);
        }

        Logger::debug(&format!("Loading config from {}", config_path.display()));

        let content = std::fs::read_to_string(&config_path)?;

        let config: PacksmithConfig = serde_json::from_str(&content).map_err(|e| {
            PacksmithError::config(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
        })?;

        Ok(Some(config))
    }

    /// Merge file config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(
        file_config: Option<PacksmithConfig>,
        root: &Path,
        dist: Option<&str>,
        static_dir: Option<&str>,
    ) -> PathSet {
        let base = file_config.unwrap_or_default();
        let mut paths = PathSet::from_root(root);

        if let Some(dir) = base.src_dir.as_deref() {
            paths.src = Self::resolve_dir(root, dir);
        }
        if let Some(dir) = base.public_dir.as_deref() {
            paths.public = Self::resolve_dir(root, dir);
        }
        // Output directory (CLI > config file > default)
        if let Some(dir) = dist.or(base.dist_dir.as_deref()) {
            paths.dist = Self::resolve_dir(root, dir);
        }
        if let Some(prefix) = static_dir.map(str::to_string).or(base.static_dir) {
            paths.static_prefix = prefix;
        }

        paths
    }

    fn resolve_dir(root: &Path, dir: &str) -> PathBuf {
        if Path::new(dir).is_absolute() {
            PathBuf::from(dir)
        } else {
            root.join(dir)
        }
    }

    /// Generate example config file
    pub fn generate_example() -> String {
        let example = PacksmithConfig::default();
        serde_json::to_string_pretty(&example).unwrap_or_else(|_| {
            r#"{
  "srcDir": "src",
  "publicDir": "public",
  "distDir": "dist",
  "staticDir": "static",
  "port": 8081
}"#
            .to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_file_not_exists() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = ConfigLoader::load_from_file(temp_dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_from_file_valid() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, r#"{"distDir": "build", "port": 9000}"#).unwrap();

        let config = ConfigLoader::load_from_file(temp_dir.path())
            .unwrap()
            .unwrap();
        assert_eq!(config.dist_dir, Some("build".to_string()));
        assert_eq!(config.port, Some(9000));
        assert!(config.src_dir.is_none());
    }

    #[test]
    fn test_load_from_file_malformed() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "{not json").unwrap();

        let err = ConfigLoader::load_from_file(temp_dir.path()).unwrap_err();
        assert!(matches!(err, PacksmithError::Config(_)));
    }

    #[test]
    fn test_merge_with_cli_override() {
        let file_config = PacksmithConfig {
            dist_dir: Some("build".to_string()),
            static_dir: Some("assets".to_string()),
            ..Default::default()
        };

        let paths = ConfigLoader::merge_with_cli(
            Some(file_config),
            Path::new("/proj"),
            Some("dist-override"),
            None,
        );

        assert_eq!(paths.dist, PathBuf::from("/proj/dist-override")); // CLI wins
        assert_eq!(paths.static_prefix, "assets"); // file config wins
        assert_eq!(paths.src, PathBuf::from("/proj/src"));
    }

    #[test]
    fn test_merge_with_cli_defaults() {
        let paths = ConfigLoader::merge_with_cli(None, Path::new("/proj"), None, None);
        assert_eq!(paths, PathSet::from_root(Path::new("/proj")));
    }

    #[test]
    fn test_merge_with_cli_absolute_dir() {
        let paths = ConfigLoader::merge_with_cli(None, Path::new("/proj"), Some("/tmp/out"), None);
        assert_eq!(paths.dist, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_generate_example() {
        let example = ConfigLoader::generate_example();
        assert!(example.contains("distDir"));
        assert!(example.contains("staticDir"));
    }
}
