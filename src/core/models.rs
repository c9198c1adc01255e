use crate::core::naming::NamingTemplate;
use crate::core::plugins::{Minimizer, PluginSpec};
use crate::core::rules::{FilePattern, TransformRule};
use crate::utils::{Logger, PacksmithError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Build target selecting which override set merges onto the shared base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    /// Permissive parse used at the invocation surface: anything but
    /// "production" selects the development plan.
    pub fn from_arg(arg: &str) -> Self {
        match arg {
            "production" => Mode::Production,
            "development" => Mode::Development,
            other => {
                Logger::warn(&format!(
                    "Unknown mode \"{}\", falling back to development",
                    other
                ));
                Mode::Development
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = PacksmithError;

    /// Strict parse for library callers; the CLI uses `from_arg`
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "development" => Ok(Mode::Development),
            "production" => Ok(Mode::Production),
            other => Err(PacksmithError::config(format!("Unknown mode: {}", other))),
        }
    }
}

/// Filesystem inputs to plan resolution, computed once from a project root
///
/// Paths are carried as given; existence checks belong to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSet {
    pub src: PathBuf,
    pub public: PathBuf,
    pub dist: PathBuf,
    pub static_prefix: String,
}

impl PathSet {
    pub const DEFAULT_STATIC_PREFIX: &'static str = "static";

    pub fn from_root(root: &Path) -> Self {
        Self {
            src: root.join("src"),
            public: root.join("public"),
            dist: root.join("dist"),
            static_prefix: Self::DEFAULT_STATIC_PREFIX.to_string(),
        }
    }

    /// Reject empty components and anchored static prefixes
    pub fn validate(&self) -> Result<()> {
        if self.src.as_os_str().is_empty() {
            return Err(PacksmithError::config(
                "source directory must not be empty".to_string(),
            ));
        }
        if self.public.as_os_str().is_empty() {
            return Err(PacksmithError::config(
                "public directory must not be empty".to_string(),
            ));
        }
        if self.dist.as_os_str().is_empty() {
            return Err(PacksmithError::config(
                "output directory must not be empty".to_string(),
            ));
        }
        if self.static_prefix.is_empty() {
            return Err(PacksmithError::config(
                "static prefix must not be empty".to_string(),
            ));
        }
        if self.static_prefix.starts_with('/') {
            return Err(PacksmithError::config(format!(
                "static prefix must be relative, got \"{}\"",
                self.static_prefix
            )));
        }
        Ok(())
    }
}

/// Where bundles land and how they are named
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub path: PathBuf,
    pub filename: NamingTemplate,
}

/// Module resolution extensions handed to the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveSpec {
    pub extensions: Vec<String>,
}

/// Dev-server settings carried by the development plan (settings only, the
/// server itself is an external collaborator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerSpec {
    pub content_base: PathBuf,
    pub compress: bool,
    pub port: u16,
    pub watch_content_base: bool,
    pub progress: bool,
    pub hot: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkScope {
    All,
    Async,
    Initial,
}

/// One named group of modules split into its own chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheGroup {
    pub name: String,
    pub test: FilePattern,
    pub chunks: ChunkScope,
    pub enforce: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitChunksSpec {
    pub cache_groups: BTreeMap<String, CacheGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSpec {
    pub split_chunks: SplitChunksSpec,
    pub minimizers: Vec<Minimizer>,
}

/// The resolved, mode-specific set of instructions handed to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPlan {
    pub mode: Mode,
    pub entry: BTreeMap<String, PathBuf>,
    pub output: OutputSpec,
    pub resolve: ResolveSpec,
    pub rules: Vec<TransformRule>,
    pub plugins: Vec<PluginSpec>,
    pub optimization: OptimizationSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerSpec>,
}

impl BuildPlan {
    /// Rule lookup for a module path; the last matching rule wins when
    /// patterns overlap
    #[allow(dead_code)] // Rule dispatch for engine-side consumers
    pub fn rule_for(&self, path: &Path) -> Option<&TransformRule> {
        self.rules.iter().rev().find(|rule| rule.applies_to(path))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_arg_fallback() {
        assert_eq!(Mode::from_arg("production"), Mode::Production);
        assert_eq!(Mode::from_arg("development"), Mode::Development);
        assert_eq!(Mode::from_arg("staging"), Mode::Development);
        assert_eq!(Mode::from_arg(""), Mode::Development);
    }

    #[test]
    fn test_mode_strict_parse() {
        assert_eq!("production".parse::<Mode>().unwrap(), Mode::Production);
        assert!("staging".parse::<Mode>().is_err());
    }

    #[test]
    fn test_mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(Mode::Development).unwrap(),
            serde_json::json!("development")
        );
    }

    #[test]
    fn test_pathset_from_root() {
        let paths = PathSet::from_root(Path::new("/proj"));
        assert_eq!(paths.src, PathBuf::from("/proj/src"));
        assert_eq!(paths.public, PathBuf::from("/proj/public"));
        assert_eq!(paths.dist, PathBuf::from("/proj/dist"));
        assert_eq!(paths.static_prefix, "static");
        assert!(paths.validate().is_ok());
    }

    #[test]
    fn test_pathset_rejects_empty_dist() {
        let paths = PathSet {
            src: PathBuf::from("/proj/src"),
            public: PathBuf::from("/proj/public"),
            dist: PathBuf::new(),
            static_prefix: "static".to_string(),
        };
        assert!(paths.validate().is_err());
    }

    #[test]
    fn test_pathset_rejects_anchored_prefix() {
        let mut paths = PathSet::from_root(Path::new("/proj"));
        paths.static_prefix = "/static".to_string();
        assert!(paths.validate().is_err());

        paths.static_prefix = String::new();
        assert!(paths.validate().is_err());
    }
}
