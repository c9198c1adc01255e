use crate::core::naming::NamingTemplate;
use crate::core::rules::FilePattern;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Copy-plugin source/destination pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyPattern {
    pub from: PathBuf,
    pub to: String,
}

/// Post-processing plugin selection, one variant per plugin kind
///
/// Option shapes are typed per variant so a plan cannot carry an invalid
/// option combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PluginSpec {
    FriendlyErrors,
    Progress,
    CssExtract {
        filename: NamingTemplate,
    },
    Html {
        template: PathBuf,
        filename: String,
        hash: bool,
    },
    Copy {
        patterns: Vec<CopyPattern>,
    },
    SourceMap {
        filename: NamingTemplate,
    },
    BundleAnalyzer,
    Compression {
        test: FilePattern,
        filename: NamingTemplate,
        threshold: u64,
    },
}

impl PluginSpec {
    /// Stable identifier used in summaries and logs
    pub fn kind(&self) -> &'static str {
        match self {
            PluginSpec::FriendlyErrors => "friendly-errors",
            PluginSpec::Progress => "progress",
            PluginSpec::CssExtract { .. } => "css-extract",
            PluginSpec::Html { .. } => "html",
            PluginSpec::Copy { .. } => "copy",
            PluginSpec::SourceMap { .. } => "source-map",
            PluginSpec::BundleAnalyzer => "bundle-analyzer",
            PluginSpec::Compression { .. } => "compression",
        }
    }
}

/// Minification step run by the engine in production
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Minimizer {
    CssOptimizer,
    Terser,
}
