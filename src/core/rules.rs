use crate::core::naming::NamingTemplate;
use crate::utils::{PacksmithError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File-match pattern over module paths
///
/// Serialized as its regex source and recompiled on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FilePattern {
    source: String,
    regex: Regex,
}

impl FilePattern {
    pub fn new(source: &str) -> Result<Self> {
        let regex = Regex::new(source)?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    #[allow(dead_code)] // Plan inspection helper
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, path: &Path) -> bool {
        self.regex.is_match(&path.to_string_lossy())
    }
}

// Patterns compare by source, not by compiled automaton
impl PartialEq for FilePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for FilePattern {}

impl TryFrom<String> for FilePattern {
    type Error = PacksmithError;

    fn try_from(source: String) -> Result<Self> {
        FilePattern::new(&source)
    }
}

impl From<FilePattern> for String {
    fn from(pattern: FilePattern) -> String {
        pattern.source
    }
}

/// One processing step in a transform pipeline, with its typed options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "loader", rename_all = "kebab-case")]
pub enum LoaderStep {
    Babel {
        presets: Vec<String>,
        plugins: Vec<String>,
    },
    Style,
    Css {
        modules: bool,
        #[serde(rename = "sourceMap")]
        source_map: bool,
    },
    PostCss,
    Sass {
        #[serde(rename = "sourceMap")]
        source_map: bool,
    },
    CssExtract,
    File {
        name: NamingTemplate,
    },
}

/// A file-pattern-to-processing-pipeline mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformRule {
    pub test: FilePattern,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<FilePattern>,
    pub steps: Vec<LoaderStep>,
}

impl TransformRule {
    pub fn new(test: FilePattern, steps: Vec<LoaderStep>) -> Self {
        Self {
            test,
            exclude: None,
            steps,
        }
    }

    pub fn with_exclude(mut self, exclude: FilePattern) -> Self {
        self.exclude = Some(exclude);
        self
    }

    /// Whether this rule's pipeline applies to the given module path
    pub fn applies_to(&self, path: &Path) -> bool {
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(path) {
                return false;
            }
        }
        self.test.is_match(path)
    }
}
