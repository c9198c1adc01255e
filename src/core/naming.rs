use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

// Pre-compiled token pattern shared by all templates
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(name|hash|contenthash|ext|file|path|query)\]").unwrap()
});

/// Length of the digest embedded in output filenames
const HASH_LEN: usize = 8;

/// Output filename template with substitution tokens
///
/// Tokens like `[name]` and `[hash]` are part of the plan vocabulary and are
/// substituted by the consuming engine (or by `render` for callers that
/// already know the content).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamingTemplate(String);

impl NamingTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Distinct tokens present, in order of first appearance
    pub fn tokens(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for captures in TOKEN_REGEX.captures_iter(&self.0) {
            if let Some(token) = captures.get(1) {
                if !seen.contains(&token.as_str()) {
                    seen.push(token.as_str());
                }
            }
        }
        seen
    }

    /// Whether the template cache-busts via a content digest
    pub fn has_hash_token(&self) -> bool {
        self.tokens()
            .iter()
            .any(|token| matches!(*token, "hash" | "contenthash"))
    }

    /// Substitute name and digest tokens
    pub fn render(&self, name: &str, hash: &str) -> String {
        self.0
            .replace("[name]", name)
            .replace("[hash]", hash)
            .replace("[contenthash]", hash)
    }

    /// Substitute tokens, deriving the digest from the file contents
    #[allow(dead_code)] // Rendering helper for engine-side consumers
    pub fn render_with_content(&self, name: &str, content: &[u8]) -> String {
        self.render(name, &content_hash(content))
    }
}

impl fmt::Display for NamingTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NamingTemplate {
    fn from(template: &str) -> Self {
        Self(template.to_string())
    }
}

/// Digest of file contents embedded in output filenames for cache invalidation
pub fn content_hash(content: &[u8]) -> String {
    let hex = blake3::hash(content).to_hex();
    hex.as_str()[..HASH_LEN].to_string()
}
