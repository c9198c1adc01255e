use thiserror::Error;

#[derive(Error, Debug)]
pub enum PacksmithError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Plan serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl PacksmithError {
    /// Create a configuration error
    pub fn config(message: String) -> Self {
        Self::Config(message)
    }
}

pub type Result<T> = std::result::Result<T, PacksmithError>;

impl From<anyhow::Error> for PacksmithError {
    fn from(err: anyhow::Error) -> Self {
        PacksmithError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = PacksmithError::config("unknown mode: staging".to_string());
        assert_eq!(err.to_string(), "Configuration error: unknown mode: staging");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PacksmithError = io.into();
        assert!(matches!(err, PacksmithError::Io(_)));
    }
}
