use thiserror::Error;

/// Main error type for langinfluence
#[derive(Error, Debug)]
pub enum InfluenceError {
    /// Transport-level HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Page could not be retrieved (non-success status, unreadable body)
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Locator could not be turned into a page URL
    #[error("Invalid locator: {0}")]
    InvalidLocator(String),

    /// Document or selector parse errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (report output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type using InfluenceError
pub type Result<T> = std::result::Result<T, InfluenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InfluenceError::Fetch("status 404 for /wiki/Nope".to_string());
        assert!(err.to_string().contains("Fetch error"));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_error_invalid_locator_display() {
        let err = InfluenceError::InvalidLocator("::".to_string());
        assert_eq!(err.to_string(), "Invalid locator: ::");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: InfluenceError = io_err.into();
        assert!(matches!(err, InfluenceError::Io(_)));
    }
}
