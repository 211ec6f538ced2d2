//! Settings persistence errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read only");
        let err = SettingsError::from(io_err);
        assert!(err.to_string().contains("read only"));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = SettingsError::InvalidValue {
            key: "siwoti_tone".to_string(),
            message: "unknown tone".to_string(),
        };
        assert!(err.to_string().contains("siwoti_tone"));
    }
}
