use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl AppError {
    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "bad_request",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::InternalError(_) => "internal",
            AppError::ConfigError(_) => "config",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_map_to_invalid_input() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app_err = AppError::from(err);
        assert_eq!(app_err.kind(), "invalid_input");
        assert!(app_err.to_string().starts_with("Invalid input:"));
    }

    #[test]
    fn io_errors_map_to_internal() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing draft");
        let app_err = AppError::from(err);
        assert_eq!(app_err.kind(), "internal");
        assert!(app_err.to_string().contains("missing draft"));
    }
}
