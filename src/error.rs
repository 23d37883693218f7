use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Unexpected,
    Generic,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("network error (status: {status:?}, description: {status_text:?})")]
    Network {
        status: Option<u16>,
        status_text: Option<String>,
    },
    #[error("unexpected failure: {0}")]
    Unexpected(String),
    #[error("{0}")]
    Generic(String),
    #[error("storage error: {0}")]
    Storage(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        AppError::Network {
            status: Some(status.as_u16()),
            status_text: status.canonical_reason().map(str::to_string),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Network { .. } => ErrorKind::Network,
            AppError::Unexpected(_) => ErrorKind::Unexpected,
            AppError::Generic(_) | AppError::Storage(_) => ErrorKind::Generic,
        }
    }

    /// Text shown in the error region.
    pub fn message(&self) -> String {
        match self {
            AppError::Network {
                status,
                status_text,
            } => {
                let mut parts = vec!["Network Error.".to_string()];
                if let Some(status) = status {
                    parts.push(format!("Status: {status}"));
                }
                if let Some(text) = status_text.as_deref().filter(|t| !t.is_empty()) {
                    parts.push(format!("Description: {text}"));
                }
                parts.join(" ")
            }
            AppError::Unexpected(_) => "Web failure. This should not have happened!".to_string(),
            AppError::Generic(msg) | AppError::Storage(msg) => {
                if msg.is_empty() {
                    "Error!".to_string()
                } else {
                    msg.clone()
                }
            }
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return AppError::Generic(e.to_string());
        }
        AppError::Network {
            status: e.status().map(|s| s.as_u16()),
            status_text: e
                .status()
                .and_then(|s| s.canonical_reason())
                .map(str::to_string),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Generic(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_message_with_status() {
        let err = AppError::from_status(reqwest::StatusCode::NOT_FOUND);
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.message(), "Network Error. Status: 404 Description: Not Found");
    }

    #[test]
    fn test_network_message_without_status() {
        let err = AppError::Network {
            status: None,
            status_text: None,
        };
        assert_eq!(err.message(), "Network Error.");
    }

    #[test]
    fn test_unexpected_uses_fixed_template() {
        let err = AppError::Unexpected("boom".to_string());
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert_eq!(err.message(), "Web failure. This should not have happened!");
    }

    #[test]
    fn test_generic_falls_back_when_empty() {
        assert_eq!(AppError::Generic(String::new()).message(), "Error!");
        assert_eq!(
            AppError::Generic("Sorry, no results".to_string()).message(),
            "Sorry, no results"
        );
        assert_eq!(AppError::Storage("disk".into()).kind(), ErrorKind::Generic);
    }
}
