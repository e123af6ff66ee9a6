use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Serialize, Clone, PartialEq)]
#[serde(tag = "code", content = "details")]
pub enum PortfolioError {
    #[error("Network error: {reason}")]
    #[serde(rename = "NETWORK_ERROR")]
    Network { reason: String },

    #[error("Remote store error ({status}): {reason}")]
    #[serde(rename = "REMOTE_ERROR")]
    Remote { status: u16, reason: String },

    #[error("Parse error: {reason}")]
    #[serde(rename = "PARSE_ERROR")]
    Parse { reason: String },

    #[error("Configuration error: {reason}")]
    #[serde(rename = "CONFIG_ERROR")]
    Config { reason: String },

    #[error("Validation error: {reason}")]
    #[serde(rename = "VALIDATION_ERROR")]
    Validation { reason: String },

    #[error("IO error: {reason}")]
    #[serde(rename = "IO_ERROR")]
    Io { reason: String },

    #[error("Internal error: {reason}")]
    #[serde(rename = "INTERNAL_ERROR")]
    Internal { reason: String },
}

impl PortfolioError {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"code":"INTERNAL_ERROR","details":{"reason":"Failed to serialize error"}}"#
                .to_string()
        })
    }

    pub fn network(e: impl std::fmt::Display) -> Self {
        PortfolioError::Network { reason: e.to_string() }
    }

    pub fn remote(status: u16, e: impl std::fmt::Display) -> Self {
        PortfolioError::Remote { status, reason: e.to_string() }
    }

    pub fn parse(e: impl std::fmt::Display) -> Self {
        PortfolioError::Parse { reason: e.to_string() }
    }

    pub fn config(e: impl std::fmt::Display) -> Self {
        PortfolioError::Config { reason: e.to_string() }
    }

    pub fn validation(e: impl std::fmt::Display) -> Self {
        PortfolioError::Validation { reason: e.to_string() }
    }

    pub fn internal(e: impl std::fmt::Display) -> Self {
        PortfolioError::Internal { reason: e.to_string() }
    }
}

impl From<reqwest::Error> for PortfolioError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            PortfolioError::Parse { reason: e.to_string() }
        } else if let Some(status) = e.status() {
            PortfolioError::Remote { status: status.as_u16(), reason: e.to_string() }
        } else {
            PortfolioError::Network { reason: e.to_string() }
        }
    }
}

impl From<std::io::Error> for PortfolioError {
    fn from(e: std::io::Error) -> Self {
        PortfolioError::Io { reason: e.to_string() }
    }
}

impl From<serde_json::Error> for PortfolioError {
    fn from(e: serde_json::Error) -> Self {
        PortfolioError::Parse { reason: e.to_string() }
    }
}

impl From<toml::de::Error> for PortfolioError {
    fn from(e: toml::de::Error) -> Self {
        PortfolioError::Config { reason: e.to_string() }
    }
}

// Tauri requires commands to return Result<T, String>
pub type CmdResult<T> = Result<T, String>;

pub fn to_cmd_err(e: PortfolioError) -> String {
    e.to_json()
}
