// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use thiserror::Error;
pub type Result<T> = std::result::Result<T, AzError>;

#[derive(Error, Debug)]
pub enum AzError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    MutuallyExclusiveArgument(String),

    #[error("{0}")]
    Usage(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Azure response error ({status}): {message}")]
    AzureResponse { status: u16, message: String },

    #[error("HTTP transport error: {0}")]
    Transport(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for AzError {
    fn from(err: reqwest::Error) -> Self {
        AzError::Transport(err.to_string())
    }
}

impl AzError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn mutually_exclusive(message: impl Into<String>) -> Self {
        Self::MutuallyExclusiveArgument(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::ResourceNotFound(message.into())
    }

    pub fn response(status: u16, message: impl Into<String>) -> Self {
        Self::AzureResponse {
            status,
            message: message.into(),
        }
    }

    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }

    /// Mutually exclusive arguments are a special case of an invalid argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_) | Self::MutuallyExclusiveArgument(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutually_exclusive_is_invalid_argument() {
        let err = AzError::mutually_exclusive("pick one");
        assert!(err.is_invalid_argument());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "pick one");
    }

    #[test]
    fn test_response_error_message() {
        let err = AzError::response(409, "Conflict");
        assert_eq!(err.to_string(), "Azure response error (409): Conflict");
        assert!(!err.is_invalid_argument());
    }
}
