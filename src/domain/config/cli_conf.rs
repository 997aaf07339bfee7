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

use crate::infrastructure::constants::{
    DEFAULT_ARM_ENDPOINT, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_POLL_MAX_ATTEMPTS,
};
use crate::shared::error::{AzError, Result};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::time::Duration;

pub const CONFIG_FILE_ENV: &str = "AZEXT_CONFIG_FILE";
pub const SUBSCRIPTION_ENV: &str = "AZURE_SUBSCRIPTION_ID";
pub const ACCESS_TOKEN_ENV: &str = "AZURE_ACCESS_TOKEN";

/// CLI configuration, normally read from `azext.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CliConf {
    pub subscription_id: Option<String>,
    pub arm_endpoint: String,
    pub access_token: Option<String>,
    pub poll_interval_secs: u64,
    /// Upper bound on status GETs per long-running operation.
    pub poll_max_attempts: usize,
}

impl Default for CliConf {
    fn default() -> Self {
        Self {
            subscription_id: None,
            arm_endpoint: DEFAULT_ARM_ENDPOINT.to_string(),
            access_token: None,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            poll_max_attempts: DEFAULT_POLL_MAX_ATTEMPTS,
        }
    }
}

impl CliConf {
    pub fn from<T: AsRef<str>>(path: T) -> Result<Self> {
        let content = read_to_string(path.as_ref()).map_err(|e| {
            AzError::config_error(format!(
                "Failed to read config file {}: {}",
                path.as_ref(),
                e
            ))
        })?;

        let conf: Self = toml::from_str(&content)?;
        Ok(conf)
    }

    /// Resolve the configuration: config file > defaults, then environment, then flags.
    pub fn load(config_file: Option<&str>, subscription: Option<&str>) -> Result<Self> {
        let mut conf = if let Some(path) = config_file {
            Self::from(path)?
        } else if let Ok(env_path) = std::env::var(CONFIG_FILE_ENV) {
            Self::from(env_path)?
        } else {
            Self::default()
        };

        if let Ok(sub) = std::env::var(SUBSCRIPTION_ENV) {
            conf.subscription_id = Some(sub);
        }
        if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
            conf.access_token = Some(token);
        }
        if let Some(sub) = subscription {
            conf.subscription_id = Some(sub.to_string());
        }

        Ok(conf)
    }

    pub fn subscription_id(&self) -> Result<&str> {
        self.subscription_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AzError::config_error(format!(
                    "subscription is required (use --subscription, set {} or subscription_id in the config file)",
                    SUBSCRIPTION_ENV
                ))
            })
    }

    pub fn access_token(&self) -> Result<&str> {
        self.access_token
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AzError::config_error(format!(
                    "access token is required (set {} or access_token in the config file)",
                    ACCESS_TOKEN_ENV
                ))
            })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let conf = CliConf::default();
        assert_eq!(conf.arm_endpoint, "https://management.azure.com");
        assert_eq!(conf.poll_interval(), Duration::from_secs(15));
        assert!(conf.subscription_id().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "subscription_id = \"00000000-0000-0000-0000-000000000000\"\npoll_interval_secs = 5"
        )
        .unwrap();

        let conf = CliConf::from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            conf.subscription_id().unwrap(),
            "00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(conf.poll_interval_secs, 5);
        assert_eq!(conf.poll_max_attempts, 240);
        assert_eq!(conf.arm_endpoint, "https://management.azure.com");
    }
}
