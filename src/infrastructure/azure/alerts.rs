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

//! Microsoft.AlertsManagement client and its per-resource operation groups.

use super::client::ArmClient;
use crate::domain::alerts::AlertProcessingRule;
use crate::shared::error::{AzError, Result};
use regex::Regex;
use serde_json::Value;

const PROVIDER: &str = "Microsoft.AlertsManagement";
const ACTION_RULES_API_VERSION: &str = "2021-08-08";
const ALERTS_API_VERSION: &str = "2019-05-05-preview";

/// Build the Alerts Management client for the configured subscription.
pub fn alerts_management_client(arm: &ArmClient) -> AlertsManagementClient {
    AlertsManagementClient { arm: arm.clone() }
}

#[derive(Clone)]
pub struct AlertsManagementClient {
    arm: ArmClient,
}

impl AlertsManagementClient {
    pub fn alert_processing_rules(&self) -> AlertProcessingRules {
        AlertProcessingRules {
            arm: self.arm.clone(),
        }
    }

    pub fn alerts(&self) -> Alerts {
        Alerts {
            arm: self.arm.clone(),
        }
    }

    pub fn smart_groups(&self) -> SmartGroups {
        SmartGroups {
            arm: self.arm.clone(),
        }
    }
}

pub struct AlertProcessingRules {
    arm: ArmClient,
}

impl AlertProcessingRules {
    fn path(&self, resource_group: &str, name: &str) -> String {
        format!(
            "{}/providers/{}/actionRules/{}",
            self.arm.resource_group_path(resource_group),
            PROVIDER,
            name
        )
    }

    pub async fn create_or_update(
        &self,
        resource_group: &str,
        name: &str,
        rule: &AlertProcessingRule,
    ) -> Result<AlertProcessingRule> {
        self.arm
            .put(&self.path(resource_group, name), ACTION_RULES_API_VERSION, rule)
            .await
    }

    pub async fn get(&self, resource_group: &str, name: &str) -> Result<AlertProcessingRule> {
        self.arm
            .get(&self.path(resource_group, name), ACTION_RULES_API_VERSION)
            .await
    }

    pub async fn delete(&self, resource_group: &str, name: &str) -> Result<()> {
        self.arm
            .delete(&self.path(resource_group, name), ACTION_RULES_API_VERSION)
            .await
    }
}

pub struct Alerts {
    arm: ArmClient,
}

impl Alerts {
    /// `alert_id` may be the bare alert GUID or its full resource ID.
    pub async fn get_by_id(&self, alert_id: &str) -> Result<Value> {
        let id = trailing_id("alerts", alert_id)?;
        let path = format!("{}/providers/{}/alerts/{}", self.arm.subscription_path(), PROVIDER, id);
        self.arm.get(&path, ALERTS_API_VERSION).await
    }
}

pub struct SmartGroups {
    arm: ArmClient,
}

impl SmartGroups {
    pub async fn get_by_id(&self, smart_group_id: &str) -> Result<Value> {
        let id = trailing_id("smartGroups", smart_group_id)?;
        let path = format!(
            "{}/providers/{}/smartGroups/{}",
            self.arm.subscription_path(),
            PROVIDER,
            id
        );
        self.arm.get(&path, ALERTS_API_VERSION).await
    }
}

/// Last path segment after `/{collection}/` in a resource ID, or the input itself.
fn trailing_id(collection: &str, input: &str) -> Result<String> {
    let pattern = format!(r"(?i)/{}/([^/]+)/?$", regex::escape(collection));
    let re = Regex::new(&pattern).map_err(|e| AzError::invalid_argument(e.to_string()))?;

    let id = match re.captures(input).and_then(|caps| caps.get(1)) {
        Some(m) => m.as_str(),
        None => input.trim_matches('/'),
    };
    if id.is_empty() || id.contains('/') {
        return Err(AzError::invalid_argument(format!(
            "'{}' is not a valid {} identifier",
            input, collection
        )));
    }
    Ok(id.to_string())
}
