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

//! Microsoft.ServiceBus management

use super::client::ArmClient;
use super::relay::AccessKeys;
use crate::infrastructure::constants::{
    SUBSCRIPTION_LOCK_DURATION, SUBSCRIPTION_MAX_DELIVERY_COUNT, SUBSCRIPTION_MESSAGE_TTL,
    TOPIC_MAX_SIZE_MB, TOPIC_MESSAGE_TTL,
};
use crate::shared::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

const API_VERSION: &str = "2021-11-01";
const STANDARD_SKU: &str = "Standard";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicProperties {
    pub max_size_in_megabytes: u32,
    pub default_message_time_to_live: String,
}

impl Default for TopicProperties {
    fn default() -> Self {
        Self {
            max_size_in_megabytes: TOPIC_MAX_SIZE_MB,
            default_message_time_to_live: TOPIC_MESSAGE_TTL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionProperties {
    pub max_delivery_count: u32,
    pub default_message_time_to_live: String,
    pub lock_duration: String,
}

impl Default for SubscriptionProperties {
    fn default() -> Self {
        Self {
            max_delivery_count: SUBSCRIPTION_MAX_DELIVERY_COUNT,
            default_message_time_to_live: SUBSCRIPTION_MESSAGE_TTL.to_string(),
            lock_duration: SUBSCRIPTION_LOCK_DURATION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizationRule {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct AuthorizationRuleList {
    #[serde(default)]
    value: Vec<AuthorizationRule>,
}

#[derive(Debug, Clone, Deserialize)]
struct Namespace {
    #[serde(default)]
    id: String,
}

#[derive(Clone)]
pub struct ServiceBusClient {
    arm: ArmClient,
}

impl ServiceBusClient {
    pub fn new(arm: ArmClient) -> Self {
        Self { arm }
    }

    fn namespace_path(&self, resource_group: &str, namespace: &str) -> String {
        format!(
            "{}/providers/Microsoft.ServiceBus/namespaces/{}",
            self.arm.resource_group_path(resource_group),
            namespace
        )
    }

    pub async fn create_or_update_namespace(
        &self,
        resource_group: &str,
        namespace: &str,
        location: &str,
        tags: &BTreeMap<String, String>,
    ) -> Result<()> {
        let body = json!({
            "location": location,
            "sku": { "name": STANDARD_SKU, "tier": STANDARD_SKU },
            "tags": tags,
        });
        let _: Value = self
            .arm
            .put_and_wait(&self.namespace_path(resource_group, namespace), API_VERSION, &body)
            .await?;
        Ok(())
    }

    pub async fn create_or_update_topic(
        &self,
        resource_group: &str,
        namespace: &str,
        topic: &str,
        properties: &TopicProperties,
    ) -> Result<()> {
        let path = format!("{}/topics/{}", self.namespace_path(resource_group, namespace), topic);
        let _: Value = self
            .arm
            .put(&path, API_VERSION, &json!({ "properties": properties }))
            .await?;
        Ok(())
    }

    pub async fn create_or_update_subscription(
        &self,
        resource_group: &str,
        namespace: &str,
        topic: &str,
        subscription: &str,
        properties: &SubscriptionProperties,
    ) -> Result<()> {
        let path = format!(
            "{}/topics/{}/subscriptions/{}",
            self.namespace_path(resource_group, namespace),
            topic,
            subscription
        );
        let _: Value = self
            .arm
            .put(&path, API_VERSION, &json!({ "properties": properties }))
            .await?;
        Ok(())
    }

    /// Returns the namespace resource ID.
    pub async fn get_namespace_id(&self, resource_group: &str, namespace: &str) -> Result<String> {
        let namespace: Namespace = self
            .arm
            .get(&self.namespace_path(resource_group, namespace), API_VERSION)
            .await?;
        Ok(namespace.id)
    }

    pub async fn list_authorization_rules(
        &self,
        resource_group: &str,
        namespace: &str,
    ) -> Result<Vec<AuthorizationRule>> {
        let path = format!(
            "{}/authorizationRules",
            self.namespace_path(resource_group, namespace)
        );
        let rules: AuthorizationRuleList = self.arm.get(&path, API_VERSION).await?;
        Ok(rules.value)
    }

    pub async fn list_keys(
        &self,
        resource_group: &str,
        namespace: &str,
        rule: &str,
    ) -> Result<AccessKeys> {
        let path = format!(
            "{}/authorizationRules/{}/listKeys",
            self.namespace_path(resource_group, namespace),
            rule
        );
        self.arm.post(&path, API_VERSION).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_defaults() {
        let topic = serde_json::to_value(TopicProperties::default()).unwrap();
        assert_eq!(topic["maxSizeInMegabytes"], 5120);
        assert_eq!(topic["defaultMessageTimeToLive"], "P60D");

        let sub = serde_json::to_value(SubscriptionProperties::default()).unwrap();
        assert_eq!(sub["maxDeliveryCount"], 1);
        assert_eq!(sub["defaultMessageTimeToLive"], "P14D");
        assert_eq!(sub["lockDuration"], "PT30S");
    }
}
