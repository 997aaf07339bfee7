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

//! Microsoft.Relay management

use super::client::ArmClient;
use crate::shared::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

const API_VERSION: &str = "2017-04-01";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessRight {
    Manage,
    Send,
    Listen,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKeys {
    #[serde(default)]
    pub primary_connection_string: String,
    #[serde(default)]
    pub secondary_connection_string: Option<String>,
    #[serde(default)]
    pub key_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ResourceId {
    #[serde(default)]
    id: String,
}

#[derive(Clone)]
pub struct RelayClient {
    arm: ArmClient,
}

impl RelayClient {
    pub fn new(arm: ArmClient) -> Self {
        Self { arm }
    }

    fn namespace_path(&self, resource_group: &str, namespace: &str) -> String {
        format!(
            "{}/providers/Microsoft.Relay/namespaces/{}",
            self.arm.resource_group_path(resource_group),
            namespace
        )
    }

    fn hybrid_connection_path(&self, resource_group: &str, namespace: &str, name: &str) -> String {
        format!(
            "{}/hybridConnections/{}",
            self.namespace_path(resource_group, namespace),
            name
        )
    }

    pub async fn create_or_update_namespace(
        &self,
        resource_group: &str,
        namespace: &str,
        location: &str,
        tags: &BTreeMap<String, String>,
    ) -> Result<()> {
        let body = json!({ "location": location, "tags": tags });
        let _: Value = self
            .arm
            .put_and_wait(&self.namespace_path(resource_group, namespace), API_VERSION, &body)
            .await?;
        Ok(())
    }

    /// Returns the hybrid connection resource ID.
    pub async fn create_or_update_hybrid_connection(
        &self,
        resource_group: &str,
        namespace: &str,
        name: &str,
    ) -> Result<String> {
        let body = json!({ "properties": { "requiresClientAuthorization": true } });
        let created: ResourceId = self
            .arm
            .put(
                &self.hybrid_connection_path(resource_group, namespace, name),
                API_VERSION,
                &body,
            )
            .await?;
        Ok(created.id)
    }

    pub async fn create_or_update_authorization_rule(
        &self,
        resource_group: &str,
        namespace: &str,
        hybrid_connection: &str,
        rule: &str,
        rights: &[AccessRight],
    ) -> Result<()> {
        let path = format!(
            "{}/authorizationRules/{}",
            self.hybrid_connection_path(resource_group, namespace, hybrid_connection),
            rule
        );
        let body = json!({ "properties": { "rights": rights } });
        let _: Value = self.arm.put(&path, API_VERSION, &body).await?;
        Ok(())
    }

    pub async fn list_keys(
        &self,
        resource_group: &str,
        namespace: &str,
        hybrid_connection: &str,
        rule: &str,
    ) -> Result<AccessKeys> {
        let path = format!(
            "{}/authorizationRules/{}/listKeys",
            self.hybrid_connection_path(resource_group, namespace, hybrid_connection),
            rule
        );
        self.arm.post(&path, API_VERSION).await
    }
}
