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

//! Microsoft.OperationalInsights workspace management

use super::client::ArmClient;
use crate::shared::error::Result;
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;

const API_VERSION: &str = "2020-08-01";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceProperties {
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub provisioning_state: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub properties: WorkspaceProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedKeys {
    #[serde(default)]
    pub primary_shared_key: String,
    #[serde(default)]
    pub secondary_shared_key: Option<String>,
}

#[derive(Clone)]
pub struct LogAnalyticsClient {
    arm: ArmClient,
}

impl LogAnalyticsClient {
    pub fn new(arm: ArmClient) -> Self {
        Self { arm }
    }

    fn workspace_path(&self, resource_group: &str, workspace: &str) -> String {
        format!(
            "{}/providers/Microsoft.OperationalInsights/workspaces/{}",
            self.arm.resource_group_path(resource_group),
            workspace
        )
    }

    pub async fn create_or_update_workspace(
        &self,
        resource_group: &str,
        workspace: &str,
        location: &str,
        tags: &BTreeMap<String, String>,
    ) -> Result<Workspace> {
        let body = json!({ "location": location, "tags": tags });
        self.arm
            .put_and_wait(&self.workspace_path(resource_group, workspace), API_VERSION, &body)
            .await
    }

    pub async fn get_shared_keys(&self, resource_group: &str, workspace: &str) -> Result<SharedKeys> {
        let path = format!("{}/sharedKeys", self.workspace_path(resource_group, workspace));
        self.arm.post(&path, API_VERSION).await
    }
}
