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

use super::client::ArmClient;
use crate::domain::extension::cluster::ClusterRef;
use crate::domain::extension::manifest::{Extension, PatchExtension};
use crate::shared::error::Result;
use async_trait::async_trait;
use serde_json::Value;

const API_VERSION: &str = "2022-11-01";

/// Microsoft.KubernetesConfiguration extension operations.
#[async_trait]
pub trait ExtensionClient: Send + Sync {
    async fn create(&self, cluster: &ClusterRef, name: &str, extension: &Extension) -> Result<Value>;

    async fn update(&self, cluster: &ClusterRef, name: &str, patch: &PatchExtension) -> Result<Value>;

    async fn delete(&self, cluster: &ClusterRef, name: &str) -> Result<()>;
}

pub struct ArmExtensionClient {
    arm: ArmClient,
}

impl ArmExtensionClient {
    pub fn new(arm: ArmClient) -> Self {
        Self { arm }
    }
}

pub fn extension_path(cluster: &ClusterRef, name: &str) -> String {
    format!(
        "{}/providers/Microsoft.KubernetesConfiguration/extensions/{}",
        cluster.resource_id(),
        name
    )
}

#[async_trait]
impl ExtensionClient for ArmExtensionClient {
    async fn create(&self, cluster: &ClusterRef, name: &str, extension: &Extension) -> Result<Value> {
        self.arm
            .put_and_wait(&extension_path(cluster, name), API_VERSION, extension)
            .await
    }

    async fn update(&self, cluster: &ClusterRef, name: &str, patch: &PatchExtension) -> Result<Value> {
        self.arm
            .patch_and_wait(&extension_path(cluster, name), API_VERSION, patch)
            .await
    }

    async fn delete(&self, cluster: &ClusterRef, name: &str) -> Result<()> {
        self.arm
            .delete_and_wait(&extension_path(cluster, name), API_VERSION)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::extension::cluster::ClusterType;

    #[test]
    fn test_extension_path() {
        let cluster = ClusterRef::new("sub", "rg", ClusterType::ConnectedClusters, "arc");
        assert_eq!(
            extension_path(&cluster, "azureml"),
            "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Kubernetes/connectedClusters/arc/providers/Microsoft.KubernetesConfiguration/extensions/azureml"
        );
    }
}
