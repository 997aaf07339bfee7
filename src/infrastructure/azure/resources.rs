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
use crate::shared::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Generic lookup of an ARM resource by its full ID.
#[async_trait]
pub trait ResourceLookup: Send + Sync {
    /// Lowercased location of the resource.
    async fn get_location(&self, resource_id: &str, api_version: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct GenericResource {
    #[serde(default)]
    location: String,
}

pub struct ArmResourceLookup {
    arm: ArmClient,
}

impl ArmResourceLookup {
    pub fn new(arm: ArmClient) -> Self {
        Self { arm }
    }
}

#[async_trait]
impl ResourceLookup for ArmResourceLookup {
    async fn get_location(&self, resource_id: &str, api_version: &str) -> Result<String> {
        let resource: GenericResource = self.arm.get(resource_id, api_version).await?;
        Ok(resource.location.to_lowercase())
    }
}
