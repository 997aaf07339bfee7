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

//! Microsoft.Authorization management locks

use super::client::ArmClient;
use crate::shared::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const API_VERSION: &str = "2016-09-01";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockLevel {
    CanNotDelete,
    ReadOnly,
}

#[derive(Clone)]
pub struct LockClient {
    arm: ArmClient,
}

impl LockClient {
    pub fn new(arm: ArmClient) -> Self {
        Self { arm }
    }

    pub async fn create_or_update_by_scope(
        &self,
        scope: &str,
        lock_name: &str,
        level: LockLevel,
        notes: &str,
    ) -> Result<()> {
        let path = format!(
            "{}/providers/Microsoft.Authorization/locks/{}",
            scope.trim_end_matches('/'),
            lock_name
        );
        let body = json!({ "properties": { "level": level, "notes": notes } });
        let _: Value = self.arm.put(&path, API_VERSION, &body).await?;
        Ok(())
    }
}
