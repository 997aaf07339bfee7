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

use crate::domain::config::ReferenceMapping;
use crate::infrastructure::constants::*;
use std::collections::BTreeMap;

/// Virtual keys and the concrete settings that inherit their values.
pub const REFERENCE_MAPPING: ReferenceMapping = &[
    (RELAY_SERVER_CONNECTION_STRING, &[RELAY_CONNECTION_STRING_KEY]),
    (SERVICE_BUS_CONNECTION_STRING, &[SERVICE_BUS_CONNECTION_STRING_KEY]),
    (CLUSTER_NAME, &[CLUSTER_ID, PROMETHEUS_CLUSTER_NAME]),
];

/// Fixed knobs for installing the Azure ML extension and its auxiliary resources.
#[derive(Debug, Clone, PartialEq)]
pub struct AmlProfile {
    pub default_release_namespace: String,
    pub relay_auth_rule_name: String,
    /// Service Bus topic to subscription pairs.
    pub topic_subscriptions: Vec<(String, String)>,
    pub resource_tags: BTreeMap<String, String>,
    pub name_hash_len: usize,
    pub relay_name_max_len: usize,
    pub service_bus_name_max_len: usize,
    pub workspace_name_max_len: usize,
    pub reference_mapping: ReferenceMapping,
}

impl Default for AmlProfile {
    fn default() -> Self {
        Self {
            default_release_namespace: DEFAULT_RELEASE_NAMESPACE.to_string(),
            relay_auth_rule_name: RELAY_HC_AUTH_NAME.to_string(),
            topic_subscriptions: vec![
                (
                    SERVICE_BUS_COMPUTE_STATE_TOPIC.to_string(),
                    SERVICE_BUS_COMPUTE_STATE_SUB.to_string(),
                ),
                (
                    SERVICE_BUS_JOB_STATE_TOPIC.to_string(),
                    SERVICE_BUS_JOB_STATE_SUB.to_string(),
                ),
            ],
            resource_tags: BTreeMap::from([(
                RESOURCE_TAG_KEY.to_string(),
                RESOURCE_TAG_VALUE.to_string(),
            )]),
            name_hash_len: RESOURCE_NAME_HASH_LEN,
            relay_name_max_len: RELAY_NAMESPACE_MAX_LEN,
            service_bus_name_max_len: SERVICE_BUS_NAMESPACE_MAX_LEN,
            workspace_name_max_len: LOG_ANALYTICS_WORKSPACE_MAX_LEN,
            reference_mapping: REFERENCE_MAPPING,
        }
    }
}
