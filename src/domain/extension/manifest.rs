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

//! Cluster extension resource bodies

use crate::domain::config::SettingsMap;
use crate::infrastructure::constants::IDENTITY_SYSTEM_ASSIGNED;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(rename = "type")]
    pub identity_type: String,
}

impl Identity {
    pub fn system_assigned() -> Self {
        Self {
            identity_type: IDENTITY_SYSTEM_ASSIGNED.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeCluster {
    pub release_namespace: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeNamespace {
    pub target_namespace: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<ScopeCluster>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<ScopeNamespace>,
}

impl Scope {
    pub fn cluster(release_namespace: impl Into<String>) -> Self {
        Self {
            cluster: Some(ScopeCluster {
                release_namespace: release_namespace.into(),
            }),
            namespace: None,
        }
    }
}

/// Extension definition submitted on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    pub properties: ExtensionProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionProperties {
    pub extension_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_upgrade_minor_version: Option<bool>,
    pub release_train: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub scope: Scope,
    #[serde(default)]
    pub configuration_settings: SettingsMap,
    #[serde(default)]
    pub configuration_protected_settings: SettingsMap,
}

/// Partial extension submitted on update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchExtension {
    pub properties: PatchExtensionProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchExtensionProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_upgrade_minor_version: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_train: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_settings: Option<SettingsMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_protected_settings: Option<SettingsMap>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_body_shape() {
        let extension = Extension {
            identity: Some(Identity::system_assigned()),
            location: String::new(),
            properties: ExtensionProperties {
                extension_type: "Microsoft.AzureML.Kubernetes".to_string(),
                auto_upgrade_minor_version: Some(true),
                release_train: "stable".to_string(),
                version: None,
                scope: Scope::cluster("azureml"),
                configuration_settings: SettingsMap::new(),
                configuration_protected_settings: SettingsMap::new(),
            },
        };

        let body = serde_json::to_value(&extension).unwrap();
        assert_eq!(body["identity"]["type"], "SystemAssigned");
        assert!(body.get("location").is_none());
        assert_eq!(
            body["properties"]["scope"]["cluster"]["releaseNamespace"],
            "azureml"
        );
        assert!(body["properties"].get("version").is_none());
        assert_eq!(body["properties"]["autoUpgradeMinorVersion"], true);
    }

    #[test]
    fn test_empty_patch_serializes_no_fields() {
        let body = serde_json::to_value(PatchExtension::default()).unwrap();
        assert_eq!(body, serde_json::json!({"properties": {}}));
    }
}
