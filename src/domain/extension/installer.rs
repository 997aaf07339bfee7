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

//! Create, update and delete of the Azure ML cluster extension

use super::cluster::{ClusterRef, ClusterType, ExtensionScope};
use super::manifest::{Extension, ExtensionProperties, PatchExtension, PatchExtensionProperties, Scope};
use super::profile::AmlProfile;
use super::validator::{
    normalize_config, set_inference_ssl_from_files, update_confirmation_message, validate_config,
};
use crate::domain::config::settings::{dereference, is_true, ConfigurationSettings};
use crate::infrastructure::azure::{AuxiliaryResources, ProvisionTarget, ResourceLookup};
use crate::infrastructure::constants::*;
use crate::infrastructure::prompt::{user_confirmation, ConfirmationPrompt};
use crate::shared::error::{AzError, Result};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub resource_group: String,
    pub cluster_name: String,
    pub cluster_type: ClusterType,
    pub name: String,
    pub extension_type: String,
    pub scope: ExtensionScope,
    pub auto_upgrade_minor_version: Option<bool>,
    pub release_train: Option<String>,
    pub version: Option<String>,
    /// Accepted for parity with other extensions; cluster scope ignores it.
    pub target_namespace: Option<String>,
    pub release_namespace: Option<String>,
    pub configuration: ConfigurationSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateOutcome {
    pub extension: Extension,
    pub name: String,
    /// The caller attaches a system-assigned identity when set.
    pub create_identity: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub resource_group: String,
    pub cluster_name: String,
    pub auto_upgrade_minor_version: Option<bool>,
    pub release_train: Option<String>,
    pub version: Option<String>,
    pub configuration: ConfigurationSettings,
    pub yes: bool,
}

pub struct AzureMlInstaller {
    subscription_id: String,
    profile: AmlProfile,
    lookup: Box<dyn ResourceLookup>,
    resources: Box<dyn AuxiliaryResources>,
    prompt: Box<dyn ConfirmationPrompt>,
}

impl AzureMlInstaller {
    pub fn new(
        subscription_id: impl Into<String>,
        profile: AmlProfile,
        lookup: Box<dyn ResourceLookup>,
        resources: Box<dyn AuxiliaryResources>,
        prompt: Box<dyn ConfirmationPrompt>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            profile,
            lookup,
            resources,
            prompt,
        }
    }

    pub fn profile(&self) -> &AmlProfile {
        &self.profile
    }

    pub async fn create(&self, request: CreateRequest) -> Result<CreateOutcome> {
        if request.scope == ExtensionScope::Namespace {
            return Err(AzError::invalid_argument(format!(
                "Invalid scope '{}'.  This extension can be installed only at 'cluster' scope.",
                request.scope
            )));
        }
        ensure_azureml_type(&request.extension_type)?;

        let release_namespace = request
            .release_namespace
            .filter(|ns| !ns.is_empty())
            .unwrap_or_else(|| self.profile.default_release_namespace.clone());
        if request.target_namespace.is_some() {
            info!("--target-namespace is ignored for cluster scoped extensions");
        }

        let mut conf = request.configuration;
        validate_config(&mut conf, &release_namespace)?;

        let cluster = ClusterRef::new(
            self.subscription_id.as_str(),
            request.resource_group.as_str(),
            request.cluster_type,
            request.cluster_name.as_str(),
        );
        let cluster_resource_id = cluster.resource_id();
        let location = self
            .lookup
            .get_location(&cluster_resource_id, request.cluster_type.api_version())
            .await?;

        conf.set_default(CLUSTER_NAME, cluster_resource_id.as_str());
        conf.set_default(DOMAIN, format!("{}.cloudapp.azure.com", location));
        conf.set_default(LOCATION, location.as_str());
        conf.set_default(JOB_SCHEDULER_LOCATION, location.as_str());
        conf.set_default(CLUSTER_NAME_FRIENDLY, request.cluster_name.as_str());

        let target = ProvisionTarget {
            subscription_id: self.subscription_id.clone(),
            resource_group: request.resource_group.clone(),
            cluster_name: request.cluster_name.clone(),
            location,
        };
        self.create_required_resources(&mut conf, &target).await?;

        let mapping = self.profile.reference_mapping;
        let extension = Extension {
            identity: None,
            location: String::new(),
            properties: ExtensionProperties {
                extension_type: request.extension_type,
                auto_upgrade_minor_version: request.auto_upgrade_minor_version,
                release_train: request
                    .release_train
                    .unwrap_or_else(|| DEFAULT_RELEASE_TRAIN.to_string()),
                version: request.version,
                scope: Scope::cluster(release_namespace),
                configuration_settings: dereference(mapping, &conf.settings),
                configuration_protected_settings: dereference(mapping, &conf.protected),
            },
        };

        Ok(CreateOutcome {
            extension,
            name: request.name,
            create_identity: true,
        })
    }

    async fn create_required_resources(
        &self,
        conf: &mut ConfigurationSettings,
        target: &ProvisionTarget,
    ) -> Result<()> {
        let wants_log_analytics = is_true(conf.settings.get(LOG_ANALYTICS_WS_ENABLED).map(String::as_str))
            || is_true(conf.settings.get(AZURE_LOG_ANALYTICS_ENABLED_KEY).map(String::as_str));
        if wants_log_analytics && !conf.has_value(AZURE_LOG_ANALYTICS_CONNECTION_STRING) {
            info!("==== BEGIN LOG ANALYTICS WORKSPACE CREATION ====");
            let workspace = self
                .resources
                .log_analytics_connection(target, &self.profile, false)
                .await?;
            info!("==== END LOG ANALYTICS WORKSPACE CREATION ====");
            conf.set(AZURE_LOG_ANALYTICS_ENABLED_KEY, "true");
            conf.set(AZURE_LOG_ANALYTICS_CUSTOMER_ID_KEY, workspace.customer_id);
            conf.set_protected(AZURE_LOG_ANALYTICS_CONNECTION_STRING, workspace.shared_key);
        }

        if !conf.has_value(RELAY_SERVER_CONNECTION_STRING) && !conf.has_value(RELAY_CONNECTION_STRING_KEY) {
            info!("==== BEGIN RELAY CREATION ====");
            let relay = self
                .resources
                .relay_connection(target, &self.profile, false)
                .await?;
            info!("==== END RELAY CREATION ====");
            conf.set_protected(RELAY_SERVER_CONNECTION_STRING, relay.connection_string);
            conf.set(RELAY_HC_RESOURCE_ID_KEY, relay.hybrid_connection_id);
            conf.set(RELAY_HC_NAME_KEY, relay.hybrid_connection_name);
        }

        if !conf.has_value(SERVICE_BUS_CONNECTION_STRING)
            && !conf.has_value(SERVICE_BUS_CONNECTION_STRING_KEY)
        {
            info!("==== BEGIN SERVICE BUS CREATION ====");
            let service_bus = self
                .resources
                .service_bus_connection(target, &self.profile, false)
                .await?;
            info!("==== END SERVICE BUS CREATION ====");
            conf.set_protected(SERVICE_BUS_CONNECTION_STRING, service_bus.connection_string);
            conf.set(SERVICE_BUS_RESOURCE_ID_KEY, service_bus.resource_id);
            for (topic, subscription) in &self.profile.topic_subscriptions {
                conf.set(
                    &format!("{}.{}", SERVICE_BUS_TOPIC_SUB_MAPPING_KEY, topic),
                    subscription.as_str(),
                );
            }
        }

        Ok(())
    }

    pub async fn update(&self, request: UpdateRequest) -> Result<PatchExtension> {
        let mut conf = request.configuration;
        normalize_config(&mut conf);

        if let Some(message) = update_confirmation_message(&conf) {
            user_confirmation(self.prompt.as_ref(), Some(&message), request.yes)?;
        }

        if !conf.protected.is_empty() {
            let target = ProvisionTarget {
                subscription_id: self.subscription_id.clone(),
                resource_group: request.resource_group.clone(),
                cluster_name: request.cluster_name.clone(),
                location: String::new(),
            };
            self.rederive_connection_strings(&mut conf, &target).await?;

            conf.protected = dereference(self.profile.reference_mapping, &conf.protected);
            if conf.protected.contains_key(SSL_KEY_PEM_FILE)
                && conf.protected.contains_key(SSL_CERT_PEM_FILE)
            {
                info!("Both {} and {} are set, update ssl key.", SSL_KEY_PEM_FILE, SSL_CERT_PEM_FILE);
                set_inference_ssl_from_files(&mut conf.protected)?;
            }
        }

        Ok(PatchExtension {
            properties: PatchExtensionProperties {
                auto_upgrade_minor_version: request.auto_upgrade_minor_version,
                release_train: request.release_train,
                version: request.version,
                configuration_settings: Some(conf.settings).filter(|m| !m.is_empty()),
                configuration_protected_settings: Some(conf.protected).filter(|m| !m.is_empty()),
            },
        })
    }

    /// Fetch the keys of already provisioned resources so a protected-settings
    /// update does not drop them. Missing resources are skipped.
    async fn rederive_connection_strings(
        &self,
        conf: &mut ConfigurationSettings,
        target: &ProvisionTarget,
    ) -> Result<()> {
        if !conf.protected.contains_key(AZURE_LOG_ANALYTICS_CONNECTION_STRING) {
            let found = skip_not_found(
                self.resources
                    .log_analytics_connection(target, &self.profile, true)
                    .await,
                "log analytics connection string",
            )?;
            if let Some(workspace) = found {
                conf.set_protected(AZURE_LOG_ANALYTICS_CONNECTION_STRING, workspace.shared_key);
            }
        }

        if !conf.protected.contains_key(RELAY_SERVER_CONNECTION_STRING) {
            let found = skip_not_found(
                self.resources.relay_connection(target, &self.profile, true).await,
                "relay connection string",
            )?;
            if let Some(relay) = found {
                conf.set_protected(RELAY_SERVER_CONNECTION_STRING, relay.connection_string);
            }
        }

        if !conf.protected.contains_key(SERVICE_BUS_CONNECTION_STRING) {
            let found = skip_not_found(
                self.resources
                    .service_bus_connection(target, &self.profile, true)
                    .await,
                "service bus connection string",
            )?;
            if let Some(service_bus) = found {
                conf.set_protected(SERVICE_BUS_CONNECTION_STRING, service_bus.connection_string);
            }
        }

        Ok(())
    }

    /// Warn about device plugin side effects and confirm before the extension is removed.
    pub fn delete(&self, yes: bool) -> Result<()> {
        warn!(
            "If nvidia.com/gpu or fuse resource is not recognized by kubernetes after this deletion, \
             you probably have installed nvidia-device-plugin or fuse-device-plugin before installing AMLArc extension. \
             Please try to reinstall device plugins to fix this issue."
        );
        user_confirmation(self.prompt.as_ref(), None, yes)
    }
}

fn ensure_azureml_type(extension_type: &str) -> Result<()> {
    if extension_type.eq_ignore_ascii_case(AZUREML_EXTENSION_TYPE) {
        Ok(())
    } else {
        Err(AzError::invalid_argument(format!(
            "Unsupported extension type '{}'. Only {} is supported.",
            extension_type, AZUREML_EXTENSION_TYPE
        )))
    }
}

fn skip_not_found<T>(result: Result<T>, what: &str) -> Result<Option<T>> {
    match result {
        Ok(value) => {
            info!("Get {} succeeded.", what);
            Ok(Some(value))
        }
        Err(e) if e.is_not_found() => {
            info!("Failed to get {}: {}", what, e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
