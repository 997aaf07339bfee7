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

//! On-demand creation of the Relay, Service Bus and Log Analytics resources
//! the Azure ML extension talks to, plus the best-effort resource lock.

use super::client::ArmClient;
use super::locks::{LockClient, LockLevel};
use super::loganalytics::LogAnalyticsClient;
use super::relay::{AccessRight, RelayClient};
use super::servicebus::{ServiceBusClient, SubscriptionProperties, TopicProperties};
use crate::domain::extension::naming::{cluster_scoped_id, valid_name};
use crate::domain::extension::profile::AmlProfile;
use crate::infrastructure::constants::{RESOURCE_LOCK_NAME, RESOURCE_LOCK_NOTES};
use crate::shared::error::{AzError, Result};
use async_trait::async_trait;
use tracing::{debug, info};

/// Where auxiliary resources are created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionTarget {
    pub subscription_id: String,
    pub resource_group: String,
    pub cluster_name: String,
    /// Empty when only fetching keys.
    pub location: String,
}

impl ProvisionTarget {
    fn scoped_name(&self, suffix: Option<&str>, hash_len: usize, max_len: usize) -> Result<String> {
        let id = cluster_scoped_id(
            &self.cluster_name,
            &self.subscription_id,
            &self.resource_group,
            suffix,
        );
        valid_name(&id, hash_len, max_len)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConnection {
    pub connection_string: String,
    /// Empty in key-only mode.
    pub hybrid_connection_id: String,
    pub hybrid_connection_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceBusConnection {
    pub connection_string: String,
    pub resource_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogAnalyticsConnection {
    /// Empty in key-only mode.
    pub customer_id: String,
    pub shared_key: String,
}

/// Auxiliary resources backing the Azure ML extension. With `key_only` set the
/// resources are assumed to exist and only their keys are fetched.
#[async_trait]
pub trait AuxiliaryResources: Send + Sync {
    async fn relay_connection(
        &self,
        target: &ProvisionTarget,
        profile: &AmlProfile,
        key_only: bool,
    ) -> Result<RelayConnection>;

    async fn service_bus_connection(
        &self,
        target: &ProvisionTarget,
        profile: &AmlProfile,
        key_only: bool,
    ) -> Result<ServiceBusConnection>;

    async fn log_analytics_connection(
        &self,
        target: &ProvisionTarget,
        profile: &AmlProfile,
        key_only: bool,
    ) -> Result<LogAnalyticsConnection>;

    /// Never fails; lock errors are logged and dropped.
    async fn lock_resource(&self, scope: &str);
}

pub struct ArmAuxiliaryResources {
    relay: RelayClient,
    service_bus: ServiceBusClient,
    log_analytics: LogAnalyticsClient,
    locks: LockClient,
}

impl ArmAuxiliaryResources {
    pub fn new(arm: ArmClient) -> Self {
        Self {
            relay: RelayClient::new(arm.clone()),
            service_bus: ServiceBusClient::new(arm.clone()),
            log_analytics: LogAnalyticsClient::new(arm.clone()),
            locks: LockClient::new(arm),
        }
    }
}

#[async_trait]
impl AuxiliaryResources for ArmAuxiliaryResources {
    async fn relay_connection(
        &self,
        target: &ProvisionTarget,
        profile: &AmlProfile,
        key_only: bool,
    ) -> Result<RelayConnection> {
        let namespace =
            target.scoped_name(Some("relay"), profile.name_hash_len, profile.relay_name_max_len)?;
        let hybrid_connection = target.cluster_name.as_str();
        let rg = target.resource_group.as_str();
        let rule = profile.relay_auth_rule_name.as_str();

        let mut hybrid_connection_id = String::new();
        if !key_only {
            info!(namespace = %namespace, "creating relay namespace");
            self.relay
                .create_or_update_namespace(rg, &namespace, &target.location, &profile.resource_tags)
                .await?;
            hybrid_connection_id = self
                .relay
                .create_or_update_hybrid_connection(rg, &namespace, hybrid_connection)
                .await?;
            self.relay
                .create_or_update_authorization_rule(
                    rg,
                    &namespace,
                    hybrid_connection,
                    rule,
                    &[AccessRight::Manage, AccessRight::Send, AccessRight::Listen],
                )
                .await?;
        }

        let keys = self
            .relay
            .list_keys(rg, &namespace, hybrid_connection, rule)
            .await?;
        Ok(RelayConnection {
            connection_string: keys.primary_connection_string,
            hybrid_connection_id,
            hybrid_connection_name: hybrid_connection.to_string(),
        })
    }

    async fn service_bus_connection(
        &self,
        target: &ProvisionTarget,
        profile: &AmlProfile,
        key_only: bool,
    ) -> Result<ServiceBusConnection> {
        let namespace = target.scoped_name(
            Some("service-bus"),
            profile.name_hash_len,
            profile.service_bus_name_max_len,
        )?;
        let rg = target.resource_group.as_str();

        if !key_only {
            info!(namespace = %namespace, "creating service bus namespace");
            self.service_bus
                .create_or_update_namespace(rg, &namespace, &target.location, &profile.resource_tags)
                .await?;
            for (topic, subscription) in &profile.topic_subscriptions {
                self.service_bus
                    .create_or_update_topic(rg, &namespace, topic, &TopicProperties::default())
                    .await?;
                self.service_bus
                    .create_or_update_subscription(
                        rg,
                        &namespace,
                        topic,
                        subscription,
                        &SubscriptionProperties::default(),
                    )
                    .await?;
            }
        }

        let resource_id = self.service_bus.get_namespace_id(rg, &namespace).await?;
        let rules = self.service_bus.list_authorization_rules(rg, &namespace).await?;
        let rule = rules.first().ok_or_else(|| {
            AzError::not_found(format!(
                "No authorization rule found on service bus namespace {}",
                namespace
            ))
        })?;
        let keys = self.service_bus.list_keys(rg, &namespace, &rule.name).await?;

        Ok(ServiceBusConnection {
            connection_string: keys.primary_connection_string,
            resource_id,
        })
    }

    async fn log_analytics_connection(
        &self,
        target: &ProvisionTarget,
        profile: &AmlProfile,
        key_only: bool,
    ) -> Result<LogAnalyticsConnection> {
        let workspace =
            target.scoped_name(None, profile.name_hash_len, profile.workspace_name_max_len)?;
        let rg = target.resource_group.as_str();

        let mut customer_id = String::new();
        if !key_only {
            info!(workspace = %workspace, "creating log analytics workspace");
            let created = self
                .log_analytics
                .create_or_update_workspace(rg, &workspace, &target.location, &profile.resource_tags)
                .await?;
            customer_id = created.properties.customer_id;
        }

        let keys = self.log_analytics.get_shared_keys(rg, &workspace).await?;
        Ok(LogAnalyticsConnection {
            customer_id,
            shared_key: keys.primary_shared_key,
        })
    }

    async fn lock_resource(&self, scope: &str) {
        if let Err(e) = self
            .locks
            .create_or_update_by_scope(scope, RESOURCE_LOCK_NAME, LockLevel::CanNotDelete, RESOURCE_LOCK_NOTES)
            .await
        {
            debug!(scope, error = %e, "resource lock not applied");
        }
    }
}
