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

/// Extension identity
pub const AZUREML_EXTENSION_TYPE: &str = "Microsoft.AzureML.Kubernetes";
pub const DEFAULT_RELEASE_NAMESPACE: &str = "azureml";
pub const DEFAULT_RELEASE_TRAIN: &str = "stable";
pub const IDENTITY_SYSTEM_ASSIGNED: &str = "SystemAssigned";

/// Component flags
pub const ENABLE_TRAINING: &str = "enableTraining";
pub const ENABLE_INFERENCE: &str = "enableInference";
pub const INSTALL_NVIDIA_DEVICE_PLUGIN: &str = "installNvidiaDevicePlugin";

/// Generated cluster settings
pub const CLUSTER_NAME: &str = "cluster_name";
pub const DOMAIN: &str = "domain";
pub const LOCATION: &str = "location";
pub const JOB_SCHEDULER_LOCATION: &str = "jobSchedulerLocation";
pub const CLUSTER_NAME_FRIENDLY: &str = "cluster_name_friendly";
pub const CLUSTER_ID: &str = "clusterId";
pub const PROMETHEUS_CLUSTER_NAME: &str = "prometheus.prometheusSpec.externalLabels.cluster_name";

/// Relay settings
pub const RELAY_SERVER_CONNECTION_STRING: &str = "relayServerConnectionString";
pub const RELAY_CONNECTION_STRING_KEY: &str = "relayserver.relayConnectionString";
pub const RELAY_HC_RESOURCE_ID_KEY: &str = "relayserver.hybridConnectionResourceID";
pub const RELAY_HC_NAME_KEY: &str = "relayserver.hybridConnectionName";

/// Service Bus settings
pub const SERVICE_BUS_CONNECTION_STRING: &str = "serviceBusConnectionString";
pub const SERVICE_BUS_CONNECTION_STRING_KEY: &str = "servicebus.connectionString";
pub const SERVICE_BUS_RESOURCE_ID_KEY: &str = "servicebus.resourceID";
pub const SERVICE_BUS_TOPIC_SUB_MAPPING_KEY: &str = "servicebus.topicSubMapping";

/// Log Analytics settings
pub const LOG_ANALYTICS_WS_ENABLED: &str = "logAnalyticsWS";
pub const AZURE_LOG_ANALYTICS_ENABLED_KEY: &str = "azure_log_analytics.enabled";
pub const AZURE_LOG_ANALYTICS_CUSTOMER_ID_KEY: &str = "azure_log_analytics.customer_id";
pub const AZURE_LOG_ANALYTICS_CONNECTION_STRING: &str = "azure_log_analytics.connection_string";

/// Inference frontend settings
pub const SSL_KEY_PEM_FILE: &str = "sslKeyPemFile";
pub const SSL_CERT_PEM_FILE: &str = "sslCertPemFile";
pub const SSL_SECRET: &str = "sslSecret";
pub const ALLOW_INSECURE_CONNECTIONS: &str = "allowInsecureConnections";
pub const PRIVATE_ENDPOINT_ILB: &str = "privateEndpointILB";
pub const PRIVATE_ENDPOINT_NODEPORT: &str = "privateEndpointNodeport";
pub const INFERENCE_LOAD_BALANCER_HA: &str = "inferenceLoadBalancerHA";
pub const IS_AKS_MIGRATION: &str = "isAKSMigration";
pub const NODE_SELECTOR_MARKER: &str = "nodeSelector";

pub const CLUSTER_PURPOSE: &str = "clusterPurpose";
pub const CLUSTER_PURPOSE_DEV_TEST: &str = "DevTest";
pub const CLUSTER_PURPOSE_FAST_PROD: &str = "FastProd";
pub const SCORING_FE_NAMESPACE: &str = "scoringFe.namespace";
pub const SCORING_FE_NODE_PORT: &str = "scoringFe.serviceType.nodePort";
pub const SCORING_FE_INTERNAL_LOAD_BALANCER: &str = "scoringFe.serviceType.internalLoadBalancer";
pub const SCORING_FE_SSL_SECRET: &str = "scoringFe.sslSecret";
pub const SCORING_FE_SSL_CERT: &str = "scoringFe.sslCert";
pub const SCORING_FE_SSL_KEY: &str = "scoringFe.sslKey";

/// Auxiliary resource naming
pub const RELAY_HC_AUTH_NAME: &str = "azureml_rw";
pub const SERVICE_BUS_COMPUTE_STATE_TOPIC: &str = "computestate-updatedby-computeprovider";
pub const SERVICE_BUS_COMPUTE_STATE_SUB: &str = "compute-scheduler-computestate";
pub const SERVICE_BUS_JOB_STATE_TOPIC: &str = "jobstate-updatedby-computeprovider";
pub const SERVICE_BUS_JOB_STATE_SUB: &str = "compute-scheduler-jobstate";
pub const RESOURCE_NAME_HASH_LEN: usize = 6;
pub const RELAY_NAMESPACE_MAX_LEN: usize = 50;
pub const SERVICE_BUS_NAMESPACE_MAX_LEN: usize = 50;
pub const LOG_ANALYTICS_WORKSPACE_MAX_LEN: usize = 63;

/// Resource tags
pub const RESOURCE_TAG_KEY: &str = "created_by";
pub const RESOURCE_TAG_VALUE: &str = "Azure Arc-enabled ML";

/// Service Bus entity settings
pub const TOPIC_MAX_SIZE_MB: u32 = 5120;
pub const TOPIC_MESSAGE_TTL: &str = "P60D";
pub const SUBSCRIPTION_MESSAGE_TTL: &str = "P14D";
pub const SUBSCRIPTION_MAX_DELIVERY_COUNT: u32 = 1;
pub const SUBSCRIPTION_LOCK_DURATION: &str = "PT30S";

/// Resource lock
pub const RESOURCE_LOCK_NAME: &str = "amlarc-resource-lock";
pub const RESOURCE_LOCK_NOTES: &str = "locked by amlarc.";

/// Resource Manager
pub const DEFAULT_ARM_ENDPOINT: &str = "https://management.azure.com";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;
pub const DEFAULT_POLL_MAX_ATTEMPTS: usize = 240;

/// Masked value for protected settings in rendered output
pub const PROTECTED_VALUE_MASK: &str = "********";
