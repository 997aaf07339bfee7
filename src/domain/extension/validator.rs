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

//! Validation and normalization of Azure ML extension configuration

use crate::domain::config::settings::{bool_str, is_false, ConfigurationSettings, SettingsMap};
use crate::infrastructure::constants::*;
use crate::shared::error::{AzError, Result};
use tracing::{info, warn};

const ILB_WARNING: &str = "Internal load balancer only supported on AKS and AKS Engine Clusters.";

/// Validate create-time configuration, resolving inference frontend and TLS settings in place.
pub fn validate_config(conf: &mut ConfigurationSettings, release_namespace: &str) -> Result<()> {
    let duplicates = conf.duplicate_keys();
    if !duplicates.is_empty() {
        for key in &duplicates {
            warn!(
                "Duplicate keys found in both configuration settings and configuration protected settings: {}",
                key
            );
        }
        return Err(AzError::invalid_argument(format!(
            "Duplicate keys found: {}",
            duplicates.join(", ")
        )));
    }

    let enable_training = conf.is_true(ENABLE_TRAINING);
    let enable_inference = conf.is_true(ENABLE_INFERENCE);

    if enable_inference {
        warn!("The installed AzureML extension for AML inference is experimental and not covered by customer support. Please use with discretion.");
        validate_scoring_fe_settings(conf, release_namespace)?;
        set_up_inference_ssl(conf)?;
    } else if !enable_training {
        return Err(AzError::invalid_argument(format!(
            "To create {} extension, either enable Machine Learning training or inference by specifying \
             '--configuration-settings {}=true' or '--configuration-settings {}=true'",
            AZUREML_EXTENSION_TYPE, ENABLE_TRAINING, ENABLE_INFERENCE
        )));
    }

    // Caller spellings such as "True" are replaced by the resolved lowercase value.
    conf.set(ENABLE_TRAINING, bool_str(enable_training));
    conf.set(ENABLE_INFERENCE, bool_str(enable_inference));
    conf.protected.remove(ENABLE_TRAINING);
    conf.protected.remove(ENABLE_INFERENCE);
    Ok(())
}

fn cluster_purpose(conf: &ConfigurationSettings) -> &'static str {
    if is_false(conf.value(INFERENCE_LOAD_BALANCER_HA)) {
        CLUSTER_PURPOSE_DEV_TEST
    } else {
        CLUSTER_PURPOSE_FAST_PROD
    }
}

fn validate_scoring_fe_settings(conf: &mut ConfigurationSettings, release_namespace: &str) -> Result<()> {
    let purpose = cluster_purpose(conf);
    conf.set(CLUSTER_PURPOSE, purpose);

    if conf.is_true(IS_AKS_MIGRATION) {
        conf.set(SCORING_FE_NAMESPACE, "default");
        conf.set(IS_AKS_MIGRATION, "true");
    }

    let ssl_enabled = has_pem_files(&conf.protected)
        || conf.value(SSL_SECRET).is_some_and(|s| !s.is_empty());
    if !ssl_enabled && !conf.is_true(ALLOW_INSECURE_CONNECTIONS) {
        return Err(AzError::invalid_argument(format!(
            "To enable HTTPs endpoint, either provide sslCertPemFile and sslKeyPemFile to config protected settings, \
             or provide sslSecret (kubernetes secret name) containing both ssl cert and ssl key under {} namespace. \
             Otherwise, to enable HTTP endpoint, explicitly set allowInsecureConnections=true.",
            release_namespace
        )));
    }

    let node_port = conf.is_true(PRIVATE_ENDPOINT_NODEPORT);
    let internal_lb = conf.is_true(PRIVATE_ENDPOINT_ILB);
    if node_port && internal_lb {
        return Err(AzError::mutually_exclusive(
            "Specify either privateEndpointNodeport=true or privateEndpointILB=true, but not both.",
        ));
    }
    if node_port {
        conf.set(SCORING_FE_NODE_PORT, "true");
    } else if internal_lb {
        conf.set(SCORING_FE_INTERNAL_LOAD_BALANCER, "true");
        warn!("{}", ILB_WARNING);
    }
    Ok(())
}

fn has_pem_files(protected: &SettingsMap) -> bool {
    [SSL_CERT_PEM_FILE, SSL_KEY_PEM_FILE]
        .iter()
        .all(|key| protected.get(*key).is_some_and(|v| !v.is_empty()))
}

fn set_up_inference_ssl(conf: &mut ConfigurationSettings) -> Result<()> {
    if conf.is_true(ALLOW_INSECURE_CONNECTIONS) {
        warn!("SSL is not enabled. Allowing insecure connections to the deployed services.");
        return Ok(());
    }

    if has_pem_files(&conf.protected) {
        return set_inference_ssl_from_files(&mut conf.protected);
    }
    if let Some(secret) = conf.value(SSL_SECRET).map(str::to_string) {
        conf.set(SCORING_FE_SSL_SECRET, secret);
    }
    Ok(())
}

/// Base64-encode the PEM files named by `sslCertPemFile` and `sslKeyPemFile`
/// into `scoringFe.sslCert` and `scoringFe.sslKey`.
pub fn set_inference_ssl_from_files(protected: &mut SettingsMap) -> Result<()> {
    for (file_key, target_key) in [
        (SSL_CERT_PEM_FILE, SCORING_FE_SSL_CERT),
        (SSL_KEY_PEM_FILE, SCORING_FE_SSL_KEY),
    ] {
        let Some(path) = protected.get(file_key) else {
            continue;
        };
        let pem = std::fs::read_to_string(path).map_err(|e| {
            AzError::invalid_argument(format!("Failed to read {} '{}': {}", file_key, path, e))
        })?;
        protected.insert(target_key.to_string(), base64::encode(pem.as_bytes()));
    }
    Ok(())
}

/// Translate the inference frontend switches of an update into their extension settings.
pub fn normalize_config(conf: &mut ConfigurationSettings) {
    if conf.value(INFERENCE_LOAD_BALANCER_HA).is_some() {
        let purpose = cluster_purpose(conf);
        conf.set(CLUSTER_PURPOSE, purpose);
    }

    if let Some(node_port) = conf.value(PRIVATE_ENDPOINT_NODEPORT) {
        let node_port = node_port.eq_ignore_ascii_case("true");
        conf.set(SCORING_FE_NODE_PORT, bool_str(node_port));
    }

    if let Some(internal_lb) = conf.value(PRIVATE_ENDPOINT_ILB) {
        let internal_lb = internal_lb.eq_ignore_ascii_case("true");
        conf.set(SCORING_FE_INTERNAL_LOAD_BALANCER, bool_str(internal_lb));
        warn!("{}", ILB_WARNING);
    }
}

/// Confirmation prompt for an update whose settings may disrupt running workloads.
/// `None` when nothing needs confirming.
pub fn update_confirmation_message(conf: &ConfigurationSettings) -> Option<String> {
    if conf.settings.is_empty() {
        return None;
    }

    let mut body = String::new();
    let disable_training = is_false(conf.value(ENABLE_TRAINING));
    if disable_training {
        body.push_str("enableTraining from True to False,\n");
    }
    let disable_inference = is_false(conf.value(ENABLE_INFERENCE));
    if disable_inference {
        body.push_str("enableInference from True to False,\n");
    }
    let disable_device_plugin = is_false(conf.value(INSTALL_NVIDIA_DEVICE_PLUGIN));
    if disable_device_plugin {
        body.push_str("installNvidiaDevicePlugin from True to False if Nvidia GPU is used,\n");
    }

    let insecure = conf.value(ALLOW_INSECURE_CONNECTIONS).is_some();
    if insecure {
        body.push_str("allowInsecureConnections\n");
    }
    let node_port = conf.value(PRIVATE_ENDPOINT_NODEPORT).is_some();
    if node_port {
        body.push_str("privateEndpointNodeport\n");
    }
    let internal_lb = conf.value(PRIVATE_ENDPOINT_ILB).is_some();
    if internal_lb {
        body.push_str("privateEndpointILB\n");
    }
    let node_selector = conf.any_key_contains(NODE_SELECTOR_MARKER);
    if node_selector {
        body.push_str("nodeSelector. Update operation can't remove an existed node selector, but can update or add new ones.\n");
    }
    let enable_log_analytics = conf.is_true(LOG_ANALYTICS_WS_ENABLED);
    if enable_log_analytics {
        body.push_str("To update logAnalyticsWS from False to True, please provide all original configurationProtectedSettings. Otherwise, those settings would be considered obsolete and deleted.\n");
    }

    let mut scenarios = Vec::new();
    if disable_training || disable_device_plugin || node_selector {
        scenarios.push("jobs");
    }
    if disable_inference || disable_device_plugin || insecure || node_port || internal_lb || node_selector {
        scenarios.push("online endpoints and deployments");
    }

    if !scenarios.is_empty() {
        let impact = scenarios.join(", ");
        info!(impact = %impact, "update affects running workloads");
        Some(format!(
            "\nThe following configuration update will IMPACT your active Machine Learning {impact}. \
             It will be the safe update if the cluster doesn't have active Machine Learning {impact}.\n\n{body}\nProceed?"
        ))
    } else if enable_log_analytics {
        Some(format!("\n{body}\nProceed?"))
    } else {
        None
    }
}
