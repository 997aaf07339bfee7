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

//! Extension configuration settings and protected settings

use crate::shared::error::{AzError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

pub type SettingsMap = BTreeMap<String, String>;

/// Maps a virtual key to the concrete keys that inherit its value.
pub type ReferenceMapping = &'static [(&'static str, &'static [&'static str])];

/// The two parallel configuration maps submitted with an extension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationSettings {
    pub settings: SettingsMap,
    pub protected: SettingsMap,
}

impl ConfigurationSettings {
    pub fn new(settings: SettingsMap, protected: SettingsMap) -> Self {
        Self {
            settings,
            protected,
        }
    }

    /// Build both maps from the command line, where inline pairs override file entries.
    pub fn from_cli(
        settings: &[String],
        protected: &[String],
        settings_file: Option<&str>,
        protected_file: Option<&str>,
    ) -> Result<Self> {
        let mut conf = Self::default();
        if let Some(path) = settings_file {
            conf.settings.extend(read_settings_file(path)?);
        }
        if let Some(path) = protected_file {
            conf.protected.extend(read_settings_file(path)?);
        }
        conf.settings.extend(parse_key_value_pairs(settings)?);
        conf.protected.extend(parse_key_value_pairs(protected)?);
        Ok(conf)
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        lookup(key, &self.settings, &self.protected)
    }

    pub fn is_true(&self, key: &str) -> bool {
        is_true(self.value(key))
    }

    /// True when the key carries a non-empty value in either map.
    pub fn has_value(&self, key: &str) -> bool {
        [&self.settings, &self.protected]
            .iter()
            .any(|map| map.get(key).is_some_and(|v| !v.is_empty()))
    }

    pub fn duplicate_keys(&self) -> Vec<String> {
        let settings: BTreeSet<&String> = self.settings.keys().collect();
        self.protected
            .keys()
            .filter(|key| settings.contains(key))
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty() && self.protected.is_empty()
    }

    pub fn any_key_contains(&self, marker: &str) -> bool {
        self.settings
            .keys()
            .chain(self.protected.keys())
            .any(|key| key.contains(marker))
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.settings.insert(key.to_string(), value.into());
    }

    pub fn set_protected(&mut self, key: &str, value: impl Into<String>) {
        self.protected.insert(key.to_string(), value.into());
    }

    /// Insert into settings only when the key is absent.
    pub fn set_default(&mut self, key: &str, value: impl Into<String>) {
        self.settings
            .entry(key.to_string())
            .or_insert_with(|| value.into());
    }
}

/// Settings value first, then the protected settings value.
pub fn lookup<'a>(key: &str, settings: &'a SettingsMap, protected: &'a SettingsMap) -> Option<&'a str> {
    settings
        .get(key)
        .or_else(|| protected.get(key))
        .map(String::as_str)
}

pub fn is_true(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

pub fn is_false(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("false"))
}

pub fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Copy each referenced value into its aliases that the caller has not set.
pub fn dereference(mapping: ReferenceMapping, map: &SettingsMap) -> SettingsMap {
    let mut output = map.clone();
    for (ref_key, aliases) in mapping {
        let Some(ref_value) = map.get(*ref_key) else {
            continue;
        };
        for alias in aliases.iter() {
            output
                .entry(alias.to_string())
                .or_insert_with(|| ref_value.clone());
        }
    }
    output
}

/// Parse repeated `key=value` arguments, splitting on the first `=`.
pub fn parse_key_value_pairs(pairs: &[String]) -> Result<SettingsMap> {
    let mut map = SettingsMap::new();

    for pair in pairs {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            AzError::Usage(format!(
                "Invalid configuration format: '{}'. Expected 'key=value'",
                pair
            ))
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(AzError::Usage(format!(
                "Empty key in configuration: '{}'",
                pair
            )));
        }

        map.insert(key.to_string(), value.trim().to_string());
    }

    Ok(map)
}

/// Read a JSON or YAML object of scalar values into a settings map.
pub fn read_settings_file<P: AsRef<Path>>(path: P) -> Result<SettingsMap> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        AzError::config_error(format!(
            "Failed to read settings file {}: {}",
            path.display(),
            e
        ))
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let values: BTreeMap<String, serde_json::Value> = if is_yaml {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };

    values
        .into_iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(s) => Ok((key, s)),
            serde_json::Value::Bool(b) => Ok((key, bool_str(b).to_string())),
            serde_json::Value::Number(n) => Ok((key, n.to_string())),
            other => Err(AzError::config_error(format!(
                "Setting '{}' in {} must be a string, number or boolean, got {}",
                key,
                path.display(),
                other
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> SettingsMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    const MAPPING: ReferenceMapping = &[
        ("relayServerConnectionString", &["relayserver.relayConnectionString"]),
        ("cluster_name", &["clusterId", "prometheus.cluster_name"]),
    ];

    #[test]
    fn test_lookup_prefers_settings() {
        let settings = map(&[("enableTraining", "true")]);
        let protected = map(&[("enableTraining", "false"), ("sslSecret", "tls")]);
        assert_eq!(lookup("enableTraining", &settings, &protected), Some("true"));
        assert_eq!(lookup("sslSecret", &settings, &protected), Some("tls"));
        assert_eq!(lookup("missing", &settings, &protected), None);
    }

    #[test]
    fn test_is_true_is_case_insensitive() {
        assert!(is_true(Some("True")));
        assert!(is_true(Some("TRUE")));
        assert!(!is_true(Some("yes")));
        assert!(!is_true(None));
        assert!(is_false(Some("False")));
        assert!(!is_false(None));
    }

    #[test]
    fn test_dereference_populates_absent_aliases() {
        let input = map(&[("cluster_name", "/subscriptions/sub/cluster")]);
        let output = dereference(MAPPING, &input);
        assert_eq!(output.get("clusterId").unwrap(), "/subscriptions/sub/cluster");
        assert_eq!(
            output.get("prometheus.cluster_name").unwrap(),
            "/subscriptions/sub/cluster"
        );
        assert!(!output.contains_key("relayserver.relayConnectionString"));
    }

    #[test]
    fn test_dereference_never_overwrites() {
        let input = map(&[("cluster_name", "generated"), ("clusterId", "explicit")]);
        let output = dereference(MAPPING, &input);
        assert_eq!(output.get("clusterId").unwrap(), "explicit");
        assert_eq!(output.get("prometheus.cluster_name").unwrap(), "generated");
        // the input is left untouched
        assert!(!input.contains_key("prometheus.cluster_name"));
    }

    #[test]
    fn test_duplicate_keys() {
        let conf = ConfigurationSettings::new(
            map(&[("a", "1"), ("b", "2")]),
            map(&[("b", "3"), ("c", "4")]),
        );
        assert_eq!(conf.duplicate_keys(), vec!["b".to_string()]);
    }

    #[test]
    fn test_parse_key_value_pairs_splits_on_first_equals() {
        let pairs = vec!["conn=Endpoint=sb://x;Key=abc=".to_string()];
        let parsed = parse_key_value_pairs(&pairs).unwrap();
        assert_eq!(parsed.get("conn").unwrap(), "Endpoint=sb://x;Key=abc=");
    }

    #[test]
    fn test_parse_key_value_pairs_rejects_missing_separator() {
        let pairs = vec!["enableTraining".to_string()];
        let err = parse_key_value_pairs(&pairs).unwrap_err();
        assert!(matches!(err, AzError::Usage(_)));
    }

    #[test]
    fn test_set_default_keeps_existing() {
        let mut conf = ConfigurationSettings::default();
        conf.set("location", "westus");
        conf.set_default("location", "eastus");
        conf.set_default("domain", "eastus.cloudapp.azure.com");
        assert_eq!(conf.value("location"), Some("westus"));
        assert_eq!(conf.value("domain"), Some("eastus.cloudapp.azure.com"));
    }

    #[test]
    fn test_read_yaml_settings_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "enableTraining: true\nnodeCount: 3\nsslSecret: tls-secret").unwrap();

        let settings = read_settings_file(file.path()).unwrap();
        assert_eq!(settings.get("enableTraining").unwrap(), "true");
        assert_eq!(settings.get("nodeCount").unwrap(), "3");
        assert_eq!(settings.get("sslSecret").unwrap(), "tls-secret");
    }

    #[test]
    fn test_inline_pairs_override_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{"enableInference": false, "location": "eastus"}}"#).unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let conf = ConfigurationSettings::from_cli(
            &["enableInference=true".to_string()],
            &[],
            Some(&path),
            None,
        )
        .unwrap();
        assert_eq!(conf.value("enableInference"), Some("true"));
        assert_eq!(conf.value("location"), Some("eastus"));
    }
}
