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

//! Handlers for repeated `KEY=VALUE ...` flags of alert processing rules.
//!
//! Each occurrence of a flag becomes one record; repeating the flag appends
//! further records in command-line order.

use crate::shared::error::{AzError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
struct Group {
    key: String,
    spelling: String,
    values: Vec<String>,
}

/// Values of one flag occurrence grouped by lowercased key, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedProperties(Vec<Group>);

impl GroupedProperties {
    /// Split each token on its first `=` and group the values by key.
    pub fn parse<S: AsRef<str>>(option: &str, tokens: &[S]) -> Result<Self> {
        let mut grouped = Self::default();
        for token in tokens {
            let (key, value) = token
                .as_ref()
                .split_once('=')
                .ok_or_else(|| AzError::Usage(format!("usage error: {} [KEY=VALUE ...]", option)))?;
            grouped.push(key, value.to_string());
        }
        Ok(grouped)
    }

    fn push(&mut self, spelling: &str, value: String) {
        let key = spelling.to_lowercase();
        match self.0.iter_mut().find(|group| group.key == key) {
            Some(group) => group.values.push(value),
            None => self.0.push(Group {
                key,
                spelling: spelling.to_string(),
                values: vec![value],
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|group| (group.key.as_str(), group.values.as_slice()))
    }

    /// The key as first typed on the command line.
    pub fn spelling<'a>(&'a self, key: &'a str) -> &'a str {
        self.0
            .iter()
            .find(|group| group.key == key)
            .map_or(key, |group| group.spelling.as_str())
    }
}

/// A repeated flag whose occurrences each parse into one record.
pub trait KeyValueAction {
    type Record;

    /// Parameter name used in error messages.
    const PARAMETER: &'static str;

    /// Keys accepted by this flag.
    const KEYS: &'static [&'static str];

    fn project(properties: &GroupedProperties) -> Result<Self::Record>;

    fn parse<S: AsRef<str>>(option: &str, tokens: &[S]) -> Result<Self::Record> {
        let properties = GroupedProperties::parse(option, tokens)?;
        Self::project(&properties)
    }

    /// Parse one occurrence and append it to the records collected so far.
    fn append<S: AsRef<str>>(option: &str, tokens: &[S], records: &mut Vec<Self::Record>) -> Result<()> {
        records.push(Self::parse(option, tokens)?);
        Ok(())
    }

    /// Parse every occurrence of the flag in order.
    fn parse_all<S: AsRef<str>>(option: &str, occurrences: &[Vec<S>]) -> Result<Vec<Self::Record>> {
        let mut records = Vec::with_capacity(occurrences.len());
        for tokens in occurrences {
            Self::append(option, tokens.as_slice(), &mut records)?;
        }
        Ok(records)
    }

    fn unsupported_key(key: &str) -> AzError {
        AzError::invalid_argument(format!(
            "Unsupported Key {} is provided for parameter {}. All possible keys are: {}",
            key,
            Self::PARAMETER,
            Self::KEYS.join(", ")
        ))
    }
}

fn first(values: &[String]) -> Option<String> {
    values.first().cloned()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

pub struct ConditionsParser;

impl KeyValueAction for ConditionsParser {
    type Record = Condition;
    const PARAMETER: &'static str = "conditions";
    const KEYS: &'static [&'static str] = &["field", "operator", "values"];

    fn project(properties: &GroupedProperties) -> Result<Condition> {
        let mut condition = Condition::default();
        for (key, values) in properties.iter() {
            match key {
                "field" => condition.field = first(values),
                "operator" => condition.operator = first(values),
                "values" => condition.values = Some(values.to_vec()),
                _ => return Err(Self::unsupported_key(properties.spelling(key))),
            }
        }
        Ok(condition)
    }
}

pub struct ActionsParser;

impl KeyValueAction for ActionsParser {
    type Record = ActionRecord;
    const PARAMETER: &'static str = "actions";
    const KEYS: &'static [&'static str] = &["action-type"];

    fn project(properties: &GroupedProperties) -> Result<ActionRecord> {
        let mut action = ActionRecord::default();
        for (key, values) in properties.iter() {
            match key {
                "action-type" => action.action_type = first(values),
                _ => return Err(Self::unsupported_key(properties.spelling(key))),
            }
        }
        Ok(action)
    }
}

pub struct RecurrencesParser;

impl KeyValueAction for RecurrencesParser {
    type Record = Recurrence;
    const PARAMETER: &'static str = "recurrences";
    const KEYS: &'static [&'static str] = &["recurrence-type", "start-time", "end-time"];

    fn project(properties: &GroupedProperties) -> Result<Recurrence> {
        let mut recurrence = Recurrence::default();
        for (key, values) in properties.iter() {
            match key {
                "recurrence-type" => recurrence.recurrence_type = first(values),
                "start-time" => recurrence.start_time = first(values),
                "end-time" => recurrence.end_time = first(values),
                _ => return Err(Self::unsupported_key(properties.spelling(key))),
            }
        }
        Ok(recurrence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_is_case_insensitive_and_ordered() {
        let grouped =
            GroupedProperties::parse("--conditions", &["Values=a", "field=x", "values=b"]).unwrap();
        let collected: Vec<_> = grouped.iter().collect();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].0, "values");
        assert_eq!(collected[0].1, ["a".to_string(), "b".to_string()]);
        assert_eq!(collected[1].0, "field");
    }

    #[test]
    fn test_conditions_keep_all_values_but_first_field() {
        let condition = ConditionsParser::parse(
            "--conditions",
            &["field=Severity", "operator=Equals", "values=Sev0", "values=Sev1", "field=Ignored"],
        )
        .unwrap();
        assert_eq!(condition.field.as_deref(), Some("Severity"));
        assert_eq!(condition.operator.as_deref(), Some("Equals"));
        assert_eq!(
            condition.values,
            Some(vec!["Sev0".to_string(), "Sev1".to_string()])
        );
    }

    #[test]
    fn test_value_may_contain_equals() {
        let condition =
            ConditionsParser::parse("--conditions", &["values=a=b", "field=Description"]).unwrap();
        assert_eq!(condition.values, Some(vec!["a=b".to_string()]));
    }

    #[test]
    fn test_missing_separator_is_usage_error() {
        let err = ActionsParser::parse("--actions", &["RemoveAllActionGroups"]).unwrap_err();
        assert!(matches!(err, AzError::Usage(_)));
        assert_eq!(err.to_string(), "usage error: --actions [KEY=VALUE ...]");
    }

    #[test]
    fn test_unknown_recurrence_key_lists_permitted_keys() {
        let err = RecurrencesParser::parse("--recurrences", &["days=Monday"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported Key days is provided for parameter recurrences. All possible keys are: recurrence-type, start-time, end-time"
        );
    }

    #[test]
    fn test_unknown_key_reported_as_typed() {
        let err = ConditionsParser::parse("--conditions", &["Fields=Severity", "operator=Equals"])
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err
            .to_string()
            .starts_with("Unsupported Key Fields is provided for parameter conditions."));
    }

    #[test]
    fn test_absent_keys_are_not_serialized() {
        let recurrence = RecurrencesParser::parse("--recurrences", &["recurrence-type=Daily"]).unwrap();
        let json = serde_json::to_value(&recurrence).unwrap();
        assert_eq!(json, serde_json::json!({"recurrenceType": "Daily"}));
    }
}
