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

use super::args::{ActionRecord, Condition, Recurrence};
use crate::shared::error::{AzError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const ADD_ACTION_GROUPS: &str = "AddActionGroups";
pub const REMOVE_ALL_ACTION_GROUPS: &str = "RemoveAllActionGroups";
pub const ALERT_PROCESSING_RULE_LOCATION: &str = "Global";

/// Alert processing rule resource body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertProcessingRule {
    pub location: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    pub properties: AlertProcessingRuleProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertProcessingRuleProperties {
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    pub actions: Vec<RuleAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleAction {
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_group_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_until: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recurrences: Vec<Recurrence>,
}

/// Everything the `create` command collects for a rule.
#[derive(Debug, Clone, Default)]
pub struct AlertProcessingRuleSpec {
    pub scopes: Vec<String>,
    pub rule_type: Option<String>,
    pub action_groups: Vec<String>,
    pub description: Option<String>,
    pub enabled: bool,
    pub conditions: Vec<Condition>,
    pub actions: Vec<ActionRecord>,
    pub recurrences: Vec<Recurrence>,
    pub schedule_start: Option<String>,
    pub schedule_end: Option<String>,
    pub schedule_time_zone: Option<String>,
    pub tags: BTreeMap<String, String>,
}

impl AlertProcessingRuleSpec {
    pub fn build(self) -> Result<AlertProcessingRule> {
        if self.scopes.is_empty() {
            return Err(AzError::invalid_argument(
                "At least one scope is required (use --scopes)",
            ));
        }

        let action_types: Vec<String> = if self.actions.is_empty() {
            let rule_type = self.rule_type.clone().ok_or_else(|| {
                AzError::invalid_argument("Either --rule-type or --actions action-type=... is required")
            })?;
            vec![rule_type]
        } else {
            self.actions
                .iter()
                .map(|action| {
                    action.action_type.clone().ok_or_else(|| {
                        AzError::invalid_argument("action-type is required for every --actions entry")
                    })
                })
                .collect::<Result<_>>()?
        };

        let mut adds_action_groups = false;
        let mut actions = Vec::with_capacity(action_types.len());
        for action_type in action_types {
            if action_type.eq_ignore_ascii_case(ADD_ACTION_GROUPS) {
                if self.action_groups.is_empty() {
                    return Err(AzError::invalid_argument(format!(
                        "{} requires at least one action group (use --action-groups)",
                        ADD_ACTION_GROUPS
                    )));
                }
                adds_action_groups = true;
                actions.push(RuleAction {
                    action_type: ADD_ACTION_GROUPS.to_string(),
                    action_group_ids: Some(self.action_groups.clone()),
                });
            } else if action_type.eq_ignore_ascii_case(REMOVE_ALL_ACTION_GROUPS) {
                actions.push(RuleAction {
                    action_type: REMOVE_ALL_ACTION_GROUPS.to_string(),
                    action_group_ids: None,
                });
            } else {
                return Err(AzError::invalid_argument(format!(
                    "Unsupported action type '{}'. Supported types are: {}, {}",
                    action_type, ADD_ACTION_GROUPS, REMOVE_ALL_ACTION_GROUPS
                )));
            }
        }

        if !adds_action_groups && !self.action_groups.is_empty() {
            return Err(AzError::invalid_argument(format!(
                "--action-groups can only be used with {}",
                ADD_ACTION_GROUPS
            )));
        }

        let schedule = if self.schedule_start.is_some()
            || self.schedule_end.is_some()
            || self.schedule_time_zone.is_some()
            || !self.recurrences.is_empty()
        {
            Some(Schedule {
                effective_from: self.schedule_start,
                effective_until: self.schedule_end,
                time_zone: self.schedule_time_zone,
                recurrences: self.recurrences,
            })
        } else {
            None
        };

        Ok(AlertProcessingRule {
            location: ALERT_PROCESSING_RULE_LOCATION.to_string(),
            tags: self.tags,
            properties: AlertProcessingRuleProperties {
                scopes: self.scopes,
                conditions: self.conditions,
                schedule,
                actions,
                description: self.description,
                enabled: self.enabled,
            },
        })
    }
}
