//! Table rendering for CLI output

use super::{ColorTheme, StatusIcon};
use crate::domain::alerts::AlertProcessingRule;
use crate::infrastructure::azure::client::provisioning_state;
use crate::infrastructure::constants::PROTECTED_VALUE_MASK;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use serde_json::Value;

static NULL: Value = Value::Null;

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            header
                .iter()
                .map(|h| Cell::new(h).set_alignment(CellAlignment::Left))
                .collect::<Vec<_>>(),
        );
    table
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    fn title(&self, kind: &str, name: &str, state: Option<&str>) -> String {
        let icon = StatusIcon::get_state_icon(state);
        let icon = match self.theme.get_state_color(state) {
            c if c == self.theme.success => icon.green(),
            c if c == self.theme.error => icon.red(),
            c if c == self.theme.warning => icon.yellow(),
            _ => icon.bright_black(),
        };
        format!(
            "╭─ {} {} {} {} ─╮\n",
            kind,
            name.bold(),
            icon,
            state.unwrap_or("Unknown").bright_black()
        )
    }

    /// Render an extension resource, masking protected settings
    pub fn render_extension(&self, name: &str, extension: &Value) -> String {
        let state = provisioning_state(extension);
        let properties = extension.get("properties").unwrap_or(&NULL);

        let mut summary = new_table(&["PROPERTY", "VALUE"]);
        for (label, pointer) in [
            ("Extension type", "/properties/extensionType"),
            ("Version", "/properties/version"),
            ("Release train", "/properties/releaseTrain"),
            ("Auto upgrade", "/properties/autoUpgradeMinorVersion"),
            ("Release namespace", "/properties/scope/cluster/releaseNamespace"),
            ("Identity", "/identity/type"),
        ] {
            let value = extension.pointer(pointer).unwrap_or(&NULL);
            summary.add_row(vec![Cell::new(label), Cell::new(scalar(value))]);
        }
        summary.add_row(vec![
            Cell::new("Provisioning state"),
            Cell::new(state.unwrap_or("-")).fg(self.theme.get_state_color(state)),
        ]);

        let mut settings = new_table(&["SETTING", "VALUE"]);
        let mut has_settings = false;
        if let Some(map) = properties.get("configurationSettings").and_then(Value::as_object) {
            for (key, value) in map {
                has_settings = true;
                settings.add_row(vec![Cell::new(key), Cell::new(scalar(value))]);
            }
        }
        if let Some(map) = properties
            .get("configurationProtectedSettings")
            .and_then(Value::as_object)
        {
            for key in map.keys() {
                has_settings = true;
                settings.add_row(vec![
                    Cell::new(key),
                    Cell::new(PROTECTED_VALUE_MASK).fg(self.theme.muted),
                ]);
            }
        }

        let mut output = self.title("Extension", name, state);
        output.push_str(&summary.to_string());
        output.push('\n');
        if has_settings {
            output.push_str(&settings.to_string());
            output.push('\n');
        }
        output
    }

    /// Render an alert processing rule
    pub fn render_alert_processing_rule(&self, name: &str, rule: &AlertProcessingRule) -> String {
        let properties = &rule.properties;
        let mut table = new_table(&["PROPERTY", "VALUE"]);

        table.add_row(vec![
            Cell::new("Enabled"),
            Cell::new(properties.enabled).fg(self.theme.get_enabled_color(properties.enabled)),
        ]);
        table.add_row(vec![Cell::new("Scopes"), Cell::new(properties.scopes.join("\n"))]);
        if let Some(description) = &properties.description {
            table.add_row(vec![Cell::new("Description"), Cell::new(description)]);
        }

        let actions = properties
            .actions
            .iter()
            .map(|action| match &action.action_group_ids {
                Some(groups) => format!("{}: {}", action.action_type, groups.join(", ")),
                None => action.action_type.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![Cell::new("Actions"), Cell::new(actions)]);

        for condition in &properties.conditions {
            table.add_row(vec![
                Cell::new("Condition"),
                Cell::new(format!(
                    "{} {} {}",
                    condition.field.as_deref().unwrap_or("-"),
                    condition.operator.as_deref().unwrap_or("-"),
                    condition.values.as_deref().unwrap_or_default().join(", ")
                )),
            ]);
        }

        if let Some(schedule) = &properties.schedule {
            let window = format!(
                "{} .. {} ({})",
                schedule.effective_from.as_deref().unwrap_or("-"),
                schedule.effective_until.as_deref().unwrap_or("-"),
                schedule.time_zone.as_deref().unwrap_or("UTC")
            );
            table.add_row(vec![Cell::new("Schedule"), Cell::new(window)]);
            for recurrence in &schedule.recurrences {
                table.add_row(vec![
                    Cell::new("Recurrence"),
                    Cell::new(format!(
                        "{} {}-{}",
                        recurrence.recurrence_type.as_deref().unwrap_or("-"),
                        recurrence.start_time.as_deref().unwrap_or("-"),
                        recurrence.end_time.as_deref().unwrap_or("-")
                    )),
                ]);
            }
        }

        let mut output = format!(
            "╭─ Alert Processing Rule {} {} ─╮\n",
            name.bold(),
            format!("[{}]", rule.location).bright_black()
        );
        output.push_str(&table.to_string());
        output
    }

    /// Render the top-level properties of an arbitrary resource
    pub fn render_resource(&self, kind: &str, resource: &Value) -> String {
        let name = resource.get("name").and_then(Value::as_str).unwrap_or("-");
        let mut table = new_table(&["PROPERTY", "VALUE"]);

        let essentials = resource
            .pointer("/properties/essentials")
            .or_else(|| resource.get("properties"))
            .and_then(Value::as_object);
        if let Some(map) = essentials {
            for (key, value) in map {
                if value.is_object() || value.is_array() {
                    continue;
                }
                table.add_row(vec![Cell::new(key), Cell::new(scalar(value)).fg(self.theme.info)]);
            }
        }

        let mut output = format!("╭─ {} {} ─╮\n", kind, name.bold());
        output.push_str(&table.to_string());
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_extension_masks_protected_settings() {
        let renderer = TableRenderer::new();
        let extension = json!({
            "identity": {"type": "SystemAssigned"},
            "properties": {
                "extensionType": "Microsoft.AzureML.Kubernetes",
                "releaseTrain": "stable",
                "provisioningState": "Succeeded",
                "scope": {"cluster": {"releaseNamespace": "azureml"}},
                "configurationSettings": {"enableTraining": "true"},
                "configurationProtectedSettings": {"relayServerConnectionString": "Endpoint=sb://secret"}
            }
        });

        let output = renderer.render_extension("azureml", &extension);
        assert!(output.contains("azureml"));
        assert!(output.contains("enableTraining"));
        assert!(output.contains("relayServerConnectionString"));
        assert!(output.contains(PROTECTED_VALUE_MASK));
        assert!(!output.contains("Endpoint=sb://secret"));
    }

    #[test]
    fn test_render_resource_skips_nested_values() {
        let renderer = TableRenderer::new();
        let alert = json!({
            "name": "cpu-high",
            "properties": {
                "essentials": {"severity": "Sev1", "alertState": "New", "targetResource": {"id": "x"}}
            }
        });

        let output = renderer.render_resource("Alert", &alert);
        assert!(output.contains("Sev1"));
        assert!(output.contains("alertState"));
        assert!(!output.contains("targetResource"));
    }
}
