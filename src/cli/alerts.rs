use super::commands::CliContext;
use super::display::TableRenderer;
use crate::domain::alerts::rule::{ADD_ACTION_GROUPS, REMOVE_ALL_ACTION_GROUPS};
use crate::domain::alerts::{
    ActionsParser, AlertProcessingRuleSpec, ConditionsParser, KeyValueAction, RecurrencesParser,
};
use crate::domain::config::parse_key_value_pairs;
use crate::infrastructure::azure::alerts_management_client;
use crate::infrastructure::prompt::{user_confirmation, StdinPrompt};
use clap::{ArgMatches, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
pub struct AlertProcessingRuleCommand {
    #[command(subcommand)]
    pub action: AlertProcessingRuleAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AlertProcessingRuleAction {
    /// Create or replace an alert processing rule
    Create(CreateRuleCommand),

    /// Show an alert processing rule
    Show(RuleRef),

    /// Delete an alert processing rule
    Delete(DeleteRuleCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct RuleRef {
    #[arg(long, short = 'g')]
    pub resource_group: String,

    /// Name of the alert processing rule
    #[arg(long, short = 'n')]
    pub name: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CreateRuleCommand {
    #[command(flatten)]
    pub rule: RuleRef,

    /// Resource IDs the rule applies to
    #[arg(long, num_args = 1.., required = true)]
    pub scopes: Vec<String>,

    /// Rule type
    #[arg(long, value_parser = [ADD_ACTION_GROUPS, REMOVE_ALL_ACTION_GROUPS])]
    pub rule_type: Option<String>,

    /// Action group resource IDs, required for AddActionGroups
    #[arg(long, num_args = 1..)]
    pub action_groups: Vec<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Whether the rule is enabled
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub enabled: bool,

    /// Filter condition: field=<field> operator=<operator> values=<value> [values=<value> ...]
    /// Repeat the flag to add more conditions
    #[arg(long, value_name = "KEY=VALUE", num_args = 1..)]
    pub conditions: Vec<String>,

    /// Action: action-type=<type>, repeatable
    #[arg(long, value_name = "KEY=VALUE", num_args = 1..)]
    pub actions: Vec<String>,

    /// Recurrence: recurrence-type=<type> start-time=<hh:mm:ss> end-time=<hh:mm:ss>, repeatable
    #[arg(long, value_name = "KEY=VALUE", num_args = 1..)]
    pub recurrences: Vec<String>,

    /// Start of the schedule (yyyy-MM-ddTHH:mm:ss)
    #[arg(long)]
    pub schedule_start: Option<String>,

    /// End of the schedule (yyyy-MM-ddTHH:mm:ss)
    #[arg(long)]
    pub schedule_end: Option<String>,

    /// Time zone of the schedule, e.g. "Pacific Standard Time"
    #[arg(long)]
    pub schedule_time_zone: Option<String>,

    /// Resource tags (KEY=VALUE)
    #[arg(long, value_name = "KEY=VALUE", num_args = 1..)]
    pub tags: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteRuleCommand {
    #[command(flatten)]
    pub rule: RuleRef,

    /// Do not prompt for confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct AlertCommand {
    #[command(subcommand)]
    pub action: AlertAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AlertAction {
    /// Show a fired alert
    Show {
        /// Alert GUID or full resource ID
        #[arg(long)]
        alert_id: String,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct SmartGroupCommand {
    #[command(subcommand)]
    pub action: SmartGroupAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SmartGroupAction {
    /// Show a smart group
    Show {
        /// Smart group GUID or full resource ID
        #[arg(long)]
        smart_group_id: String,
    },
}

/// Values of a repeated flag, one inner vector per occurrence.
/// Without parsed matches the flat values count as a single occurrence.
pub fn occurrences(matches: Option<&ArgMatches>, id: &str, flat: &[String]) -> Vec<Vec<String>> {
    let grouped = matches
        .and_then(|m| m.try_get_occurrences::<String>(id).ok().flatten())
        .map(|occurrences| {
            occurrences
                .map(|values| values.cloned().collect::<Vec<_>>())
                .collect::<Vec<_>>()
        });

    match grouped {
        Some(grouped) => grouped,
        None if flat.is_empty() => Vec::new(),
        None => vec![flat.to_vec()],
    }
}

impl AlertProcessingRuleCommand {
    /// `matches` are the matches of the `alert-processing-rule` subcommand.
    pub async fn execute(&self, ctx: &CliContext, matches: Option<&ArgMatches>) -> anyhow::Result<()> {
        match &self.action {
            AlertProcessingRuleAction::Create(cmd) => {
                let create_matches = matches.and_then(|m| m.subcommand_matches("create"));
                cmd.execute(ctx, create_matches).await
            }
            AlertProcessingRuleAction::Show(rule) => {
                let client = alerts_management_client(&ctx.arm_client()?);
                let found = client
                    .alert_processing_rules()
                    .get(&rule.resource_group, &rule.name)
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to get alert processing rule {}: {}", rule.name, e))?;
                ctx.print(&found, || TableRenderer::new().render_alert_processing_rule(&rule.name, &found))
            }
            AlertProcessingRuleAction::Delete(cmd) => {
                user_confirmation(&StdinPrompt, None, cmd.yes)?;
                let client = alerts_management_client(&ctx.arm_client()?);
                client
                    .alert_processing_rules()
                    .delete(&cmd.rule.resource_group, &cmd.rule.name)
                    .await
                    .map_err(|e| {
                        anyhow::anyhow!("Failed to delete alert processing rule {}: {}", cmd.rule.name, e)
                    })?;
                println!("Alert processing rule {} deleted successfully!", cmd.rule.name);
                Ok(())
            }
        }
    }
}

impl CreateRuleCommand {
    /// Assemble the rule from the parsed flags.
    pub fn to_spec(&self, matches: Option<&ArgMatches>) -> anyhow::Result<AlertProcessingRuleSpec> {
        let conditions = ConditionsParser::parse_all(
            "--conditions",
            &occurrences(matches, "conditions", &self.conditions),
        )?;
        let actions =
            ActionsParser::parse_all("--actions", &occurrences(matches, "actions", &self.actions))?;
        let recurrences = RecurrencesParser::parse_all(
            "--recurrences",
            &occurrences(matches, "recurrences", &self.recurrences),
        )?;

        Ok(AlertProcessingRuleSpec {
            scopes: self.scopes.clone(),
            rule_type: self.rule_type.clone(),
            action_groups: self.action_groups.clone(),
            description: self.description.clone(),
            enabled: self.enabled,
            conditions,
            actions,
            recurrences,
            schedule_start: self.schedule_start.clone(),
            schedule_end: self.schedule_end.clone(),
            schedule_time_zone: self.schedule_time_zone.clone(),
            tags: parse_key_value_pairs(&self.tags)?,
        })
    }

    pub async fn execute(&self, ctx: &CliContext, matches: Option<&ArgMatches>) -> anyhow::Result<()> {
        let rule = self.to_spec(matches)?.build()?;

        let client = alerts_management_client(&ctx.arm_client()?);
        let created = client
            .alert_processing_rules()
            .create_or_update(&self.rule.resource_group, &self.rule.name, &rule)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create alert processing rule {}: {}", self.rule.name, e))?;

        ctx.print(&created, || TableRenderer::new().render_alert_processing_rule(&self.rule.name, &created))
    }
}

impl AlertCommand {
    pub async fn execute(&self, ctx: &CliContext) -> anyhow::Result<()> {
        let AlertAction::Show { alert_id } = &self.action;
        let client = alerts_management_client(&ctx.arm_client()?);
        let alert = client
            .alerts()
            .get_by_id(alert_id)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get alert {}: {}", alert_id, e))?;
        ctx.print(&alert, || TableRenderer::new().render_resource("Alert", &alert))
    }
}

impl SmartGroupCommand {
    pub async fn execute(&self, ctx: &CliContext) -> anyhow::Result<()> {
        let SmartGroupAction::Show { smart_group_id } = &self.action;
        let client = alerts_management_client(&ctx.arm_client()?);
        let group = client
            .smart_groups()
            .get_by_id(smart_group_id)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get smart group {}: {}", smart_group_id, e))?;
        ctx.print(&group, || TableRenderer::new().render_resource("Smart Group", &group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::CliArgs;
    use clap::CommandFactory;

    fn create_matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["azext", "alert-processing-rule", "create"];
        argv.extend_from_slice(args);
        let matches = CliArgs::command().try_get_matches_from(argv).unwrap();
        let (_, rule) = matches.subcommand().unwrap();
        let (_, create) = rule.subcommand().unwrap();
        create.clone()
    }

    #[test]
    fn test_repeated_conditions_build_one_record_each() {
        let matches = create_matches(&[
            "-g", "rg", "-n", "rule", "--scopes", "/subscriptions/sub",
            "--rule-type", "RemoveAllActionGroups",
            "--conditions", "field=Severity", "operator=Equals", "values=Sev0", "values=Sev1",
            "--conditions", "field=AlertRuleName", "operator=Contains", "values=cpu",
        ]);

        let groups = occurrences(Some(&matches), "conditions", &[]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 4);

        let conditions = ConditionsParser::parse_all("--conditions", &groups).unwrap();
        assert_eq!(conditions[0].field.as_deref(), Some("Severity"));
        assert_eq!(
            conditions[0].values,
            Some(vec!["Sev0".to_string(), "Sev1".to_string()])
        );
        assert_eq!(conditions[1].operator.as_deref(), Some("Contains"));
    }

    #[test]
    fn test_flat_values_without_matches() {
        let flat = vec!["action-type=RemoveAllActionGroups".to_string()];
        assert_eq!(occurrences(None, "actions", &flat), vec![flat.clone()]);
        assert!(occurrences(None, "actions", &[]).is_empty());
    }
}
