// CLI command definitions

use super::alerts::{AlertCommand, AlertProcessingRuleCommand, SmartGroupCommand};
use super::k8s_extension::K8sExtensionCommand;
use crate::domain::config::CliConf;
use crate::infrastructure::azure::ArmClient;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "azext",
    version,
    about = "Azure ML extension installer and alerts management tool",
    long_about = "A standalone CLI tool for installing the Azure ML extension on Arc-enabled or AKS clusters \
                  and managing Azure Monitor alert processing rules"
)]
pub struct CliArgs {
    /// Path to the azext configuration file (TOML)
    /// If not specified, AZEXT_CONFIG_FILE is used when set
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Subscription ID, overrides the configuration file and AZURE_SUBSCRIPTION_ID
    #[arg(long, global = true)]
    pub subscription: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Manage the Azure ML extension on a Kubernetes cluster
    #[command(name = "k8s-extension")]
    K8sExtension(K8sExtensionCommand),

    /// Manage alert processing rules
    #[command(name = "alert-processing-rule")]
    AlertProcessingRule(AlertProcessingRuleCommand),

    /// Inspect fired alerts
    Alert(AlertCommand),

    /// Inspect smart groups of correlated alerts
    #[command(name = "smart-group")]
    SmartGroup(SmartGroupCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub conf: CliConf,
    pub output: OutputFormat,
}

impl CliContext {
    pub fn new(args: &CliArgs) -> anyhow::Result<Self> {
        let conf = CliConf::load(args.config.as_deref(), args.subscription.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
        Ok(Self {
            conf,
            output: args.output,
        })
    }

    pub fn arm_client(&self) -> anyhow::Result<ArmClient> {
        ArmClient::new(&self.conf)
            .map_err(|e| anyhow::anyhow!("Failed to create Azure Resource Manager client: {}", e))
    }

    /// Print `value` as pretty JSON, or the rendered table.
    pub fn print<T: serde::Serialize>(&self, value: &T, table: impl FnOnce() -> String) -> anyhow::Result<()> {
        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Table => println!("{}", table()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let args = CliArgs::try_parse_from([
            "azext",
            "alert",
            "show",
            "--alert-id",
            "abc",
            "--output",
            "json",
            "--subscription",
            "sub",
        ])
        .unwrap();
        assert_eq!(args.output, OutputFormat::Json);
        assert_eq!(args.subscription.as_deref(), Some("sub"));
        assert!(matches!(args.command, Commands::Alert(_)));
    }
}
