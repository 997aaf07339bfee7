use super::commands::CliContext;
use super::display::TableRenderer;
use crate::domain::config::ConfigurationSettings;
use crate::domain::extension::{
    AmlProfile, AzureMlInstaller, ClusterRef, ClusterType, CreateRequest, ExtensionScope, Identity,
    UpdateRequest,
};
use crate::infrastructure::azure::{
    ArmAuxiliaryResources, ArmClient, ArmExtensionClient, ArmResourceLookup, ExtensionClient,
};
use crate::infrastructure::constants::AZUREML_EXTENSION_TYPE;
use crate::infrastructure::prompt::StdinPrompt;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
pub struct K8sExtensionCommand {
    #[command(subcommand)]
    pub action: K8sExtensionAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum K8sExtensionAction {
    /// Install the Azure ML extension, creating the Azure resources it needs
    Create(CreateCommand),

    /// Update settings of an installed Azure ML extension
    Update(UpdateCommand),

    /// Remove the Azure ML extension from a cluster
    Delete(DeleteCommand),
}

/// Cluster addressing shared by every extension command.
#[derive(Args, Debug, Clone)]
pub struct ClusterArgs {
    /// Resource group of the cluster
    #[arg(long, short = 'g')]
    pub resource_group: String,

    /// Name of the Kubernetes cluster
    #[arg(long, short = 'c')]
    pub cluster_name: String,

    /// Type of the cluster
    #[arg(long, value_enum, default_value_t = ClusterType::ConnectedClusters)]
    pub cluster_type: ClusterType,

    /// Name of the extension instance
    #[arg(long, short = 'n')]
    pub name: String,
}

impl ClusterArgs {
    fn cluster_ref(&self, subscription_id: &str) -> ClusterRef {
        ClusterRef::new(
            subscription_id,
            self.resource_group.as_str(),
            self.cluster_type,
            self.cluster_name.as_str(),
        )
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Configuration settings (KEY=VALUE), repeatable
    #[arg(long, value_name = "KEY=VALUE", num_args = 1..)]
    pub configuration_settings: Vec<String>,

    /// Protected configuration settings (KEY=VALUE), repeatable
    #[arg(long, value_name = "KEY=VALUE", num_args = 1..)]
    pub configuration_protected_settings: Vec<String>,

    /// JSON or YAML file of configuration settings
    #[arg(long, value_name = "PATH")]
    pub configuration_settings_file: Option<String>,

    /// JSON or YAML file of protected configuration settings
    #[arg(long, value_name = "PATH")]
    pub configuration_protected_settings_file: Option<String>,
}

impl SettingsArgs {
    fn load(&self) -> anyhow::Result<ConfigurationSettings> {
        ConfigurationSettings::from_cli(
            &self.configuration_settings,
            &self.configuration_protected_settings,
            self.configuration_settings_file.as_deref(),
            self.configuration_protected_settings_file.as_deref(),
        )
        .map_err(|e| anyhow::anyhow!("Failed to parse configuration settings: {}", e))
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CreateCommand {
    #[command(flatten)]
    pub cluster: ClusterArgs,

    /// Extension type
    #[arg(long, default_value = AZUREML_EXTENSION_TYPE)]
    pub extension_type: String,

    /// Installation scope
    #[arg(long, value_enum, default_value_t = ExtensionScope::Cluster)]
    pub scope: ExtensionScope,

    /// Automatically upgrade minor versions of the extension
    #[arg(long)]
    pub auto_upgrade_minor_version: Option<bool>,

    /// Release train (defaults to stable)
    #[arg(long)]
    pub release_train: Option<String>,

    /// Pinned extension version
    #[arg(long)]
    pub version: Option<String>,

    /// Target namespace, ignored for cluster scope
    #[arg(long)]
    pub target_namespace: Option<String>,

    /// Namespace the extension components are installed into (defaults to azureml)
    #[arg(long)]
    pub release_namespace: Option<String>,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct UpdateCommand {
    #[command(flatten)]
    pub cluster: ClusterArgs,

    #[arg(long)]
    pub auto_upgrade_minor_version: Option<bool>,

    #[arg(long)]
    pub release_train: Option<String>,

    #[arg(long)]
    pub version: Option<String>,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Do not prompt for confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    #[command(flatten)]
    pub cluster: ClusterArgs,

    /// Do not prompt for confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl K8sExtensionCommand {
    pub async fn execute(&self, ctx: &CliContext) -> anyhow::Result<()> {
        match &self.action {
            K8sExtensionAction::Create(cmd) => cmd.execute(ctx).await,
            K8sExtensionAction::Update(cmd) => cmd.execute(ctx).await,
            K8sExtensionAction::Delete(cmd) => cmd.execute(ctx).await,
        }
    }
}

fn installer(arm: &ArmClient) -> AzureMlInstaller {
    AzureMlInstaller::new(
        arm.subscription_id(),
        AmlProfile::default(),
        Box::new(ArmResourceLookup::new(arm.clone())),
        Box::new(ArmAuxiliaryResources::new(arm.clone())),
        Box::new(StdinPrompt),
    )
}

impl CreateCommand {
    pub async fn execute(&self, ctx: &CliContext) -> anyhow::Result<()> {
        let configuration = self.settings.load()?;
        let arm = ctx.arm_client()?;
        let installer = installer(&arm);

        let outcome = installer
            .create(CreateRequest {
                resource_group: self.cluster.resource_group.clone(),
                cluster_name: self.cluster.cluster_name.clone(),
                cluster_type: self.cluster.cluster_type,
                name: self.cluster.name.clone(),
                extension_type: self.extension_type.clone(),
                scope: self.scope,
                auto_upgrade_minor_version: self.auto_upgrade_minor_version,
                release_train: self.release_train.clone(),
                version: self.version.clone(),
                target_namespace: self.target_namespace.clone(),
                release_namespace: self.release_namespace.clone(),
                configuration,
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to prepare extension {}: {}", self.cluster.name, e))?;

        let mut extension = outcome.extension;
        if outcome.create_identity {
            extension.identity = Some(Identity::system_assigned());
        }

        let cluster = self.cluster.cluster_ref(arm.subscription_id());
        let created = ArmExtensionClient::new(arm.clone())
            .create(&cluster, &outcome.name, &extension)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create extension {}: {}", outcome.name, e))?;

        ctx.print(&created, || TableRenderer::new().render_extension(&outcome.name, &created))
    }
}

impl UpdateCommand {
    pub async fn execute(&self, ctx: &CliContext) -> anyhow::Result<()> {
        let configuration = self.settings.load()?;
        let arm = ctx.arm_client()?;
        let installer = installer(&arm);

        let patch = installer
            .update(UpdateRequest {
                resource_group: self.cluster.resource_group.clone(),
                cluster_name: self.cluster.cluster_name.clone(),
                auto_upgrade_minor_version: self.auto_upgrade_minor_version,
                release_train: self.release_train.clone(),
                version: self.version.clone(),
                configuration,
                yes: self.yes,
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to prepare update of {}: {}", self.cluster.name, e))?;

        let cluster = self.cluster.cluster_ref(arm.subscription_id());
        let updated = ArmExtensionClient::new(arm.clone())
            .update(&cluster, &self.cluster.name, &patch)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to update extension {}: {}", self.cluster.name, e))?;

        ctx.print(&updated, || TableRenderer::new().render_extension(&self.cluster.name, &updated))
    }
}

impl DeleteCommand {
    pub async fn execute(&self, ctx: &CliContext) -> anyhow::Result<()> {
        let arm = ctx.arm_client()?;
        installer(&arm).delete(self.yes)?;

        let cluster = self.cluster.cluster_ref(arm.subscription_id());
        ArmExtensionClient::new(arm.clone())
            .delete(&cluster, &self.cluster.name)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to delete extension {}: {}", self.cluster.name, e))?;

        println!("Extension {} deleted successfully!", self.cluster.name);
        Ok(())
    }
}
