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

use azext::cli::commands::Commands;
use azext::cli::{CliArgs, CliContext};
use clap::{CommandFactory, FromArgMatches};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = CliArgs::command().get_matches();
    let args = CliArgs::from_arg_matches(&matches)?;
    let ctx = CliContext::new(&args)?;

    match &args.command {
        Commands::K8sExtension(cmd) => cmd.execute(&ctx).await,
        Commands::AlertProcessingRule(cmd) => {
            cmd.execute(&ctx, matches.subcommand_matches("alert-processing-rule"))
                .await
        }
        Commands::Alert(cmd) => cmd.execute(&ctx).await,
        Commands::SmartGroup(cmd) => cmd.execute(&ctx).await,
    }
}
