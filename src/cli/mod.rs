pub mod alerts;
pub mod commands;
pub mod display;
pub mod k8s_extension;

pub use commands::{CliArgs, CliContext, OutputFormat};
