//! Commands module
//!
//! Defines the CLI actions and routes them to their handlers.

mod job;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ValueEnum;
use jobctl_client::NomadClient;

use crate::config::Config;
use crate::service::NomadService;

/// Action selected with `--action`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Validate, plan and register the demo job
    Create,
    /// Deregister the demo job
    Delete,
    /// Validate and plan the demo job without registering it
    Plan,
}

/// Handle a CLI action
///
/// # Arguments
/// * `action` - The action to execute
/// * `config` - The CLI configuration
pub async fn handle_action(action: Action, config: &Config) -> Result<()> {
    let client = NomadClient::new(config.nomad.clone()).context("Failed to create Nomad client")?;
    let service = NomadService::new(Arc::new(client), config.nomad.region.clone());

    match action {
        Action::Create => job::register_job(&service, config).await,
        Action::Delete => job::deregister_job(&service, config).await,
        Action::Plan => job::plan_job(&service, config).await,
    }
}
