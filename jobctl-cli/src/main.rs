//! jobctl CLI
//!
//! Command-line tool that submits a hardcoded demo job to a Nomad cluster,
//! or removes it again.
//!
//! Flow for `--action create`:
//! - Build the demo job in memory
//! - Validate and dry-run plan it against the agent
//! - Register it
//!
//! Any error from the agent ends the process with a non-zero exit code.

mod commands;
mod config;
mod demo;
mod service;
#[cfg(test)]
mod testing;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Action, handle_action};
use config::Config;
use jobctl_client::ClientConfig;
use jobctl_client::config::DEFAULT_ADDRESS;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jobctl")]
#[command(version)]
#[command(about = "Submit and remove the demo job on a Nomad cluster", long_about = None)]
struct Cli {
    /// Action to perform
    #[arg(long, value_enum, default_value_t = Action::Create)]
    action: Action,

    /// Purge the job on delete instead of only stopping it
    #[arg(long)]
    purge: bool,

    /// Append the sample alpine task group to the demo job
    #[arg(long)]
    sample_group: bool,

    /// Nomad agent address
    #[arg(long, env = "NOMAD_ADDR", default_value = DEFAULT_ADDRESS)]
    address: String,

    /// Region to submit to (defaults to the global region)
    #[arg(long, env = "NOMAD_REGION", default_value = "")]
    region: String,

    /// Namespace to submit to
    #[arg(long, env = "NOMAD_NAMESPACE")]
    namespace: Option<String>,

    /// ACL token
    #[arg(long, env = "NOMAD_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, env = "NOMAD_HTTP_TIMEOUT")]
    timeout: Option<String>,
}

/// Blank values (e.g. `NOMAD_TOKEN=""`) count as unset
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let address = match self.address.trim() {
            "" => DEFAULT_ADDRESS,
            address => address,
        };

        let mut nomad = ClientConfig::new(address).with_region(self.region.trim());
        if let Some(namespace) = non_blank(&self.namespace) {
            nomad = nomad.with_namespace(namespace);
        }
        if let Some(token) = non_blank(&self.token) {
            nomad = nomad.with_token(token);
        }
        if let Some(raw) = non_blank(&self.timeout) {
            let secs: u64 = raw
                .parse()
                .with_context(|| format!("Invalid timeout `{}`: expected seconds", raw))?;
            nomad = nomad.with_timeout(Duration::from_secs(secs));
        }

        Ok(Config {
            nomad,
            purge: self.purge,
            sample_group: self.sample_group,
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobctl=info,jobctl_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;

    tracing::info!(
        action = ?cli.action,
        address = %config.nomad.address,
        "Starting jobctl"
    );

    handle_action(cli.action, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_action_flag() {
        let cli = Cli::try_parse_from(["jobctl", "--action", "delete", "--purge"]).unwrap();
        assert_eq!(cli.action, Action::Delete);

        let config = cli.config().unwrap();
        assert!(config.purge);
        assert!(!config.sample_group);
    }

    #[test]
    fn test_connection_flags() {
        let cli = Cli::try_parse_from([
            "jobctl",
            "--address",
            "https://nomad.example:4646",
            "--region",
            "eu",
            "--namespace",
            "batch",
            "--token",
            "secret",
            "--timeout",
            "10",
        ])
        .unwrap();

        let config = cli.config().unwrap();
        assert_eq!(config.nomad.address, "https://nomad.example:4646");
        assert_eq!(config.nomad.region, "eu");
        assert_eq!(config.nomad.namespace.as_deref(), Some("batch"));
        assert_eq!(config.nomad.token.as_deref(), Some("secret"));
        assert_eq!(config.nomad.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_blank_connection_values_are_unset() {
        let cli = Cli::try_parse_from([
            "jobctl",
            "--address",
            " ",
            "--namespace",
            "",
            "--token",
            " ",
            "--timeout",
            "",
        ])
        .unwrap();

        let config = cli.config().unwrap();
        assert_eq!(config.nomad.address, DEFAULT_ADDRESS);
        assert_eq!(config.nomad.namespace, None);
        assert_eq!(config.nomad.token, None);
        assert_eq!(config.nomad.timeout, None);
    }

    #[test]
    fn test_invalid_timeout() {
        let cli = Cli::try_parse_from(["jobctl", "--timeout", "soon"]).unwrap();

        let err = cli.config().unwrap_err();
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn test_rejects_unknown_action() {
        assert!(Cli::try_parse_from(["jobctl", "--action", "restart"]).is_err());
    }
}
