//! Configuration module
//!
//! Handles CLI configuration: the Nomad connection settings and the
//! per-invocation options of the selected action.

use jobctl_client::ClientConfig;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection settings for the Nomad agent
    pub nomad: ClientConfig,

    /// Purge the job on delete instead of only stopping it
    pub purge: bool,

    /// Append the sample task group to the demo job
    pub sample_group: bool,
}
