//! Job command handlers
//!
//! Submit, plan and remove the demo job.

use anyhow::{Context, Result};
use colored::*;
use jobctl_core::domain::job::Job;

use crate::config::Config;
use crate::demo::{DEMO_JOB_ID, demo_job, sample_task_group};
use crate::service::NomadService;

/// Build the job for this invocation
fn build_job(config: &Config) -> Job {
    let mut job = demo_job();
    if config.sample_group {
        job.add_task_group(sample_task_group());
    }
    job
}

/// Prepare and register the demo job
pub async fn register_job(service: &NomadService, config: &Config) -> Result<()> {
    let job = build_job(config);

    let prepared = service
        .prepare(&job)
        .await
        .with_context(|| format!("Failed to prepare job {}", job.id))?;

    let registration = service
        .register(&prepared)
        .await
        .with_context(|| format!("Failed to register job {}", job.id))?;

    println!("{}", "Done: job registered".green());
    if !registration.eval_id.is_empty() {
        println!("  Evaluation: {}", registration.eval_id.dimmed());
    }

    Ok(())
}

/// Validate and plan the demo job without registering it
pub async fn plan_job(service: &NomadService, config: &Config) -> Result<()> {
    let job = build_job(config);

    service
        .prepare(&job)
        .await
        .with_context(|| format!("Failed to plan job {}", job.id))?;

    println!("{}", "Done: job planned".green());
    println!(
        "  {} task group(s), {} task(s) in region {}",
        job.task_groups.len(),
        job.task_count(),
        service.region().cyan()
    );

    Ok(())
}

/// Deregister the demo job
pub async fn deregister_job(service: &NomadService, config: &Config) -> Result<()> {
    let deregistration = service
        .deregister(DEMO_JOB_ID, config.purge)
        .await
        .with_context(|| format!("Failed to deregister job {}", DEMO_JOB_ID))?;

    println!("{}", "Done: job deregistered".green());
    if config.purge {
        println!("  {}", "Job purged".dimmed());
    }
    if !deregistration.eval_id.is_empty() {
        println!("  Evaluation: {}", deregistration.eval_id.dimmed());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeJobsApi;
    use jobctl_client::ClientConfig;
    use std::sync::Arc;

    fn config(sample_group: bool) -> Config {
        Config {
            nomad: ClientConfig::default(),
            purge: false,
            sample_group,
        }
    }

    #[test]
    fn test_build_job_without_sample_group() {
        let job = build_job(&config(false));
        assert_eq!(job, demo_job());
    }

    #[test]
    fn test_build_job_with_sample_group() {
        let job = build_job(&config(true));
        assert_eq!(job.task_groups.len(), 2);
        assert_eq!(job.task_groups[1].name, "sample-task-group");
        assert_eq!(job.task_count(), 3);
    }

    #[tokio::test]
    async fn test_register_job_validates_plans_then_registers() {
        let api = Arc::new(FakeJobsApi::default());
        let service = NomadService::new(api.clone(), "");

        register_job(&service, &config(false)).await.unwrap();

        assert_eq!(
            api.calls(),
            vec![
                "validate job-id global",
                "plan job-id diff=true",
                "register job-id"
            ]
        );
    }

    #[tokio::test]
    async fn test_register_job_skips_register_on_validation_error() {
        let api = Arc::new(FakeJobsApi {
            validation_error: Some("Missing job datacenters".to_string()),
            ..Default::default()
        });
        let service = NomadService::new(api.clone(), "");

        let err = register_job(&service, &config(false)).await.unwrap_err();

        assert!(err.to_string().contains("job-id"));
        assert_eq!(api.calls(), vec!["validate job-id global"]);
    }

    #[tokio::test]
    async fn test_plan_job_never_registers() {
        let api = Arc::new(FakeJobsApi::default());
        let service = NomadService::new(api.clone(), "eu");

        plan_job(&service, &config(true)).await.unwrap();

        assert_eq!(
            api.calls(),
            vec!["validate job-id eu", "plan job-id diff=true"]
        );
    }

    #[tokio::test]
    async fn test_deregister_job_defaults_to_no_purge() {
        let api = Arc::new(FakeJobsApi::default());
        let service = NomadService::new(api.clone(), "");

        deregister_job(&service, &config(false)).await.unwrap();

        assert_eq!(api.calls(), vec!["deregister job-id purge=false"]);
    }

    #[tokio::test]
    async fn test_deregister_job_purge() {
        let api = Arc::new(FakeJobsApi::default());
        let service = NomadService::new(api.clone(), "");
        let config = Config {
            purge: true,
            ..config(false)
        };

        deregister_job(&service, &config).await.unwrap();

        assert_eq!(api.calls(), vec!["deregister job-id purge=true"]);
    }
}
