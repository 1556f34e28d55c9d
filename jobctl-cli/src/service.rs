//! Nomad service
//!
//! Thin layer between the commands and the Nomad API: applies the job
//! defaults, checks the job locally, then forwards to a [`JobsApi`].

use std::sync::Arc;

use jobctl_client::{ClientError, JobsApi};
use jobctl_core::domain::job::{GLOBAL_REGION, Job};
use jobctl_core::dto::endpoint::{JobDeregisterResponse, JobPlanResponse, JobRegisterResponse};
use jobctl_core::dto::job::ApiJob;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service error type
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The job has nothing to schedule
    #[error("job `{0}` has no task groups")]
    NoTaskGroups(String),

    /// The agent rejected the job specification
    #[error("job validation failed: {0}")]
    Validation(String),

    /// The API call itself failed
    #[error(transparent)]
    Api(#[from] ClientError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Submits and removes jobs in one region
pub struct NomadService {
    api: Arc<dyn JobsApi>,
    region: String,
}

impl NomadService {
    /// Create a service; an empty region means the global region
    pub fn new(api: Arc<dyn JobsApi>, region: impl Into<String>) -> Self {
        let region = region.into();
        let region = if region.is_empty() {
            GLOBAL_REGION.to_string()
        } else {
            region
        };

        Self { api, region }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Translate, validate and dry-run plan a job
    ///
    /// Returns the job as it should be registered.
    pub async fn prepare(&self, job: &Job) -> Result<ApiJob> {
        if job.task_groups.is_empty() {
            return Err(ServiceError::NoTaskGroups(job.id.clone()));
        }

        let api_job = ApiJob::from_job(job, &self.region);

        let (validation, meta) = self.api.validate_job(&api_job).await?;
        info!(
            job_id = %api_job.id,
            driver_config_validated = validation.driver_config_validated,
            request_time = ?meta.request_time,
            "Job validated"
        );
        debug!(?validation, ?meta, "validate response");

        if !validation.warnings.trim().is_empty() {
            warn!(job_id = %api_job.id, "Validation warnings: {}", validation.warnings.trim());
        }
        if !validation.is_valid() {
            return Err(ServiceError::Validation(validation.error_message()));
        }

        self.plan(&api_job).await?;

        Ok(api_job)
    }

    /// Dry-run the scheduler for a job, with a diff
    pub async fn plan(&self, job: &ApiJob) -> Result<JobPlanResponse> {
        let (plan, meta) = self.api.plan_job(job, true).await?;

        info!(
            job_id = %job.id,
            diff = plan.diff_type().unwrap_or("unknown"),
            job_modify_index = plan.job_modify_index,
            "Job planned"
        );
        debug!(?plan, ?meta, "plan response");

        let failed = plan.failed_groups();
        if !failed.is_empty() {
            warn!(job_id = %job.id, "Task groups failed placement: {}", failed.join(", "));
        }
        if !plan.warnings.trim().is_empty() {
            warn!(job_id = %job.id, "Plan warnings: {}", plan.warnings.trim());
        }

        Ok(plan)
    }

    /// Register a job
    pub async fn register(&self, job: &ApiJob) -> Result<JobRegisterResponse> {
        let (registration, meta) = self.api.register_job(job).await?;

        info!(
            job_id = %job.id,
            eval_id = %registration.eval_id,
            index = meta.last_index,
            "Job registered"
        );
        debug!(?registration, ?meta, "register response");

        if !registration.warnings.trim().is_empty() {
            warn!(job_id = %job.id, "Register warnings: {}", registration.warnings.trim());
        }

        Ok(registration)
    }

    /// Deregister a job by ID
    pub async fn deregister(&self, job_id: &str, purge: bool) -> Result<JobDeregisterResponse> {
        let (deregistration, meta) = self.api.deregister_job(job_id, purge).await?;

        info!(
            job_id,
            purge,
            eval_id = %deregistration.eval_id,
            index = meta.last_index,
            "Job deregistered"
        );
        debug!(?deregistration, ?meta, "deregister response");

        Ok(deregistration)
    }
}
