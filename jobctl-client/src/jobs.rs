//! Job-related API endpoints

use async_trait::async_trait;
use jobctl_core::dto::endpoint::{
    JobDeregisterResponse, JobPlanRequest, JobPlanResponse, JobRegisterRequest,
    JobRegisterResponse, JobValidateRequest, JobValidateResponse,
};
use jobctl_core::dto::job::ApiJob;
use reqwest::Method;

use crate::error::Result;
use crate::{NomadClient, WriteMeta};

/// Job operations of the Nomad API
///
/// Implemented by [`NomadClient`]; consumers hold a `dyn JobsApi` so they
/// can be exercised without a running agent.
#[async_trait]
pub trait JobsApi: Send + Sync {
    /// Ask the agent to validate a job without registering it
    ///
    /// A job that fails validation still yields `Ok`: the reasons are in
    /// [`JobValidateResponse::error`] and
    /// [`JobValidateResponse::validation_errors`].
    async fn validate_job(&self, job: &ApiJob) -> Result<(JobValidateResponse, WriteMeta)>;

    /// Dry-run the scheduler for a job
    ///
    /// # Arguments
    /// * `job` - The job to plan
    /// * `diff` - Whether the response should include a diff against the running version
    async fn plan_job(&self, job: &ApiJob, diff: bool) -> Result<(JobPlanResponse, WriteMeta)>;

    /// Register (create or update) a job
    async fn register_job(&self, job: &ApiJob) -> Result<(JobRegisterResponse, WriteMeta)>;

    /// Deregister a job
    ///
    /// # Arguments
    /// * `job_id` - The job ID
    /// * `purge` - Remove the job from the state store instead of only stopping it
    async fn deregister_job(
        &self,
        job_id: &str,
        purge: bool,
    ) -> Result<(JobDeregisterResponse, WriteMeta)>;
}

#[async_trait]
impl JobsApi for NomadClient {
    async fn validate_job(&self, job: &ApiJob) -> Result<(JobValidateResponse, WriteMeta)> {
        let request = self
            .request(Method::PUT, &["v1", "validate", "job"])
            .json(&JobValidateRequest { job });

        tracing::debug!(job_id = %job.id, "validating job");
        self.write(request).await
    }

    async fn plan_job(&self, job: &ApiJob, diff: bool) -> Result<(JobPlanResponse, WriteMeta)> {
        let request = self
            .request(Method::PUT, &["v1", "job", job.id.as_str(), "plan"])
            .json(&JobPlanRequest {
                job,
                diff,
                policy_override: false,
            });

        tracing::debug!(job_id = %job.id, diff, "planning job");
        self.write(request).await
    }

    async fn register_job(&self, job: &ApiJob) -> Result<(JobRegisterResponse, WriteMeta)> {
        let request = self
            .request(Method::PUT, &["v1", "jobs"])
            .json(&JobRegisterRequest {
                job,
                enforce_index: false,
                job_modify_index: 0,
                policy_override: false,
            });

        tracing::debug!(job_id = %job.id, "registering job");
        self.write(request).await
    }

    async fn deregister_job(
        &self,
        job_id: &str,
        purge: bool,
    ) -> Result<(JobDeregisterResponse, WriteMeta)> {
        let request = self
            .request(Method::DELETE, &["v1", "job", job_id])
            .query(&[("purge", purge)]);

        tracing::debug!(job_id, purge, "deregistering job");
        self.write(request).await
    }
}
