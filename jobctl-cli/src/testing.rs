//! Test doubles shared by the command and service tests

use std::sync::Mutex;

use async_trait::async_trait;
use jobctl_client::{ClientError, JobsApi, Result, WriteMeta};
use jobctl_core::dto::endpoint::{
    JobDeregisterResponse, JobPlanResponse, JobRegisterResponse, JobValidateResponse,
};
use jobctl_core::dto::job::ApiJob;

/// Records calls and answers with canned responses
#[derive(Default)]
pub(crate) struct FakeJobsApi {
    pub(crate) calls: Mutex<Vec<String>>,
    pub(crate) validation_error: Option<String>,
    pub(crate) fail_register: bool,
}

impl FakeJobsApi {
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl JobsApi for FakeJobsApi {
    async fn validate_job(&self, job: &ApiJob) -> Result<(JobValidateResponse, WriteMeta)> {
        self.record(format!("validate {} {}", job.id, job.region));
        let response = JobValidateResponse {
            driver_config_validated: self.validation_error.is_none(),
            error: self.validation_error.clone().unwrap_or_default(),
            ..Default::default()
        };
        Ok((response, WriteMeta::default()))
    }

    async fn plan_job(&self, job: &ApiJob, diff: bool) -> Result<(JobPlanResponse, WriteMeta)> {
        self.record(format!("plan {} diff={}", job.id, diff));
        Ok((JobPlanResponse::default(), WriteMeta::default()))
    }

    async fn register_job(&self, job: &ApiJob) -> Result<(JobRegisterResponse, WriteMeta)> {
        self.record(format!("register {}", job.id));
        if self.fail_register {
            return Err(ClientError::api_error(500, "No cluster leader"));
        }
        let response = JobRegisterResponse {
            eval_id: "eval-1".to_string(),
            ..Default::default()
        };
        Ok((response, WriteMeta::default()))
    }

    async fn deregister_job(
        &self,
        job_id: &str,
        purge: bool,
    ) -> Result<(JobDeregisterResponse, WriteMeta)> {
        self.record(format!("deregister {} purge={}", job_id, purge));
        Ok((JobDeregisterResponse::default(), WriteMeta::default()))
    }
}
