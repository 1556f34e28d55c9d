//! Request and response bodies of the Nomad job endpoints

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::dto::job::ApiJob;

/// Body of `PUT /v1/validate/job`
#[derive(Debug, Clone, Serialize)]
pub struct JobValidateRequest<'a> {
    #[serde(rename = "Job")]
    pub job: &'a ApiJob,
}

/// Body of `PUT /v1/job/:id/plan`
#[derive(Debug, Clone, Serialize)]
pub struct JobPlanRequest<'a> {
    #[serde(rename = "Job")]
    pub job: &'a ApiJob,
    #[serde(rename = "Diff")]
    pub diff: bool,
    #[serde(rename = "PolicyOverride")]
    pub policy_override: bool,
}

/// Body of `PUT /v1/jobs`
#[derive(Debug, Clone, Serialize)]
pub struct JobRegisterRequest<'a> {
    #[serde(rename = "Job")]
    pub job: &'a ApiJob,
    #[serde(rename = "EnforceIndex")]
    pub enforce_index: bool,
    #[serde(rename = "JobModifyIndex")]
    pub job_modify_index: u64,
    #[serde(rename = "PolicyOverride")]
    pub policy_override: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct JobValidateResponse {
    #[serde(rename = "DriverConfigValidated")]
    pub driver_config_validated: bool,
    #[serde(rename = "ValidationErrors")]
    pub validation_errors: Option<Vec<String>>,
    /// Multi-line summary of all validation errors, empty when the job is valid
    #[serde(rename = "Error")]
    pub error: String,
    #[serde(rename = "Warnings")]
    pub warnings: String,
}

impl JobValidateResponse {
    pub fn is_valid(&self) -> bool {
        self.error.trim().is_empty()
            && self
                .validation_errors
                .as_ref()
                .is_none_or(|errors| errors.is_empty())
    }

    /// The server's error summary, or the individual errors joined
    pub fn error_message(&self) -> String {
        if !self.error.trim().is_empty() {
            return self.error.trim().to_string();
        }
        self.validation_errors
            .as_deref()
            .unwrap_or_default()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct JobPlanResponse {
    #[serde(rename = "JobModifyIndex")]
    pub job_modify_index: u64,
    #[serde(rename = "CreatedEvals")]
    pub created_evals: Option<Vec<serde_json::Value>>,
    #[serde(rename = "Diff")]
    pub diff: Option<serde_json::Value>,
    #[serde(rename = "Annotations")]
    pub annotations: Option<serde_json::Value>,
    /// Task groups the scheduler could not place, keyed by group name
    #[serde(rename = "FailedTGAllocs")]
    pub failed_tg_allocs: Option<HashMap<String, serde_json::Value>>,
    #[serde(rename = "Warnings")]
    pub warnings: String,
}

impl JobPlanResponse {
    /// Names of the groups that failed placement, sorted
    pub fn failed_groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = self
            .failed_tg_allocs
            .iter()
            .flat_map(|m| m.keys().map(String::as_str))
            .collect();
        groups.sort_unstable();
        groups
    }

    /// Diff type reported for the whole job ("Added", "Edited", "None", ...)
    pub fn diff_type(&self) -> Option<&str> {
        self.diff.as_ref()?.get("Type")?.as_str()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct JobRegisterResponse {
    #[serde(rename = "EvalID")]
    pub eval_id: String,
    #[serde(rename = "EvalCreateIndex")]
    pub eval_create_index: u64,
    #[serde(rename = "JobModifyIndex")]
    pub job_modify_index: u64,
    #[serde(rename = "Warnings")]
    pub warnings: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct JobDeregisterResponse {
    #[serde(rename = "EvalID")]
    pub eval_id: String,
    #[serde(rename = "EvalCreateIndex")]
    pub eval_create_index: u64,
    #[serde(rename = "JobModifyIndex")]
    pub job_modify_index: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_response_valid() {
        let resp: JobValidateResponse = serde_json::from_value(json!({
            "DriverConfigValidated": true,
            "ValidationErrors": null,
            "Error": "",
            "Warnings": ""
        }))
        .unwrap();

        assert!(resp.driver_config_validated);
        assert!(resp.is_valid());
    }

    #[test]
    fn test_validate_response_invalid() {
        let resp: JobValidateResponse = serde_json::from_value(json!({
            "DriverConfigValidated": false,
            "ValidationErrors": ["missing datacenters", "group has no tasks"],
            "Error": ""
        }))
        .unwrap();

        assert!(!resp.is_valid());
        assert_eq!(
            resp.error_message(),
            "missing datacenters; group has no tasks"
        );
    }

    #[test]
    fn test_plan_response_helpers() {
        let resp: JobPlanResponse = serde_json::from_value(json!({
            "JobModifyIndex": 0,
            "Diff": { "Type": "Added", "ID": "job-id" },
            "FailedTGAllocs": { "web": {}, "cache": {} },
            "Index": 12
        }))
        .unwrap();

        assert_eq!(resp.diff_type(), Some("Added"));
        assert_eq!(resp.failed_groups(), vec!["cache", "web"]);
        assert!(resp.warnings.is_empty());
    }

    #[test]
    fn test_register_request_shape() {
        let job = ApiJob {
            id: "job-id".to_string(),
            name: "job-name".to_string(),
            job_type: "service".to_string(),
            region: "global".to_string(),
            priority: 50,
            datacenters: vec!["dc1".to_string()],
            task_groups: vec![],
        };
        let body = serde_json::to_value(JobRegisterRequest {
            job: &job,
            enforce_index: false,
            job_modify_index: 0,
            policy_override: false,
        })
        .unwrap();

        assert_eq!(body["Job"]["ID"], json!("job-id"));
        assert_eq!(body["EnforceIndex"], json!(false));
    }
}
