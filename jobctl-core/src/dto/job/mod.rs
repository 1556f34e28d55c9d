//! Nomad job representation
//!
//! The subset of Nomad's `Job` structure this client submits, plus the
//! translation from the domain records.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::job::{GLOBAL_REGION, Job, Resources, Task, TaskGroup};

/// Job type submitted for every translated job
pub const SERVICE_JOB_TYPE: &str = "service";

/// Count given to every translated task group
pub const DEFAULT_GROUP_COUNT: i32 = 1;

/// Nomad job as sent to the HTTP API
///
/// The namespace is not part of the body; the client passes it as a query
/// parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiJob {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub job_type: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Priority")]
    pub priority: i32,
    #[serde(rename = "Datacenters", default)]
    pub datacenters: Vec<String>,
    #[serde(rename = "TaskGroups", default)]
    pub task_groups: Vec<ApiTaskGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiTaskGroup {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Count")]
    pub count: i32,
    #[serde(rename = "Tasks", default)]
    pub tasks: Vec<ApiTask>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiTask {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Driver")]
    pub driver: String,
    #[serde(rename = "Config", default)]
    pub config: HashMap<String, serde_json::Value>,
    #[serde(rename = "Env", skip_serializing_if = "Option::is_none")]
    pub env: Option<HashMap<String, String>>,
    #[serde(rename = "Resources", skip_serializing_if = "Option::is_none")]
    pub resources: Option<ApiResources>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResources {
    #[serde(rename = "CPU", skip_serializing_if = "Option::is_none")]
    pub cpu: Option<i32>,
    #[serde(rename = "Cores", skip_serializing_if = "Option::is_none")]
    pub cores: Option<i32>,
    #[serde(rename = "MemoryMB", skip_serializing_if = "Option::is_none")]
    pub memory_mb: Option<i32>,
    #[serde(rename = "DiskMB", skip_serializing_if = "Option::is_none")]
    pub disk_mb: Option<i32>,
}

impl ApiJob {
    /// Translate a domain job into a Nomad service job
    ///
    /// Applies the defaults the domain leaves implicit: priority, region
    /// (`default_region`, falling back to the global region), one instance
    /// per group and the default task resource requirement.
    pub fn from_job(job: &Job, default_region: &str) -> Self {
        let region = [job.region.as_str(), default_region]
            .into_iter()
            .find(|r| !r.is_empty())
            .unwrap_or(GLOBAL_REGION)
            .to_string();

        let datacenters = if job.datacenter.is_empty() {
            Vec::new()
        } else {
            vec![job.datacenter.clone()]
        };

        Self {
            id: job.id.clone(),
            name: job.name.clone(),
            job_type: SERVICE_JOB_TYPE.to_string(),
            region,
            priority: job.effective_priority(),
            datacenters,
            task_groups: job.task_groups.iter().map(ApiTaskGroup::from).collect(),
        }
    }
}

impl From<&TaskGroup> for ApiTaskGroup {
    fn from(group: &TaskGroup) -> Self {
        Self {
            name: group.name.clone(),
            count: DEFAULT_GROUP_COUNT,
            tasks: group.tasks.iter().map(ApiTask::from).collect(),
        }
    }
}

impl From<&Task> for ApiTask {
    fn from(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            driver: task.driver.clone(),
            config: task.config.clone(),
            env: task.env.clone(),
            resources: Some(ApiResources::from(&task.effective_resources())),
        }
    }
}

impl From<&Resources> for ApiResources {
    fn from(resources: &Resources) -> Self {
        Self {
            cpu: resources.cpu,
            cores: resources.cores,
            memory_mb: resources.memory_mb,
            disk_mb: resources.disk_mb,
        }
    }
}
