//! Hardcoded demo workload
//!
//! The job this tool submits: a Redis server next to a log generator, both
//! run by the docker driver.

use jobctl_core::domain::job::{DEFAULT_PRIORITY, Job, Task, TaskGroup};

pub const DEMO_JOB_ID: &str = "job-id";
pub const DEMO_JOB_NAME: &str = "job-name";
pub const DEMO_DATACENTER: &str = "dc1";
pub const DEMO_TASK_GROUP: &str = "task-group-1";

const DOCKER_DRIVER: &str = "docker";

/// Build the demo job
///
/// Region is left empty so the service region applies. Neither task declares
/// resources, so both get the default requirement on translation.
pub fn demo_job() -> Job {
    let mut job = Job::new(DEMO_JOB_ID, DEMO_JOB_NAME)
        .with_datacenter(DEMO_DATACENTER)
        .with_priority(DEFAULT_PRIORITY);

    job.add_task_group(TaskGroup::new(
        DEMO_TASK_GROUP,
        vec![
            Task::new("redis6-A", DOCKER_DRIVER)
                .with_config("image", "redis:6-alpine")
                .with_config("ports", vec!["p-redis"]),
            Task::new("random-logger", DOCKER_DRIVER)
                .with_config("image", "chentex/random-logger:latest")
                .with_config("args", vec!["100", "400"]),
        ],
    ));

    job
}

/// Single alpine container with an empty environment
///
/// Appended to the demo job when `--sample-group` is given.
pub fn sample_task_group() -> TaskGroup {
    let mut alpine = Task::new("Alpine", DOCKER_DRIVER).with_config("image", "alpine");
    alpine.env = Some(Default::default());

    TaskGroup::new("sample-task-group", vec![alpine])
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobctl_core::dto::job::ApiJob;
    use serde_json::json;

    #[test]
    fn test_demo_job_matches_literals() {
        let job = demo_job();

        assert_eq!(job.id, "job-id");
        assert_eq!(job.name, "job-name");
        assert!(job.region.is_empty());
        assert_eq!(job.priority, 50);
        assert_eq!(job.datacenter, "dc1");
        assert_eq!(job.task_groups.len(), 1);

        let group = &job.task_groups[0];
        assert_eq!(group.name, "task-group-1");
        assert_eq!(group.tasks.len(), 2);

        let redis = &group.tasks[0];
        assert_eq!(redis.name, "redis6-A");
        assert_eq!(redis.driver, "docker");
        assert_eq!(redis.config["image"], json!("redis:6-alpine"));
        assert_eq!(redis.config["ports"], json!(["p-redis"]));
        assert!(redis.env.is_none());
        assert!(redis.resources.is_none());

        let logger = &group.tasks[1];
        assert_eq!(logger.name, "random-logger");
        assert_eq!(logger.config["image"], json!("chentex/random-logger:latest"));
        assert_eq!(logger.config["args"], json!(["100", "400"]));
    }

    #[test]
    fn test_demo_job_translation() {
        let api = ApiJob::from_job(&demo_job(), "");

        assert_eq!(api.region, "global");
        assert_eq!(api.datacenters, vec!["dc1".to_string()]);
        assert!(
            api.task_groups[0]
                .tasks
                .iter()
                .all(|t| t.resources.as_ref().and_then(|r| r.memory_mb) == Some(256))
        );
    }

    #[test]
    fn test_sample_task_group() {
        let group = sample_task_group();

        assert_eq!(group.name, "sample-task-group");
        assert_eq!(group.tasks.len(), 1);
        assert_eq!(group.tasks[0].name, "Alpine");
        assert_eq!(group.tasks[0].config["image"], json!("alpine"));
        assert_eq!(group.tasks[0].env, Some(Default::default()));
    }
}
