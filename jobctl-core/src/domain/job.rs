//! Job domain types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Priority given to a job that does not set one
pub const DEFAULT_PRIORITY: i32 = 50;

/// Region used when a job or service leaves the region empty
pub const GLOBAL_REGION: &str = "global";

/// CPU (MHz) required by a task with no explicit resources
pub const DEFAULT_TASK_CPU: i32 = 100;

/// Memory (MB) required by a task with no explicit resources
pub const DEFAULT_TASK_MEMORY_MB: i32 = 256;

/// Desired workload: one job made of task groups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub name: String,
    /// Empty means "use the service region"
    pub region: String,
    pub datacenter: String,
    /// Zero means [`DEFAULT_PRIORITY`]
    pub priority: i32,
    pub task_groups: Vec<TaskGroup>,
}

impl Job {
    /// Create a job with no task groups
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = datacenter.into();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Append a task group
    pub fn add_task_group(&mut self, group: TaskGroup) -> &mut Self {
        self.task_groups.push(group);
        self
    }

    /// Priority with the default applied
    pub fn effective_priority(&self) -> i32 {
        if self.priority == 0 {
            DEFAULT_PRIORITY
        } else {
            self.priority
        }
    }

    /// Total number of tasks across all groups
    pub fn task_count(&self) -> usize {
        self.task_groups.iter().map(|g| g.tasks.len()).sum()
    }
}

/// Named set of tasks scheduled together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskGroup {
    pub name: String,
    pub tasks: Vec<Task>,
}

impl TaskGroup {
    pub fn new(name: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            name: name.into(),
            tasks,
        }
    }
}

/// A single unit of work run by a driver
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    /// Driver identifier, e.g. "docker" or "exec"
    pub driver: String,
    /// Driver-specific configuration (image, args, ports, ...)
    pub config: HashMap<String, serde_json::Value>,
    pub env: Option<HashMap<String, String>>,
    pub resources: Option<Resources>,
}

impl Task {
    pub fn new(name: impl Into<String>, driver: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            driver: driver.into(),
            ..Default::default()
        }
    }

    /// Set one driver configuration entry
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Set one environment variable
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_resources(mut self, resources: Resources) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Resources with the default requirement applied
    pub fn effective_resources(&self) -> Resources {
        self.resources
            .clone()
            .unwrap_or_else(Resources::default_requirement)
    }
}

/// Resource limits for a task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    /// CPU in MHz
    pub cpu: Option<i32>,
    /// Dedicated cores; mutually exclusive with `cpu` on the server side
    pub cores: Option<i32>,
    pub memory_mb: Option<i32>,
    pub disk_mb: Option<i32>,
}

impl Resources {
    /// Requirement applied to tasks that do not declare resources
    pub fn default_requirement() -> Self {
        Self {
            cpu: Some(DEFAULT_TASK_CPU),
            memory_mb: Some(DEFAULT_TASK_MEMORY_MB),
            ..Default::default()
        }
    }
}
