use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Project given to root tasks that have not been assigned one
pub const DEFAULT_PROJECT: &str = "Uncategorized";

/// Content given to subtasks created from the board rather than from text
pub const DEFAULT_SUBTASK_CONTENT: &str = "New subtask";

/// Workflow status, shared by root tasks and subtasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// Column heading used by the status board
    pub fn title(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "On Progress",
            TaskStatus::Done => "Done",
        }
    }

    /// Parse a user-supplied status name. Accepts `todo`, `in-progress`,
    /// `inprogress`, `in_progress`, `active` and `done`, case-insensitively.
    pub fn parse(s: &str) -> Option<TaskStatus> {
        match s.trim().to_ascii_lowercase().as_str() {
            "todo" | "to-do" => Some(TaskStatus::Todo),
            "in-progress" | "inprogress" | "in_progress" | "progress" | "active" => {
                Some(TaskStatus::InProgress)
            }
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }

    /// Checkbox glyph for text output
    pub fn checkbox_char(self) -> char {
        match self {
            TaskStatus::Todo => ' ',
            TaskStatus::InProgress => '>',
            TaskStatus::Done => 'x',
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Todo => write!(f, "todo"),
            TaskStatus::InProgress => write!(f, "in-progress"),
            TaskStatus::Done => write!(f, "done"),
        }
    }
}

/// Task priority. Ordered `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Next priority in the badge cycle: Low → Medium → High → Low
    pub fn next(self) -> Priority {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }

    pub fn parse(s: &str) -> Option<Priority> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "l" => Some(Priority::Low),
            "medium" | "med" | "m" => Some(Priority::Medium),
            "high" | "h" => Some(Priority::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

/// One entry of the flat checklist attached to a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: String,
    pub content: String,
    pub is_completed: bool,
}

impl ActionItem {
    pub fn new(content: impl Into<String>) -> Self {
        ActionItem {
            id: new_id(),
            content: content.into(),
            is_completed: false,
        }
    }
}

/// A task node. Subtasks are structurally tasks too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque id, unique across the whole forest
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub status: TaskStatus,
    /// Always set on root tasks. Subtasks keep their own, usually `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default)]
    pub subtasks: Vec<Task>,
    #[serde(default)]
    pub is_expanded: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_items: Option<Vec<ActionItem>>,
}

impl Task {
    /// Create a collapsed `todo` task with a fresh id and no project
    pub fn new(content: impl Into<String>) -> Self {
        Task {
            id: new_id(),
            content: content.into(),
            status: TaskStatus::Todo,
            project: None,
            subtasks: Vec::new(),
            is_expanded: false,
            priority: Priority::Low,
            description: None,
            action_items: None,
        }
    }

    /// Project shown for grouping: empty and missing both count as uncategorized
    pub fn project_or_default(&self) -> &str {
        match self.project.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => DEFAULT_PROJECT,
        }
    }

    pub fn has_subtasks(&self) -> bool {
        !self.subtasks.is_empty()
    }
}

/// Generate a fresh opaque task id
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
