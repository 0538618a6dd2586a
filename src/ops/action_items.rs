use crate::model::task::{ActionItem, Task};
use crate::ops::tree_ops;

/// Canned checklist produced by the mock generator
const CANNED_ACTION_ITEMS: [&str; 5] = [
    "Research and gather requirements",
    "Create initial draft or prototype",
    "Review and gather feedback",
    "Make necessary revisions",
    "Final review and approval",
];

/// Mock action-item generator: the same five steps for any task, fresh ids,
/// none completed.
pub fn generate_action_items() -> Vec<ActionItem> {
    CANNED_ACTION_ITEMS.iter().map(|c| ActionItem::new(*c)).collect()
}

/// Generate a checklist and attach it to the task with `id`, replacing any
/// existing one. A task deleted in the meantime is simply skipped.
pub fn attach_generated(forest: Vec<Task>, id: &str) -> Vec<Task> {
    tree_ops::set_action_items(forest, id, generate_action_items())
}
