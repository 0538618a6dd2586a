use crate::model::task::{ActionItem, DEFAULT_SUBTASK_CONTENT, Priority, Task, TaskStatus};

/// Error type for resolving a user-supplied id prefix
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("id prefix {prefix} is ambiguous ({count} tasks match)")]
    Ambiguous { prefix: String, count: usize },
}

// ---------------------------------------------------------------------------
// Generic id-addressed update
// ---------------------------------------------------------------------------

/// Apply `f` to the task with the given id, wherever it lives in the forest.
/// `f` returns the replacement task, or `None` to delete it with its subtree.
/// Every other task passes through untouched. Missing ids are a no-op.
pub fn update_task<F>(mut forest: Vec<Task>, id: &str, f: F) -> Vec<Task>
where
    F: FnOnce(Task) -> Option<Task>,
{
    if !edit_in_place(&mut forest, id, f) {
        tracing::debug!(id, "no task with this id; forest unchanged");
    }
    forest
}

/// In-place form of [`update_task`]. Returns whether a task matched.
pub fn edit_in_place<F>(tasks: &mut Vec<Task>, id: &str, f: F) -> bool
where
    F: FnOnce(Task) -> Option<Task>,
{
    let mut f = Some(f);
    apply_at(tasks, id, &mut f)
}

fn apply_at<F>(tasks: &mut Vec<Task>, id: &str, f: &mut Option<F>) -> bool
where
    F: FnOnce(Task) -> Option<Task>,
{
    for idx in 0..tasks.len() {
        if tasks[idx].id == id {
            let task = tasks.remove(idx);
            let replacement = match f.take() {
                Some(f) => f(task),
                None => Some(task),
            };
            if let Some(task) = replacement {
                tasks.insert(idx, task);
            }
            return true;
        }
        if apply_at(&mut tasks[idx].subtasks, id, f) {
            return true;
        }
    }
    false
}

/// Shorthand for updates that edit a task without removing it
fn modify<F>(forest: Vec<Task>, id: &str, f: F) -> Vec<Task>
where
    F: FnOnce(&mut Task),
{
    update_task(forest, id, |mut task| {
        f(&mut task);
        Some(task)
    })
}

// ---------------------------------------------------------------------------
// Field updates
// ---------------------------------------------------------------------------

pub fn set_status(forest: Vec<Task>, id: &str, status: TaskStatus) -> Vec<Task> {
    modify(forest, id, |t| t.status = status)
}

/// Checkbox toggle: done → todo, anything else → done
pub fn toggle_done(forest: Vec<Task>, id: &str) -> Vec<Task> {
    modify(forest, id, |t| {
        t.status = match t.status {
            TaskStatus::Done => TaskStatus::Todo,
            TaskStatus::Todo | TaskStatus::InProgress => TaskStatus::Done,
        }
    })
}

/// Reassign the task's own project. Descendants keep theirs.
pub fn set_project(forest: Vec<Task>, id: &str, project: &str) -> Vec<Task> {
    modify(forest, id, |t| t.project = Some(project.to_string()))
}

pub fn set_priority(forest: Vec<Task>, id: &str, priority: Priority) -> Vec<Task> {
    modify(forest, id, |t| t.priority = priority)
}

/// Low → Medium → High → Low
pub fn cycle_priority(forest: Vec<Task>, id: &str) -> Vec<Task> {
    modify(forest, id, |t| t.priority = t.priority.next())
}

pub fn toggle_expanded(forest: Vec<Task>, id: &str) -> Vec<Task> {
    modify(forest, id, |t| t.is_expanded = !t.is_expanded)
}

/// Commit an inline edit. Whitespace is trimmed and an empty result is
/// discarded, keeping the previous content.
pub fn edit_content(forest: Vec<Task>, id: &str, new_content: &str) -> Vec<Task> {
    let content = new_content.trim();
    if content.is_empty() {
        return forest;
    }
    modify(forest, id, |t| t.content = content.to_string())
}

// ---------------------------------------------------------------------------
// Structural updates
// ---------------------------------------------------------------------------

/// Remove the task and its entire subtree
pub fn delete_task(forest: Vec<Task>, id: &str) -> Vec<Task> {
    update_task(forest, id, |_| None)
}

/// Append a default subtask to the parent and expand the parent
pub fn add_subtask(forest: Vec<Task>, parent_id: &str) -> Vec<Task> {
    add_subtask_with(forest, parent_id, DEFAULT_SUBTASK_CONTENT).0
}

/// Append a subtask with the given content to the parent and expand the
/// parent. The new subtask inherits the parent's status and starts expanded.
/// Returns the new subtask's id, or `None` when the parent does not exist.
pub fn add_subtask_with(
    forest: Vec<Task>,
    parent_id: &str,
    content: &str,
) -> (Vec<Task>, Option<String>) {
    let mut new_id = None;
    let forest = modify(forest, parent_id, |parent| {
        let mut sub = Task::new(content);
        sub.status = parent.status;
        sub.is_expanded = true;
        new_id = Some(sub.id.clone());
        parent.subtasks.push(sub);
        parent.is_expanded = true;
    });
    (forest, new_id)
}

// ---------------------------------------------------------------------------
// Action items
// ---------------------------------------------------------------------------

/// Replace the task's checklist
pub fn set_action_items(forest: Vec<Task>, id: &str, items: Vec<ActionItem>) -> Vec<Task> {
    modify(forest, id, |t| t.action_items = Some(items))
}

/// Flip `is_completed` on one checklist entry of one task
pub fn toggle_action_item(forest: Vec<Task>, task_id: &str, item_id: &str) -> Vec<Task> {
    modify(forest, task_id, |t| {
        if let Some(items) = t.action_items.as_mut()
            && let Some(item) = items.iter_mut().find(|i| i.id == item_id)
        {
            item.is_completed = !item.is_completed;
        }
    })
}

// ---------------------------------------------------------------------------
// Read helpers
// ---------------------------------------------------------------------------

/// Find a task by id anywhere in the forest
pub fn find_task<'a>(tasks: &'a [Task], id: &str) -> Option<&'a Task> {
    for task in tasks {
        if task.id == id {
            return Some(task);
        }
        if let Some(t) = find_task(&task.subtasks, id) {
            return Some(t);
        }
    }
    None
}

/// Visit every task depth-first, parents before children
pub fn for_each_task(tasks: &[Task], f: &mut dyn FnMut(&Task)) {
    for task in tasks {
        f(task);
        for_each_task(&task.subtasks, f);
    }
}

/// Count all tasks including nested subtasks
pub fn count_tasks(tasks: &[Task]) -> usize {
    let mut count = 0;
    for_each_task(tasks, &mut |_| count += 1);
    count
}

/// Every id in the forest, depth-first
pub fn collect_ids(tasks: &[Task]) -> Vec<String> {
    let mut ids = Vec::new();
    for_each_task(tasks, &mut |t| ids.push(t.id.clone()));
    ids
}

/// Resolve a full id or a unique id prefix to a full id
pub fn resolve_id_prefix(tasks: &[Task], prefix: &str) -> Result<String, ResolveError> {
    if find_task(tasks, prefix).is_some() {
        return Ok(prefix.to_string());
    }
    let matches: Vec<String> = collect_ids(tasks)
        .into_iter()
        .filter(|id| !prefix.is_empty() && id.starts_with(prefix))
        .collect();
    match matches.len() {
        0 => Err(ResolveError::NotFound(prefix.to_string())),
        1 => Ok(matches.into_iter().next().unwrap_or_default()),
        count => Err(ResolveError::Ambiguous {
            prefix: prefix.to_string(),
            count,
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
