use indexmap::IndexMap;

use crate::model::task::{DEFAULT_PROJECT, Task, TaskStatus};
use crate::ops::tree_ops;

/// One column of the status board
#[derive(Debug, Clone)]
pub struct StatusColumn<'a> {
    pub status: TaskStatus,
    /// Root tasks in this column, highest priority first
    pub tasks: Vec<&'a Task>,
}

impl StatusColumn<'_> {
    pub fn title(&self) -> &'static str {
        self.status.title()
    }
}

/// Group root tasks into To Do / On Progress / Done columns.
/// Within a column tasks are ordered High → Low, ties keep input order.
pub fn status_columns(tasks: &[Task]) -> Vec<StatusColumn<'_>> {
    TaskStatus::ALL
        .iter()
        .map(|&status| StatusColumn {
            status,
            tasks: sort_by_priority(tasks.iter().filter(|t| t.status == status).collect()),
        })
        .collect()
}

/// Group root tasks by project, one entry per listed project in list order.
/// The uncategorized column also collects tasks with no or an empty project.
/// Tasks assigned to an unlisted project are left out.
pub fn project_columns<'a>(tasks: &'a [Task], projects: &[String]) -> IndexMap<String, Vec<&'a Task>> {
    let mut columns = IndexMap::new();
    for project in projects {
        if columns.contains_key(project) {
            continue;
        }
        let members = tasks
            .iter()
            .filter(|t| {
                if project == DEFAULT_PROJECT {
                    t.project_or_default() == DEFAULT_PROJECT
                } else {
                    t.project.as_deref() == Some(project.as_str())
                }
            })
            .collect();
        columns.insert(project.clone(), sort_by_priority(members));
    }
    columns
}

/// Delete every root task in the given status column, with its subtree
pub fn clear_column(forest: Vec<Task>, status: TaskStatus) -> Vec<Task> {
    let doomed: Vec<String> = forest
        .iter()
        .filter(|t| t.status == status)
        .map(|t| t.id.clone())
        .collect();
    doomed
        .iter()
        .fold(forest, |forest, id| tree_ops::delete_task(forest, id))
}

fn sort_by_priority(mut tasks: Vec<&Task>) -> Vec<&Task> {
    // Stable sort keeps input order within a priority
    tasks.sort_by(|a, b| b.priority.cmp(&a.priority));
    tasks
}
