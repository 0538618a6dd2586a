use serde::Serialize;

use crate::model::task::{ActionItem, Priority, Task, TaskStatus};
use crate::ops::colors::ProjectPalette;
use crate::ops::progress::QuestStage;
use crate::ops::views::StatusColumn;
use crate::util::unicode::fit_to_width;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ColumnJson<'a> {
    pub title: String,
    pub count: usize,
    pub tasks: Vec<&'a Task>,
}

#[derive(Serialize)]
pub struct AddedJson {
    /// Ids of the new root tasks
    pub added: Vec<String>,
    /// Number of tasks created, subtasks included
    pub total: usize,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub tasks: usize,
    pub roots: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
    pub stage: u8,
    pub stage_label: String,
    pub percent: u8,
}

pub fn status_columns_to_json<'a>(columns: &[StatusColumn<'a>]) -> Vec<ColumnJson<'a>> {
    columns
        .iter()
        .map(|c| ColumnJson {
            title: c.title().to_string(),
            count: c.tasks.len(),
            tasks: c.tasks.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn short_id(id: &str, id_len: usize) -> String {
    if id_len == 0 {
        return String::new();
    }
    let cut: String = id.chars().take(id_len).collect();
    format!("{} ", cut)
}

/// One-line summary: `[x] 1a2b3c4d Content (High) [+2]`.
/// Low priority is not shown; `[+N]` marks a collapsed task with N children.
pub fn format_task_line(task: &Task, id_len: usize) -> String {
    let priority = match task.priority {
        Priority::Low => String::new(),
        p => format!(" ({})", p),
    };
    let collapsed = if task.has_subtasks() && !task.is_expanded {
        format!(" [+{}]", task.subtasks.len())
    } else {
        String::new()
    };
    format!(
        "[{}] {}{}{}{}",
        task.status.checkbox_char(),
        short_id(&task.id, id_len),
        task.content,
        priority,
        collapsed
    )
}

/// Checklist entry: `[x] 1a2b3c4d Content`
pub fn format_action_item(item: &ActionItem, id_len: usize) -> String {
    let mark = if item.is_completed { 'x' } else { ' ' };
    format!("[{}] {}{}", mark, short_id(&item.id, id_len), item.content)
}

/// A task and its visible subtasks, two spaces per level.
/// With `show_all`, collapsed subtasks are listed too.
pub fn format_task_tree(task: &Task, depth: usize, id_len: usize, show_all: bool) -> Vec<String> {
    let mut lines = vec![format!(
        "{}{}",
        "  ".repeat(depth),
        format_task_line(task, id_len)
    )];
    if task.is_expanded || show_all {
        for sub in &task.subtasks {
            lines.extend(format_task_tree(sub, depth + 1, id_len, show_all));
        }
    }
    lines
}

pub fn format_forest(tasks: &[Task], id_len: usize, show_all: bool) -> Vec<String> {
    tasks
        .iter()
        .flat_map(|t| format_task_tree(t, 0, id_len, show_all))
        .collect()
}

/// Detailed view of one task
pub fn format_task_detail(task: &Task) -> Vec<String> {
    let mut lines = vec![format!("[{}] {}", task.status.checkbox_char(), task.content)];
    lines.push(format!("id: {}", task.id));
    lines.push(format!("status: {}", task.status));
    lines.push(format!("priority: {}", task.priority));
    if let Some(project) = &task.project {
        lines.push(format!("project: {}", project));
    }
    if let Some(description) = &task.description {
        lines.push("description:".to_string());
        for line in description.lines() {
            lines.push(format!("  {}", line));
        }
    }
    if let Some(items) = &task.action_items
        && !items.is_empty()
    {
        lines.push(String::new());
        lines.push("action items:".to_string());
        for item in items {
            lines.push(format!("  {}", format_action_item(item, 8)));
        }
    }
    if task.has_subtasks() {
        lines.push(String::new());
        lines.push("subtasks:".to_string());
        for sub in &task.subtasks {
            lines.extend(format_task_tree(sub, 1, 8, true));
        }
    }
    lines
}

/// Status columns side by side, each `width` cells wide
pub fn format_status_board(columns: &[StatusColumn<'_>], width: usize, id_len: usize) -> Vec<String> {
    let width = width.max(8);
    let bodies: Vec<Vec<String>> = columns
        .iter()
        .map(|c| {
            let mut body = vec![
                format!("{} ({})", c.title(), c.tasks.len()),
                "\u{2500}".repeat(width),
            ];
            for task in &c.tasks {
                body.extend(format_task_tree(task, 0, id_len, false));
            }
            body
        })
        .collect();

    let height = bodies.iter().map(|b| b.len()).max().unwrap_or(0);
    (0..height)
        .map(|row| {
            let cells: Vec<String> = bodies
                .iter()
                .map(|b| fit_to_width(b.get(row).map(String::as_str).unwrap_or(""), width))
                .collect();
            cells.join(" \u{2502} ").trim_end().to_string()
        })
        .collect()
}

/// Project sections stacked vertically, headings optionally colored
pub fn format_project_board(
    columns: &[(String, Vec<&Task>)],
    palette: &mut ProjectPalette,
    color: bool,
    id_len: usize,
) -> Vec<String> {
    let mut lines = Vec::new();
    for (project, tasks) in columns {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        let heading = format!("== {} ({}) ==", project, tasks.len());
        let shade = palette.color_for(project);
        lines.push(if color { shade.paint(&heading) } else { heading });
        if tasks.is_empty() {
            lines.push("  (drop tasks here with `qb project <ID> <NAME>`)".to_string());
        }
        for task in tasks {
            lines.extend(format_task_tree(task, 1, id_len, false));
        }
    }
    lines
}

/// Counts plus the quest map line
pub fn format_stats(stats: &StatsJson, quest: &QuestStage) -> Vec<String> {
    vec![
        format!(
            "{} tasks ({} root): {} todo, {} in progress, {} done",
            stats.tasks, stats.roots, stats.todo, stats.in_progress, stats.done
        ),
        format!(
            "quest: stage {}/5 {} ({}%)",
            quest.stage,
            quest.label(),
            quest.percent()
        ),
    ]
}

/// Parse a status argument, with a helpful error
pub fn parse_status_arg(s: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse(s)
        .ok_or_else(|| format!("unknown status '{}' (expected: todo, in-progress, done)", s))
}

/// Parse a priority argument, with a helpful error
pub fn parse_priority_arg(s: &str) -> Result<Priority, String> {
    Priority::parse(s)
        .ok_or_else(|| format!("unknown priority '{}' (expected: low, medium, high)", s))
}
