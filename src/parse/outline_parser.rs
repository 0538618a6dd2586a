use std::sync::LazyLock;

use regex::Regex;

use crate::model::task::{DEFAULT_PROJECT, Task};

/// Leading list marker: optional bullet, optional checkbox, optional second bullet.
/// The leading bullet needs no space after it (`-Task` is `Task`); the second
/// one does, so `- -5 degrees` keeps `-5 degrees`.
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[-*+]\s*)?(?:\[[ xX]\]\s*)?(?:[-*+]\s+)?").expect("valid list marker regex")
});

/// Knobs for outline parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Indentation unit used when no line in the input is indented
    pub fallback_unit: usize,
    /// Project given to every root task
    pub default_project: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            fallback_unit: 4,
            default_project: DEFAULT_PROJECT.to_string(),
        }
    }
}

/// One non-blank input line, reduced to its indentation and content
#[derive(Debug, Clone, PartialEq, Eq)]
struct OutlineLine {
    indent: usize,
    content: String,
}

/// Parse free-form indented text into a forest of tasks using default options.
pub fn parse_task_input(text: &str) -> Vec<Task> {
    parse_task_input_with(text, &ParseOptions::default())
}

/// Parse free-form indented text into a forest of tasks.
///
/// Indentation is quantized by the smallest positive indentation seen in the
/// input, so two-space, four-space and tab outlines all nest the same way.
/// Never fails: blank input yields an empty forest, and inconsistent
/// indentation degrades to a flatter tree.
pub fn parse_task_input_with(text: &str, opts: &ParseOptions) -> Vec<Task> {
    let lines: Vec<OutlineLine> = text.lines().filter_map(outline_line).collect();
    if lines.is_empty() {
        return Vec::new();
    }

    let unit = base_unit(&lines, opts.fallback_unit);
    let mut roots = Vec::new();
    // Open ancestors, shallowest first, each tagged with its depth level
    let mut open: Vec<(usize, Task)> = Vec::new();

    for line in lines {
        let depth = line.indent / unit;
        close_levels(&mut open, &mut roots, depth, &opts.default_project);
        open.push((depth, Task::new(line.content)));
    }
    close_levels(&mut open, &mut roots, 0, &opts.default_project);

    tracing::debug!(unit, roots = roots.len(), "parsed outline");
    roots
}

/// Strip a single leading Markdown list/task marker (`- `, `* `, `+ `,
/// `[ ]`, `[x]`, `- [X] `, ...). Nested occurrences are left alone.
pub fn strip_list_marker(line: &str) -> &str {
    match LIST_MARKER.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// Number of leading whitespace characters (a tab counts as one).
/// An all-whitespace line reports its full length.
pub fn indentation(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn outline_line(raw: &str) -> Option<OutlineLine> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let content = strip_list_marker(trimmed).trim();
    if content.is_empty() {
        return None;
    }
    Some(OutlineLine {
        indent: indentation(raw),
        content: content.to_string(),
    })
}

/// Smallest positive indentation, or the fallback when nothing is indented
fn base_unit(lines: &[OutlineLine], fallback: usize) -> usize {
    lines
        .iter()
        .map(|l| l.indent)
        .filter(|&i| i > 0)
        .min()
        .unwrap_or(fallback)
        .max(1)
}

/// Close every open node at `depth` or deeper, attaching each to the node
/// beneath it. A node with nothing beneath it becomes a root.
fn close_levels(
    open: &mut Vec<(usize, Task)>,
    roots: &mut Vec<Task>,
    depth: usize,
    default_project: &str,
) {
    while open.last().is_some_and(|(level, _)| *level >= depth) {
        let Some((_, task)) = open.pop() else { break };
        match open.last_mut() {
            Some((_, parent)) => parent.subtasks.push(task),
            None => {
                let mut root = task;
                root.project = Some(default_project.to_string());
                roots.push(root);
            }
        }
    }
}
