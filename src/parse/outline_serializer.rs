use crate::model::task::Task;
use crate::parse::outline_parser::strip_list_marker;

/// Written before content that would otherwise lose a leading marker on
/// re-parse. It fills every marker slot, so only it gets stripped.
const MARKER_ESCAPE: &str = "- [ ] - ";

/// Render a forest back to indented plain text, one task per line,
/// `indent` spaces per nesting level. The output parses back into the same shape.
pub fn serialize_outline(tasks: &[Task], indent: usize) -> String {
    let mut out = String::new();
    let indent = indent.max(1);
    write_tasks(tasks, indent, 0, &mut out);
    out
}

fn write_tasks(tasks: &[Task], indent: usize, depth: usize, out: &mut String) {
    for task in tasks {
        for _ in 0..indent * depth {
            out.push(' ');
        }
        // Content never spans lines in a parsed forest, but edits could add them
        let content = task.content.replace(['\n', '\r'], " ");
        if strip_list_marker(&content) != content {
            out.push_str(MARKER_ESCAPE);
        }
        out.push_str(&content);
        out.push('\n');
        write_tasks(&task.subtasks, indent, depth + 1, out);
    }
}
