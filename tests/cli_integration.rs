//! Integration tests for the `qb` CLI.
//!
//! Each test creates a temp board directory, runs `qb` as a subprocess,
//! and verifies stdout and/or the files under `.questboard/`.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use serde_json::Value;

fn qb() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_qb"));
    cmd.env_remove("QB_LOG");
    cmd
}

/// Run `qb` with the given args in the given directory, returning (stdout, stderr, success).
fn run_qb(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = qb()
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run qb");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `qb` expecting success, return stdout.
fn run_qb_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_qb(dir, args);
    if !success {
        panic!(
            "qb {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Run `qb` with `input` on stdin, expecting success.
fn run_qb_stdin(dir: &Path, args: &[&str], input: &str) -> String {
    let mut child = qb()
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run qb");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(
        output.status.success(),
        "qb {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Fresh board with a small outline already added
fn setup_board(dir: &Path) {
    run_qb_ok(dir, &["init", "--name", "Test Board"]);
    run_qb_ok(dir, &["add", "Plan trip\n  Book flights\n  Pack\nLaundry"]);
}

fn tree_json(dir: &Path) -> Value {
    serde_json::from_str(&run_qb_ok(dir, &["--json", "tree"])).unwrap()
}

fn id_at(tree: &Value, path: &[usize]) -> String {
    let mut node = &tree[path[0]];
    for &i in &path[1..] {
        node = &node["subtasks"][i];
    }
    node["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[test]
fn test_init_creates_board() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_qb_ok(tmp.path(), &["init", "--name", "Errands"]);
    assert!(out.contains("Initialized questboard: Errands"));

    let config = fs::read_to_string(tmp.path().join(".questboard/config.toml")).unwrap();
    assert!(config.contains("name = \"Errands\""));
    assert!(tmp.path().join(".questboard/board.json").exists());
}

#[test]
fn test_init_twice_requires_force() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_qb_ok(tmp.path(), &["init"]);
    let (_, stderr, success) = run_qb(tmp.path(), &["init"]);
    assert!(!success);
    assert!(stderr.contains("already exists"));
    run_qb_ok(tmp.path(), &["init", "--force"]);
}

#[test]
fn test_command_outside_board_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_qb(tmp.path(), &["tree"]);
    assert!(!success);
    assert!(stderr.contains("qb init"));
}

// ---------------------------------------------------------------------------
// Adding and reading
// ---------------------------------------------------------------------------

#[test]
fn test_add_builds_forest() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());

    let tree = tree_json(tmp.path());
    let roots = tree.as_array().unwrap();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0]["content"], "Plan trip");
    assert_eq!(roots[0]["project"], "Uncategorized");
    assert_eq!(roots[0]["status"], "todo");
    assert_eq!(roots[0]["priority"], "Low");
    assert_eq!(roots[0]["isExpanded"], false);
    assert_eq!(roots[0]["subtasks"][1]["content"], "Pack");
    assert!(roots[0]["subtasks"][0].get("project").is_none());
    assert_eq!(roots[1]["content"], "Laundry");
}

#[test]
fn test_add_from_stdin_strips_markers() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_qb_ok(tmp.path(), &["init"]);
    let out = run_qb_stdin(
        tmp.path(),
        &["--json", "add"],
        "- [ ] Groceries\n  - [x] Milk\n\n  * Eggs\n",
    );
    let added: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(added["added"].as_array().unwrap().len(), 1);
    assert_eq!(added["total"], 3);

    let tree = tree_json(tmp.path());
    assert_eq!(tree[0]["content"], "Groceries");
    assert_eq!(tree[0]["subtasks"][0]["content"], "Milk");
    // A checked box does not mark the task done
    assert_eq!(tree[0]["subtasks"][0]["status"], "todo");
    assert_eq!(tree[0]["subtasks"][1]["content"], "Eggs");
}

#[test]
fn test_add_blank_input_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_qb_ok(tmp.path(), &["init"]);
    let (_, stderr, success) = run_qb(tmp.path(), &["add", "  \n\n"]);
    assert!(!success);
    assert!(stderr.contains("no tasks found"));
}

#[test]
fn test_add_appends_to_existing_roots() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());
    run_qb_ok(tmp.path(), &["add", "Taxes"]);
    let tree = tree_json(tmp.path());
    assert_eq!(tree.as_array().unwrap().len(), 3);
    assert_eq!(tree[2]["content"], "Taxes");
}

#[test]
fn test_parse_is_a_dry_run() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_qb_stdin(tmp.path(), &["parse"], "A\n    B\n        C\nD\n");
    assert_eq!(out, "[ ] A [+1]\n  [ ] B [+1]\n    [ ] C\n[ ] D\n");
    assert!(!tmp.path().join(".questboard").exists());
}

#[test]
fn test_tree_hides_collapsed_subtasks() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());

    let out = run_qb_ok(tmp.path(), &["tree"]);
    assert_eq!(out.lines().count(), 2);
    assert!(out.contains("Plan trip [+2]"));

    let out = run_qb_ok(tmp.path(), &["tree", "--all"]);
    assert_eq!(out.lines().count(), 4);
    assert!(out.contains("Book flights"));
}

#[test]
fn test_show_by_prefix() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());
    let id = id_at(&tree_json(tmp.path()), &[0]);

    let out = run_qb_ok(tmp.path(), &["show", &id[..8]]);
    assert!(out.starts_with("[ ] Plan trip"));
    assert!(out.contains(&format!("id: {}", id)));
    assert!(out.contains("subtasks:"));
}

#[test]
fn test_show_not_found() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());
    let (_, stderr, success) = run_qb(tmp.path(), &["show", "zzzz"]);
    assert!(!success);
    assert!(stderr.contains("task not found: zzzz"));
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

#[test]
fn test_status_on_nested_task() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());
    let id = id_at(&tree_json(tmp.path()), &[0, 1]);

    let out = run_qb_ok(tmp.path(), &["status", &id, "in-progress"]);
    assert!(out.starts_with("[>]"));
    assert!(out.contains("Pack"));

    let tree = tree_json(tmp.path());
    assert_eq!(tree[0]["subtasks"][1]["status"], "inProgress");
    assert_eq!(tree[0]["status"], "todo");
}

#[test]
fn test_status_rejects_unknown_value() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());
    let id = id_at(&tree_json(tmp.path()), &[1]);
    let (_, stderr, success) = run_qb(tmp.path(), &["status", &id, "blocked"]);
    assert!(!success);
    assert!(stderr.contains("unknown status"));
}

#[test]
fn test_check_toggles_done() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());
    let id = id_at(&tree_json(tmp.path()), &[1]);

    run_qb_ok(tmp.path(), &["check", &id]);
    assert_eq!(tree_json(tmp.path())[1]["status"], "done");
    run_qb_ok(tmp.path(), &["check", &id]);
    assert_eq!(tree_json(tmp.path())[1]["status"], "todo");
}

#[test]
fn test_priority_set_and_cycle() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());
    let id = id_at(&tree_json(tmp.path()), &[1]);

    run_qb_ok(tmp.path(), &["priority", &id, "high"]);
    assert_eq!(tree_json(tmp.path())[1]["priority"], "High");
    run_qb_ok(tmp.path(), &["priority", &id]);
    assert_eq!(tree_json(tmp.path())[1]["priority"], "Low");
}

#[test]
fn test_project_adds_column_to_config() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());
    let id = id_at(&tree_json(tmp.path()), &[1]);

    run_qb_ok(tmp.path(), &["project", &id, "Home"]);
    assert_eq!(tree_json(tmp.path())[1]["project"], "Home");

    let config = fs::read_to_string(tmp.path().join(".questboard/config.toml")).unwrap();
    assert!(config.contains("\"Home\""));
    // Template comments survive the edit
    assert!(config.contains("# Project columns"));

    let out = run_qb_ok(tmp.path(), &["--json", "board", "--by", "project"]);
    let columns: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(columns[0]["title"], "Uncategorized");
    assert_eq!(columns[0]["count"], 1);
    assert_eq!(columns[1]["title"], "Home");
    assert_eq!(columns[1]["tasks"][0]["content"], "Laundry");
}

#[test]
fn test_expand_toggles_visibility() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());
    let id = id_at(&tree_json(tmp.path()), &[0]);

    run_qb_ok(tmp.path(), &["expand", &id]);
    let out = run_qb_ok(tmp.path(), &["tree"]);
    assert_eq!(out.lines().count(), 4);
}

#[test]
fn test_sub_appends_and_expands_parent() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());
    let parent = id_at(&tree_json(tmp.path()), &[0]);
    run_qb_ok(tmp.path(), &["status", &parent, "done"]);

    let sub_id = run_qb_ok(tmp.path(), &["sub", &parent]).trim().to_string();
    let tree = tree_json(tmp.path());
    assert_eq!(tree[0]["isExpanded"], true);
    let sub = &tree[0]["subtasks"][2];
    assert_eq!(sub["id"], sub_id.as_str());
    assert_eq!(sub["content"], "New subtask");
    assert_eq!(sub["status"], "done");
    assert_eq!(sub["isExpanded"], true);

    run_qb_ok(tmp.path(), &["sub", &sub_id, "Passport"]);
    let tree = tree_json(tmp.path());
    assert_eq!(tree[0]["subtasks"][2]["subtasks"][0]["content"], "Passport");
}

#[test]
fn test_title_edits_content() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());
    let id = id_at(&tree_json(tmp.path()), &[0, 0]);

    run_qb_ok(tmp.path(), &["title", &id, "  Book cheap flights  "]);
    assert_eq!(tree_json(tmp.path())[0]["subtasks"][0]["content"], "Book cheap flights");

    let (_, _, success) = run_qb(tmp.path(), &["title", &id, "   "]);
    assert!(!success);
}

#[test]
fn test_rm_removes_subtree() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());
    let id = id_at(&tree_json(tmp.path()), &[0]);

    let out = run_qb_ok(tmp.path(), &["rm", &id]);
    assert_eq!(out.trim(), "removed 3 task(s)");
    let tree = tree_json(tmp.path());
    assert_eq!(tree.as_array().unwrap().len(), 1);
    assert_eq!(tree[0]["content"], "Laundry");
}

#[test]
fn test_clear_done_column() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());
    let id = id_at(&tree_json(tmp.path()), &[1]);
    run_qb_ok(tmp.path(), &["check", &id]);

    let out = run_qb_ok(tmp.path(), &["clear", "done"]);
    assert_eq!(out.trim(), "cleared Done: removed 1 task(s)");
    assert_eq!(tree_json(tmp.path()).as_array().unwrap().len(), 1);
}

#[test]
fn test_action_items_generate_and_toggle() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());
    let id = id_at(&tree_json(tmp.path()), &[1]);

    let out = run_qb_ok(tmp.path(), &["--json", "actions", &id]);
    let items: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(items.as_array().unwrap().len(), 5);
    let item_id = items[2]["id"].as_str().unwrap().to_string();

    run_qb_ok(tmp.path(), &["action-toggle", &id, &item_id]);
    let tree = tree_json(tmp.path());
    assert_eq!(tree[1]["actionItems"][2]["isCompleted"], true);
    assert_eq!(tree[1]["actionItems"][0]["isCompleted"], false);
}

// ---------------------------------------------------------------------------
// Views and export
// ---------------------------------------------------------------------------

#[test]
fn test_board_by_status_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());
    let id = id_at(&tree_json(tmp.path()), &[1]);
    run_qb_ok(tmp.path(), &["check", &id]);

    let out = run_qb_ok(tmp.path(), &["--json", "board"]);
    let columns: Value = serde_json::from_str(&out).unwrap();
    let titles: Vec<&str> = columns
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["To Do", "On Progress", "Done"]);
    assert_eq!(columns[0]["count"], 1);
    assert_eq!(columns[2]["tasks"][0]["content"], "Laundry");
}

#[test]
fn test_board_text_has_column_headings() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());
    let out = run_qb_ok(tmp.path(), &["board"]);
    let first = out.lines().next().unwrap();
    assert!(first.starts_with("To Do (2)"));
    assert!(first.contains("On Progress (0)"));
    assert!(first.contains("Done (0)"));
}

#[test]
fn test_stats_reports_quest_stage() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());
    let id = id_at(&tree_json(tmp.path()), &[1]);
    run_qb_ok(tmp.path(), &["check", &id]);

    let out = run_qb_ok(tmp.path(), &["--json", "stats"]);
    let stats: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(stats["tasks"], 4);
    assert_eq!(stats["roots"], 2);
    assert_eq!(stats["done"], 1);
    // 1 of 2 roots done: ceil(0.5 * 5) = 3
    assert_eq!(stats["stage"], 3);
    assert_eq!(stats["stage_label"], "Mystic Peak");
}

#[test]
fn test_export_round_trips_through_add() {
    let tmp = tempfile::TempDir::new().unwrap();
    setup_board(tmp.path());
    let out = run_qb_ok(tmp.path(), &["export", "--indent", "2"]);
    assert_eq!(out, "Plan trip\n  Book flights\n  Pack\nLaundry\n");

    let other = tempfile::TempDir::new().unwrap();
    run_qb_ok(other.path(), &["init"]);
    run_qb_stdin(other.path(), &["add"], &out);
    assert_eq!(run_qb_ok(other.path(), &["export", "--indent", "2"]), out);
}

#[test]
fn test_board_dir_flag() {
    let tmp = tempfile::TempDir::new().unwrap();
    let board = tmp.path().join("board");
    let elsewhere = tmp.path().join("elsewhere");
    fs::create_dir_all(&board).unwrap();
    fs::create_dir_all(&elsewhere).unwrap();

    let board_arg = board.to_str().unwrap();
    run_qb_ok(&elsewhere, &["-C", board_arg, "init"]);
    run_qb_ok(&elsewhere, &["-C", board_arg, "add", "Water plants"]);
    let out = run_qb_ok(&elsewhere, &["-C", board_arg, "export"]);
    assert_eq!(out, "Water plants\n");
    assert!(!elsewhere.join(".questboard").exists());
}
