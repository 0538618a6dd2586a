mod init;
pub use init::cmd_init;

use std::io::Read;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;

/// Global override for the board directory (set by -C flag)
static BOARD_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::board_io::{self, BoardError};
use crate::io::config_io;
use crate::model::board::Session;
use crate::model::task::{DEFAULT_SUBTASK_CONTENT, Task, TaskStatus};
use crate::ops::colors::ProjectPalette;
use crate::ops::{action_items, progress, tree_ops, views};
use crate::parse::{self, ParseOptions};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;

    match cli.command {
        // Init creates the board directory itself, so it takes the raw -C path
        Commands::Init(args) => cmd_init(args, cli.board_dir.as_deref()),
        cmd => {
            // Store -C override for load_session_cwd()
            if let Some(ref dir) = cli.board_dir {
                let abs = std::fs::canonicalize(dir)
                    .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
                BOARD_DIR_OVERRIDE
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .replace(abs);
            }
            run(cmd, json)
        }
    }
}

fn run(cmd: Commands, json: bool) -> CmdResult {
    match cmd {
        Commands::Init(args) => cmd_init(args, None),

        // Read commands
        Commands::Parse(args) => cmd_parse(args, json),
        Commands::Tree(args) => cmd_tree(args, json),
        Commands::Board(args) => cmd_board(args, json),
        Commands::Show(args) => cmd_show(args, json),
        Commands::Projects(args) => cmd_projects(args, json),
        Commands::Stats => cmd_stats(json),
        Commands::Export(args) => cmd_export(args),

        // Write commands
        Commands::Add(args) => cmd_add(args, json),
        Commands::Status(args) => cmd_status(args, json),
        Commands::Check(args) => cmd_check(args, json),
        Commands::Priority(args) => cmd_priority(args, json),
        Commands::Project(args) => cmd_project(args, json),
        Commands::Expand(args) => cmd_expand(args, json),
        Commands::Sub(args) => cmd_sub(args),
        Commands::Title(args) => cmd_title(args, json),
        Commands::Rm(args) => cmd_rm(args),
        Commands::Clear(args) => cmd_clear(args),
        Commands::Actions(args) => cmd_actions(args, json),
        Commands::ActionToggle(args) => cmd_action_toggle(args, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_session_cwd() -> Result<Session, BoardError> {
    let start = match BOARD_DIR_OVERRIDE
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .as_ref()
    {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let root = board_io::discover_board(&start)?;
    board_io::load_session(&root)
}

fn save(session: &mut Session) -> Result<(), BoardError> {
    board_io::save_board(&session.board_dir, &mut session.board)
}

/// Run a forest transformation against the session's tasks
fn apply<F>(session: &mut Session, f: F)
where
    F: FnOnce(Vec<Task>) -> Vec<Task>,
{
    let tasks = std::mem::take(&mut session.board.tasks);
    session.board.tasks = f(tasks);
}

fn resolve(session: &Session, prefix: &str) -> Result<String, tree_ops::ResolveError> {
    tree_ops::resolve_id_prefix(&session.board.tasks, prefix)
}

fn parse_options(session: &Session) -> ParseOptions {
    ParseOptions {
        fallback_unit: session.config.parser.fallback_unit,
        default_project: session.config.parser.default_project.clone(),
    }
}

/// Read outline text from the argument, or from stdin when it is absent or `-`
fn read_text_arg(text: Option<String>) -> std::io::Result<String> {
    match text {
        Some(t) if t != "-" => Ok(t),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Append a project to the config's project list if it is not there yet
fn ensure_project(session: &mut Session, project: &str) -> Result<bool, BoardError> {
    if project.is_empty() || session.config.projects.names.iter().any(|n| n == project) {
        return Ok(false);
    }
    let (_, mut doc) = config_io::read_config(&session.board_dir)?;
    let added = config_io::add_project_to_config(&mut doc, project);
    if added {
        config_io::write_config(&session.board_dir, &doc)?;
        session.config.projects.names.push(project.to_string());
        tracing::info!(project, "added project column");
    }
    Ok(added)
}

/// Print the task with `id` after a write, as JSON or a single line
fn print_task(session: &Session, id: &str, json: bool) -> CmdResult {
    let task = tree_ops::find_task(&session.board.tasks, id)
        .ok_or_else(|| format!("task not found: {}", id))?;
    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
    } else {
        println!("{}", format_task_line(task, session.config.ui.id_length));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_parse(args: ParseArgs, json: bool) -> CmdResult {
    let text = match args.file.as_deref() {
        Some(path) if path != "-" => std::fs::read_to_string(path)
            .map_err(|e| format!("could not read {}: {}", path, e))?,
        _ => read_text_arg(None)?,
    };
    // Dry run: board settings are used when there is a board, defaults otherwise
    let opts = match load_session_cwd() {
        Ok(session) => parse_options(&session),
        Err(_) => ParseOptions::default(),
    };
    let tasks = parse::parse_task_input_with(&text, &opts);

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else {
        for line in format_forest(&tasks, 0, true) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_tree(args: TreeArgs, json: bool) -> CmdResult {
    let session = load_session_cwd()?;
    let tasks = &session.board.tasks;

    if json {
        println!("{}", serde_json::to_string_pretty(tasks)?);
    } else if tasks.is_empty() {
        println!("(board is empty)");
    } else {
        for line in format_forest(tasks, session.config.ui.id_length, args.all) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_board(args: BoardArgs, json: bool) -> CmdResult {
    let session = load_session_cwd()?;
    let tasks = &session.board.tasks;
    let ui = &session.config.ui;

    match args.by {
        GroupBy::Status => {
            let columns = views::status_columns(tasks);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&status_columns_to_json(&columns))?
                );
            } else {
                for line in format_status_board(&columns, ui.column_width, ui.id_length) {
                    println!("{}", line);
                }
            }
        }
        GroupBy::Project => {
            let columns = views::project_columns(tasks, &session.config.projects.names);
            if json {
                let out: Vec<ColumnJson> = columns
                    .iter()
                    .map(|(name, tasks)| ColumnJson {
                        title: name.clone(),
                        count: tasks.len(),
                        tasks: tasks.clone(),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                let columns: Vec<(String, Vec<&Task>)> = columns.into_iter().collect();
                let mut palette = ProjectPalette::new();
                for line in format_project_board(&columns, &mut palette, ui.color, ui.id_length) {
                    println!("{}", line);
                }
            }
        }
    }
    Ok(())
}

fn cmd_show(args: IdArg, json: bool) -> CmdResult {
    let session = load_session_cwd()?;
    let id = resolve(&session, &args.id)?;
    let task = tree_ops::find_task(&session.board.tasks, &id)
        .ok_or_else(|| format!("task not found: {}", args.id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
    } else {
        for line in format_task_detail(task) {
            println!("{}", line);
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct ProjectInfo<'a> {
    name: &'a str,
    tasks: usize,
}

fn cmd_projects(args: ProjectsCmd, json: bool) -> CmdResult {
    let mut session = load_session_cwd()?;

    if let Some(ProjectsAction::Add(add)) = args.action {
        let name = add.name.trim();
        if name.is_empty() {
            return Err("project name cannot be empty".into());
        }
        if ensure_project(&mut session, name)? {
            println!("added project: {}", name);
        } else {
            println!("project already listed: {}", name);
        }
        return Ok(());
    }

    let columns = views::project_columns(&session.board.tasks, &session.config.projects.names);
    let infos: Vec<ProjectInfo> = columns
        .iter()
        .map(|(name, tasks)| ProjectInfo {
            name: name.as_str(),
            tasks: tasks.len(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
    } else {
        let mut palette = ProjectPalette::new();
        for info in &infos {
            let color = palette.color_for(info.name);
            println!("{:<20} {:>3}  {}", info.name, info.tasks, color.name());
        }
    }
    Ok(())
}

fn cmd_stats(json: bool) -> CmdResult {
    let session = load_session_cwd()?;
    let tasks = &session.board.tasks;

    let mut by_status = [0usize; 3];
    tree_ops::for_each_task(tasks, &mut |t| {
        let slot = match t.status {
            TaskStatus::Todo => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Done => 2,
        };
        by_status[slot] += 1;
    });
    let quest = progress::quest_stage(tasks);
    let stats = StatsJson {
        tasks: tree_ops::count_tasks(tasks),
        roots: tasks.len(),
        todo: by_status[0],
        in_progress: by_status[1],
        done: by_status[2],
        stage: quest.stage,
        stage_label: quest.label().to_string(),
        percent: quest.percent(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        for line in format_stats(&stats, &quest) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_export(args: ExportArgs) -> CmdResult {
    let session = load_session_cwd()?;
    print!(
        "{}",
        parse::serialize_outline(&session.board.tasks, args.indent)
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, json: bool) -> CmdResult {
    let mut session = load_session_cwd()?;
    let text = read_text_arg(args.text)?;
    let opts = parse_options(&session);
    let new_tasks = parse::parse_task_input_with(&text, &opts);
    if new_tasks.is_empty() {
        return Err("no tasks found in input".into());
    }

    ensure_project(&mut session, &opts.default_project)?;
    let added = AddedJson {
        added: new_tasks.iter().map(|t| t.id.clone()).collect(),
        total: tree_ops::count_tasks(&new_tasks),
    };
    let lines = format_forest(&new_tasks, session.config.ui.id_length, true);
    session.board.tasks.extend(new_tasks);
    save(&mut session)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&added)?);
    } else {
        for line in lines {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_status(args: StatusArgs, json: bool) -> CmdResult {
    let status = parse_status_arg(&args.status)?;
    let mut session = load_session_cwd()?;
    let id = resolve(&session, &args.id)?;
    apply(&mut session, |f| tree_ops::set_status(f, &id, status));
    save(&mut session)?;
    print_task(&session, &id, json)
}

fn cmd_check(args: IdArg, json: bool) -> CmdResult {
    let mut session = load_session_cwd()?;
    let id = resolve(&session, &args.id)?;
    apply(&mut session, |f| tree_ops::toggle_done(f, &id));
    save(&mut session)?;
    print_task(&session, &id, json)
}

fn cmd_priority(args: PriorityArgs, json: bool) -> CmdResult {
    let priority = args
        .priority
        .as_deref()
        .map(parse_priority_arg)
        .transpose()?;
    let mut session = load_session_cwd()?;
    let id = resolve(&session, &args.id)?;
    match priority {
        Some(p) => apply(&mut session, |f| tree_ops::set_priority(f, &id, p)),
        None => apply(&mut session, |f| tree_ops::cycle_priority(f, &id)),
    }
    save(&mut session)?;
    print_task(&session, &id, json)
}

fn cmd_project(args: ProjectArgs, json: bool) -> CmdResult {
    let project = args.project.trim().to_string();
    if project.is_empty() {
        return Err("project name cannot be empty".into());
    }
    let mut session = load_session_cwd()?;
    let id = resolve(&session, &args.id)?;
    apply(&mut session, |f| tree_ops::set_project(f, &id, &project));
    if ensure_project(&mut session, &project)? && !json {
        eprintln!("added project column: {}", project);
    }
    save(&mut session)?;
    print_task(&session, &id, json)
}

fn cmd_expand(args: IdArg, json: bool) -> CmdResult {
    let mut session = load_session_cwd()?;
    let id = resolve(&session, &args.id)?;
    apply(&mut session, |f| tree_ops::toggle_expanded(f, &id));
    save(&mut session)?;
    print_task(&session, &id, json)
}

fn cmd_sub(args: SubArgs) -> CmdResult {
    let mut session = load_session_cwd()?;
    let parent = resolve(&session, &args.parent)?;
    let content = args
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_SUBTASK_CONTENT);

    let tasks = std::mem::take(&mut session.board.tasks);
    let (tasks, sub_id) = tree_ops::add_subtask_with(tasks, &parent, content);
    session.board.tasks = tasks;
    let sub_id = sub_id.ok_or_else(|| format!("task not found: {}", args.parent))?;

    save(&mut session)?;
    println!("{}", sub_id);
    Ok(())
}

fn cmd_title(args: TitleArgs, json: bool) -> CmdResult {
    if args.title.trim().is_empty() {
        return Err("title cannot be empty".into());
    }
    let mut session = load_session_cwd()?;
    let id = resolve(&session, &args.id)?;
    apply(&mut session, |f| tree_ops::edit_content(f, &id, &args.title));
    save(&mut session)?;
    print_task(&session, &id, json)
}

fn cmd_rm(args: IdArg) -> CmdResult {
    let mut session = load_session_cwd()?;
    let id = resolve(&session, &args.id)?;
    let before = tree_ops::count_tasks(&session.board.tasks);
    apply(&mut session, |f| tree_ops::delete_task(f, &id));
    let removed = before - tree_ops::count_tasks(&session.board.tasks);
    save(&mut session)?;
    println!("removed {} task(s)", removed);
    Ok(())
}

fn cmd_clear(args: ClearArgs) -> CmdResult {
    let status = parse_status_arg(&args.status)?;
    let mut session = load_session_cwd()?;
    let before = tree_ops::count_tasks(&session.board.tasks);
    apply(&mut session, |f| views::clear_column(f, status));
    let removed = before - tree_ops::count_tasks(&session.board.tasks);
    save(&mut session)?;
    println!("cleared {}: removed {} task(s)", status.title(), removed);
    Ok(())
}

fn cmd_actions(args: IdArg, json: bool) -> CmdResult {
    let mut session = load_session_cwd()?;
    let id = resolve(&session, &args.id)?;
    apply(&mut session, |f| action_items::attach_generated(f, &id));
    save(&mut session)?;

    let task = tree_ops::find_task(&session.board.tasks, &id)
        .ok_or_else(|| format!("task not found: {}", args.id))?;
    let items = task.action_items.as_deref().unwrap_or_default();
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        for item in items {
            println!("{}", format_action_item(item, 8));
        }
    }
    Ok(())
}

fn cmd_action_toggle(args: ActionToggleArgs, json: bool) -> CmdResult {
    let mut session = load_session_cwd()?;
    let id = resolve(&session, &args.id)?;
    let task = tree_ops::find_task(&session.board.tasks, &id)
        .ok_or_else(|| format!("task not found: {}", args.id))?;
    let items = task.action_items.as_deref().unwrap_or_default();

    let matches: Vec<&str> = items
        .iter()
        .filter(|i| i.id.starts_with(&args.item))
        .map(|i| i.id.as_str())
        .collect();
    let item_id = match matches.as_slice() {
        [] => return Err(format!("action item not found: {}", args.item).into()),
        [one] => one.to_string(),
        many => {
            return Err(format!(
                "action item prefix {} is ambiguous ({} items match)",
                args.item,
                many.len()
            )
            .into());
        }
    };

    apply(&mut session, |f| tree_ops::toggle_action_item(f, &id, &item_id));
    save(&mut session)?;
    print_task(&session, &id, json)
}
