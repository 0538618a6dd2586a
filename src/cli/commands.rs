use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "qb", about = concat!("questboard v", env!("CARGO_PKG_VERSION"), " - type an outline, get a task board"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different board directory
    #[arg(short = 'C', long = "board-dir", global = true)]
    pub board_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new board in the current directory
    Init(InitArgs),
    /// Parse outline text into tasks and add them to the board
    Add(AddArgs),
    /// Parse outline text and print the result without saving
    Parse(ParseArgs),
    /// Print the task tree
    Tree(TreeArgs),
    /// Show the board grouped by status or project
    Board(BoardArgs),
    /// Show task details
    Show(IdArg),
    /// Set task status
    Status(StatusArgs),
    /// Toggle a task's checkbox (done <-> todo)
    Check(IdArg),
    /// Set or cycle task priority
    Priority(PriorityArgs),
    /// Move a task to a project
    Project(ProjectArgs),
    /// Expand or collapse a task's subtasks
    Expand(IdArg),
    /// Add a subtask
    Sub(SubArgs),
    /// Change task content
    Title(TitleArgs),
    /// Delete a task and all its subtasks
    Rm(IdArg),
    /// Delete every root task with the given status
    Clear(ClearArgs),
    /// List project columns, or add one
    Projects(ProjectsCmd),
    /// Generate a checklist of action items for a task
    Actions(IdArg),
    /// Toggle one action item of a task
    ActionToggle(ActionToggleArgs),
    /// Show task counts and quest progress
    Stats,
    /// Print the board as an indented outline
    Export(ExportArgs),
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Board name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Reinitialize even if .questboard/ already exists
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ParseArgs {
    /// File to read (default: stdin)
    pub file: Option<String>,
}

#[derive(Args)]
pub struct TreeArgs {
    /// Include subtasks of collapsed tasks
    #[arg(long)]
    pub all: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GroupBy {
    Status,
    Project,
}

#[derive(Args)]
pub struct BoardArgs {
    /// Grouping for the columns
    #[arg(long, value_enum, default_value = "status")]
    pub by: GroupBy,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Spaces per nesting level
    #[arg(long, default_value = "4")]
    pub indent: usize,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct IdArg {
    /// Task ID (any unique prefix)
    pub id: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Outline text; reads stdin when omitted or `-`
    pub text: Option<String>,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Task ID (any unique prefix)
    pub id: String,
    /// New status (todo, in-progress, done)
    pub status: String,
}

#[derive(Args)]
pub struct PriorityArgs {
    /// Task ID (any unique prefix)
    pub id: String,
    /// New priority (low, medium, high); cycles when omitted
    pub priority: Option<String>,
}

#[derive(Args)]
pub struct ProjectArgs {
    /// Task ID (any unique prefix)
    pub id: String,
    /// Project name; added to the project list if new
    pub project: String,
}

#[derive(Args)]
pub struct SubArgs {
    /// Parent task ID (any unique prefix)
    pub parent: String,
    /// Subtask content (default: "New subtask")
    pub title: Option<String>,
}

#[derive(Args)]
pub struct TitleArgs {
    /// Task ID (any unique prefix)
    pub id: String,
    /// New content
    pub title: String,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Status column to clear (todo, in-progress, done)
    pub status: String,
}

#[derive(Args)]
pub struct ProjectsCmd {
    #[command(subcommand)]
    pub action: Option<ProjectsAction>,
}

#[derive(Subcommand)]
pub enum ProjectsAction {
    /// Add a project column
    Add(ProjectsAddArgs),
}

#[derive(Args)]
pub struct ProjectsAddArgs {
    /// Project name
    pub name: String,
}

#[derive(Args)]
pub struct ActionToggleArgs {
    /// Task ID (any unique prefix)
    pub id: String,
    /// Action item ID (any unique prefix within the task)
    pub item: String,
}
