use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "kanri",
    about = concat!("kanri v", env!("CARGO_PKG_VERSION"), " - a kanban board in your terminal"),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Base URL of the remote store (overrides config file and env)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show board statistics
    Summary,
    /// List tasks, optionally filtered by status
    List(ListArgs),
    /// Create a task
    Add(AddArgs),
    /// Delete a task (removes it from assigned contacts too)
    Rm(IdArg),
    /// Set a task's status
    Mv(MvArgs),
    /// Assign a contact to a task
    Assign(AssignArgs),
    /// Remove a contact from a task
    Unassign(AssignArgs),
    /// Manage contacts
    Contacts(ContactsCmd),
}

// ---------------------------------------------------------------------------
// Task command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Filter by status (todo, progress, feedback, done)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Task description
    #[arg(long)]
    pub description: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
    /// Priority (urgent, medium, low; default medium)
    #[arg(long)]
    pub priority: Option<String>,
    /// Category label shown as the card badge
    #[arg(long)]
    pub category: Option<String>,
    /// Initial status (default todo)
    #[arg(long)]
    pub status: Option<String>,
    /// Assign a contact by id (repeatable)
    #[arg(long = "assign", value_name = "CONTACT_ID")]
    pub assign: Vec<String>,
    /// Add a subtask (repeatable)
    #[arg(long = "subtask", value_name = "TEXT")]
    pub subtask: Vec<String>,
}

#[derive(Args)]
pub struct IdArg {
    /// Record id
    pub id: String,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task id
    pub id: String,
    /// Target status (todo, progress, feedback, done)
    pub status: String,
}

#[derive(Args)]
pub struct AssignArgs {
    /// Task id
    pub task: String,
    /// Contact id
    pub contact: String,
}

// ---------------------------------------------------------------------------
// Contacts subcommands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ContactsCmd {
    #[command(subcommand)]
    pub command: ContactsCommands,
}

#[derive(Subcommand)]
pub enum ContactsCommands {
    /// List contacts
    List,
    /// Add a contact
    Add(ContactAddArgs),
    /// Delete a contact (unassigns their tasks; sole-assignee tasks are
    /// deleted with them)
    Rm(IdArg),
}

#[derive(Args)]
pub struct ContactAddArgs {
    /// Contact name
    pub name: String,
    /// Email address
    #[arg(long)]
    pub email: String,
    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,
}
