use chrono::{Local, NaiveDate};
use serde_json::json;

use crate::config::{Config, ConfigError};
use crate::model::{Contact, Priority, Status, Task};
use crate::ops::{stats, sync};
use crate::store::{RemoteStore, Store, StoreError};

use super::commands::{
    AddArgs, AssignArgs, Cli, Commands, ContactAddArgs, ContactsCommands, IdArg, ListArgs, MvArgs,
};

/// Error type for CLI command handling
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Store(#[from] StoreError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Validation(String),
}

fn invalid(message: impl Into<String>) -> CliError {
    CliError::Validation(message.into())
}

/// Resolve config (with the `--base-url` override) and build the store.
pub fn connect(cli: &Cli) -> Result<RemoteStore, CliError> {
    let mut config = Config::load()?;
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    Ok(RemoteStore::new(config.base_url.as_str(), config.timeout())?)
}

/// Dispatch a parsed CLI invocation to its handler.
pub async fn dispatch(mut cli: Cli) -> Result<(), CliError> {
    let Some(command) = cli.command.take() else {
        return Ok(());
    };
    let store = connect(&cli)?;
    let json = cli.json;
    match command {
        Commands::Summary => cmd_summary(&store, json).await,
        Commands::List(args) => cmd_list(&store, args, json).await,
        Commands::Add(args) => cmd_add(&store, args, json).await,
        Commands::Rm(args) => cmd_rm(&store, args).await,
        Commands::Mv(args) => cmd_mv(&store, args).await,
        Commands::Assign(args) => cmd_assign(&store, args, true).await,
        Commands::Unassign(args) => cmd_assign(&store, args, false).await,
        Commands::Contacts(cmd) => match cmd.command {
            ContactsCommands::List => cmd_contacts_list(&store, json).await,
            ContactsCommands::Add(args) => cmd_contacts_add(&store, args, json).await,
            ContactsCommands::Rm(args) => cmd_contacts_rm(&store, args).await,
        },
    }
}

async fn cmd_summary<S: Store>(store: &S, json: bool) -> Result<(), CliError> {
    let tasks: Vec<Task> = store.load_tasks().await?.into_values().collect();
    let figures = stats::compute(&tasks, Local::now().date_naive());
    if json {
        println!("{}", serde_json::to_string_pretty(&figures).unwrap_or_default());
        return Ok(());
    }
    println!("To do             {}", figures.todo);
    println!("In progress       {}", figures.progress);
    println!("Awaiting feedback {}", figures.feedback);
    println!("Done              {}", figures.done);
    println!("Total             {}", figures.total);
    println!("Urgent            {}", figures.urgent);
    match figures.next_urgent_due {
        Some(due) => println!("Upcoming deadline {}", due.format("%Y-%m-%d")),
        None => println!("Upcoming deadline -"),
    }
    Ok(())
}

async fn cmd_list<S: Store>(store: &S, args: ListArgs, json: bool) -> Result<(), CliError> {
    let status = args
        .status
        .as_deref()
        .map(|s| Status::parse(s).ok_or_else(|| invalid(format!("unknown status: {s}"))))
        .transpose()?;
    let tasks: Vec<Task> = store
        .load_tasks()
        .await?
        .into_values()
        .filter(|t| status.is_none_or(|s| t.status == s))
        .collect();

    if json {
        let rows: Vec<_> = tasks
            .iter()
            .map(|t| {
                let mut value = serde_json::to_value(t).unwrap_or_default();
                if let Some(map) = value.as_object_mut() {
                    map.insert("id".to_string(), json!(t.id));
                }
                value
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows).unwrap_or_default());
        return Ok(());
    }
    if tasks.is_empty() {
        println!("no tasks");
        return Ok(());
    }
    for task in &tasks {
        let due = task
            .due_date
            .map(|d| format!("  due {}", d.format("%Y-%m-%d")))
            .unwrap_or_default();
        let (done, total) = task.subtask_progress();
        let subtasks = if total > 0 {
            format!("  [{done}/{total}]")
        } else {
            String::new()
        };
        println!(
            "{}  {:<16} {:<8} {}{due}{subtasks}",
            task.id,
            format!("[{}]", task.status.label()),
            task.priority.label(),
            task.title,
        );
    }
    Ok(())
}

async fn cmd_add<S: Store>(store: &S, args: AddArgs, json: bool) -> Result<(), CliError> {
    if args.title.trim().is_empty() {
        return Err(invalid("title must not be empty"));
    }
    let status = match args.status.as_deref() {
        Some(s) => Status::parse(s).ok_or_else(|| invalid(format!("unknown status: {s}")))?,
        None => Status::Todo,
    };
    let priority = match args.priority.as_deref() {
        Some(p) => Priority::parse(p).ok_or_else(|| invalid(format!("unknown priority: {p}")))?,
        None => Priority::default(),
    };
    let due_date = args
        .due
        .as_deref()
        .map(|d| {
            NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .map_err(|_| invalid(format!("invalid due date (want YYYY-MM-DD): {d}")))
        })
        .transpose()?;

    let mut task = Task::new(args.title.trim(), status);
    task.description = args.description.unwrap_or_default();
    task.priority = priority;
    task.category = args.category.unwrap_or_default();
    task.due_date = due_date;
    task.assigned_to = args.assign;
    for text in &args.subtask {
        task.add_subtask(text);
    }

    let id = store.create_task(&task).await?;
    // Mirror the assignment on each contact's task list.
    let report = sync::assign_task_to_contacts(store, &id, &task.assigned_to).await;
    if json {
        println!("{}", json!({ "id": id }));
    } else {
        println!("created {id}");
    }
    if !report.fully_applied() {
        eprintln!(
            "warning: {} of {} contact updates failed",
            report.failed, report.attempted
        );
    }
    Ok(())
}

async fn cmd_rm<S: Store>(store: &S, args: IdArg) -> Result<(), CliError> {
    let report = sync::cascade_task_delete(store, &args.id).await?;
    println!("deleted {}", args.id);
    if !report.fully_applied() {
        eprintln!(
            "warning: {} of {} contact updates failed",
            report.failed, report.attempted
        );
    }
    Ok(())
}

async fn cmd_mv<S: Store>(store: &S, args: MvArgs) -> Result<(), CliError> {
    let status = Status::parse(&args.status)
        .ok_or_else(|| invalid(format!("unknown status: {}", args.status)))?;
    store.patch_task_status(&args.id, status).await?;
    println!("{} -> {}", args.id, status.label());
    Ok(())
}

async fn cmd_assign<S: Store>(store: &S, args: AssignArgs, add: bool) -> Result<(), CliError> {
    let task = store.fetch_task(&args.task).await?;
    // Make sure the contact exists before touching the task.
    store.fetch_contact(&args.contact).await?;

    let old = task.assigned_to.clone();
    let mut new = old.clone();
    if add {
        if new.contains(&args.contact) {
            println!("{} already assigned to {}", args.contact, args.task);
            return Ok(());
        }
        new.push(args.contact.clone());
    } else {
        if !new.contains(&args.contact) {
            println!("{} is not assigned to {}", args.contact, args.task);
            return Ok(());
        }
        new.retain(|c| c != &args.contact);
    }

    store.patch_task_assignees(&args.task, &new).await?;
    let report = sync::apply_assignment_change(store, &args.task, &old, &new).await;
    println!(
        "{} {} {}",
        args.contact,
        if add { "assigned to" } else { "removed from" },
        args.task
    );
    if !report.fully_applied() {
        eprintln!(
            "warning: {} of {} contact updates failed",
            report.failed, report.attempted
        );
    }
    Ok(())
}

async fn cmd_contacts_list<S: Store>(store: &S, json: bool) -> Result<(), CliError> {
    let mut contacts: Vec<Contact> = store.load_contacts().await?.into_values().collect();
    contacts.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    if json {
        let rows: Vec<_> = contacts
            .iter()
            .map(|c| {
                let mut value = serde_json::to_value(c).unwrap_or_default();
                if let Some(map) = value.as_object_mut() {
                    map.insert("id".to_string(), json!(c.id));
                }
                value
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows).unwrap_or_default());
        return Ok(());
    }
    if contacts.is_empty() {
        println!("no contacts");
        return Ok(());
    }
    for contact in &contacts {
        let phone = contact.phone.as_deref().unwrap_or("-");
        println!(
            "{}  {:<4} {:<24} {:<28} {}  ({} tasks)",
            contact.id,
            contact.initials,
            contact.name,
            contact.email,
            phone,
            contact.tasks.len(),
        );
    }
    Ok(())
}

async fn cmd_contacts_add<S: Store>(
    store: &S,
    args: ContactAddArgs,
    json: bool,
) -> Result<(), CliError> {
    if args.name.trim().is_empty() {
        return Err(invalid("name must not be empty"));
    }
    if !args.email.contains('@') {
        return Err(invalid(format!("invalid email: {}", args.email)));
    }
    // One contact per email address.
    let existing = store.load_contacts().await?;
    if existing
        .values()
        .any(|c| c.email.eq_ignore_ascii_case(args.email.trim()))
    {
        return Err(invalid(format!("a contact with email {} exists", args.email)));
    }

    let mut contact = Contact::new(args.name.trim(), args.email.trim());
    contact.phone = args.phone;
    let id = store.create_contact(&contact).await?;
    if json {
        println!("{}", json!({ "id": id }));
    } else {
        println!("created {id}");
    }
    Ok(())
}

async fn cmd_contacts_rm<S: Store>(store: &S, args: IdArg) -> Result<(), CliError> {
    let report = sync::cascade_contact_delete(store, &args.id).await?;
    println!("deleted {}", args.id);
    if !report.fully_applied() {
        eprintln!(
            "warning: {} of {} task updates failed",
            report.failed, report.attempted
        );
    }
    Ok(())
}
