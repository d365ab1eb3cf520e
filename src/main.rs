//! focusboard CLI
//!
//! A personal task tracker: daily/weekly tasks, focus points, and
//! consecutive-day streaks over a local SQLite database.

use anyhow::Result;
use clap::Parser;
use focusboard::cli::{AddArgs, Cli, Command, EditArgs, ListArgs};
use focusboard::config;
use focusboard::db::Database;
use focusboard::error::ServiceError;
use focusboard::types::{Priority, TaskFilter, TaskKind, TaskUpdate};
use std::fs::OpenOptions;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let db_path = config::resolve_db_path(cli.database.as_deref());
    config::ensure_db_dir(&db_path)?;
    info!("Database: {:?}", db_path);

    let db = Database::open(&db_path)?;

    match run(&db, cli.command) {
        Ok(()) => Ok(()),
        Err(e) => {
            // Structured errors print as JSON; anything else bubbles up
            match e.downcast::<ServiceError>() {
                Ok(service_err) => {
                    eprintln!("{}", serde_json::to_string_pretty(&service_err)?);
                    std::process::exit(1);
                }
                Err(e) => Err(e),
            }
        }
    }
}

fn run(db: &Database, command: Command) -> Result<()> {
    match command {
        Command::UserAdd { username } => print_json(&db.create_user(&username)?),
        Command::Add(args) => run_add(db, args),
        Command::List(args) => run_list(db, args),
        Command::Edit(args) => run_edit(db, args),
        Command::Done { user, task_id } => print_json(&db.complete_task(task_id, user)?),
        Command::Reorder { user, task_ids } => {
            db.reorder_tasks(user, &task_ids)?;
            println!("reordered {} task(s)", task_ids.len());
            Ok(())
        }
        Command::Rm { user, task_id } => print_json(&db.delete_task(task_id, user)?),
        Command::History { user, limit } => print_json(&db.list_history(user, limit)?),
        Command::Stats { user } => match db.get_stats(user)? {
            Some(stats) => print_json(&stats),
            None => Err(ServiceError::stats_not_found(user).into()),
        },
    }
}

fn run_add(db: &Database, args: AddArgs) -> Result<()> {
    let priority = parse_priority(args.priority.as_deref())?;
    let kind = parse_kind(args.kind.as_deref())?;
    let task = db.create_task(args.user, &args.title, args.description, priority, kind)?;
    print_json(&task)
}

fn run_list(db: &Database, args: ListArgs) -> Result<()> {
    let kind = match args.kind.as_deref() {
        None => None,
        Some(s) => Some(
            TaskKind::parse(s)
                .ok_or_else(|| ServiceError::invalid_value("kind", "expected daily or weekly"))?,
        ),
    };
    let filter = TaskFilter {
        kind,
        completed: args.completed,
    };
    print_json(&db.list_tasks(args.user, filter)?)
}

fn run_edit(db: &Database, args: EditArgs) -> Result<()> {
    let mut update = TaskUpdate::new();
    if let Some(title) = args.title {
        update = update.title(title);
    }
    if let Some(description) = args.description {
        update = update.description(description);
    } else if args.clear_description {
        update = update.clear_description();
    }
    if let Some(ref priority) = args.priority {
        update = update.priority(
            Priority::parse(priority).ok_or_else(|| {
                ServiceError::invalid_value("priority", "expected low, normal, or critical")
            })?,
        );
    }
    if let Some(position) = args.position {
        update = update.position(position);
    }

    print_json(&db.update_task(args.task_id, args.user, update)?)
}

fn parse_priority(s: Option<&str>) -> Result<Priority> {
    match s {
        None => Ok(Priority::default()),
        Some(s) => Ok(Priority::parse(s).ok_or_else(|| {
            ServiceError::invalid_value("priority", "expected low, normal, or critical")
        })?),
    }
}

fn parse_kind(s: Option<&str>) -> Result<TaskKind> {
    match s {
        None => Ok(TaskKind::default()),
        Some(s) => Ok(TaskKind::parse(s)
            .ok_or_else(|| ServiceError::invalid_value("kind", "expected daily or weekly"))?),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
