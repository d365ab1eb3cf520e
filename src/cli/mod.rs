//! CLI command definitions for focusboard.
//!
//! The HTTP layer that would normally resolve the authenticated principal is
//! out of scope here; every task command takes `--user` instead and the core
//! treats it as the already-resolved owner id.

use clap::{Args, Parser, Subcommand};

/// Task tracker with focus points and daily streaks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the database file (overrides FOCUSBOARD_DB and the default)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a user account (with its zeroed stats row)
    UserAdd {
        username: String,
    },
    /// Add a task to a user's board
    Add(AddArgs),
    /// List a user's tasks
    List(ListArgs),
    /// Edit task fields
    Edit(EditArgs),
    /// Mark a task complete and settle points and streak
    Done {
        #[arg(long)]
        user: i64,
        task_id: i64,
    },
    /// Reassign positions 1..N following the given id order
    Reorder {
        #[arg(long)]
        user: i64,
        task_ids: Vec<i64>,
    },
    /// Delete a task
    Rm {
        #[arg(long)]
        user: i64,
        task_id: i64,
    },
    /// Show recent completions, most recent first
    History {
        #[arg(long)]
        user: i64,
        /// Maximum entries to return (default 50)
        #[arg(long)]
        limit: Option<i64>,
    },
    /// Show focus points and streak state
    Stats {
        #[arg(long)]
        user: i64,
    },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub user: i64,

    pub title: String,

    /// Optional longer description
    #[arg(short = 'm', long)]
    pub description: Option<String>,

    /// low, normal, or critical (default: normal)
    #[arg(short, long)]
    pub priority: Option<String>,

    /// daily or weekly (default: daily)
    #[arg(short, long)]
    pub kind: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long)]
    pub user: i64,

    /// Filter by kind: daily or weekly
    #[arg(short, long)]
    pub kind: Option<String>,

    /// Filter by completion state: true or false
    #[arg(short, long)]
    pub completed: Option<bool>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    #[arg(long)]
    pub user: i64,

    pub task_id: i64,

    #[arg(long)]
    pub title: Option<String>,

    /// New description (use --clear-description to remove it)
    #[arg(short = 'm', long, conflicts_with = "clear_description")]
    pub description: Option<String>,

    /// Remove the description
    #[arg(long)]
    pub clear_description: bool,

    /// low, normal, or critical
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Manual position within the incomplete list
    #[arg(long)]
    pub position: Option<i64>,
}
