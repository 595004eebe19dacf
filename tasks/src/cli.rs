//! Command-line surface of the `tasks` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tasks::FilterMode;

/// Keep a local list of tasks
#[derive(Debug, Parser)]
#[command(name = "tasks", version, about)]
pub struct Cli {
    /// Directory holding task data (overrides `TASKS_DATA_DIR`)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Name of the list to use (overrides `TASKS_STORAGE_KEY`)
    #[arg(long, global = true, value_name = "NAME")]
    pub key: Option<String>,

    /// What to do; shows the list when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Task(TaskCommand),

    /// Show tasks
    #[command(alias = "ls")]
    List {
        /// Which tasks to show: all, active or completed
        #[arg(short, long, default_value_t = FilterMode::All)]
        filter: FilterMode,
    },

    /// Read commands interactively until `quit` or end of input
    Shell,
}

/// Commands that change the list
#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Add a task
    Add {
        /// Task text
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Mark a task done, or not done again
    Toggle {
        /// Task id
        id: String,
    },

    /// Change a task's text
    Edit {
        /// Task id
        id: String,

        /// New text
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Delete a task
    #[command(alias = "remove")]
    Rm {
        /// Task id
        id: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete every completed task
    ClearCompleted {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// One line typed into the interactive shell
#[derive(Debug, Parser)]
#[command(no_binary_name = true)]
pub struct ShellLine {
    /// Shell command
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands available inside the shell
#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    #[command(flatten)]
    Task(TaskCommand),

    /// Show tasks with the current filter
    #[command(alias = "ls")]
    List,

    /// Switch the filter: all, active or completed
    Filter {
        /// New filter
        mode: FilterMode,
    },

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}
