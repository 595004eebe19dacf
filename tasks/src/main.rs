//! `tasks` - command-line driver for the task list.
//!
//! One-shot subcommands print the list once after the change; `tasks shell`
//! keeps the store open and prints a fresh frame after every command.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, ShellCommand, ShellLine, TaskCommand};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tasklist_core::environment::SystemClock;
use tasks::config::DEFAULT_LOG_FILTER;
use tasks::driver::Screen;
use tasks::ids::TimeRandomIds;
use tasks::{
    Config, FileSlot, FilterMode, ItemId, ItemRepository, TaskCommands, TaskEnvironment, TaskStore,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // A missing .env file is normal
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(key) = cli.key {
        config = config.with_storage_key(key);
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let slot = FileSlot::open(&config.data_dir)
        .with_context(|| format!("cannot use data directory {}", config.data_dir.display()))?;
    let clock = Arc::new(SystemClock);
    let env = TaskEnvironment::new(
        clock.clone(),
        Arc::new(TimeRandomIds::new(clock)),
        ItemRepository::new(Arc::new(slot), config.storage_key.clone()),
    );

    let screen = Screen::new();
    let mut store = tasks::open(env, screen.observer());
    let mut input = io::stdin().lock();

    match cli.command.unwrap_or(Command::List {
        filter: FilterMode::All,
    }) {
        Command::Task(command) => run_task_command(&mut store, command, &mut input)?,
        Command::List { filter } => {
            store.set_filter(filter);
        },
        Command::Shell => return run_shell(&mut store, &screen, &mut input),
    }

    print_frame(&screen);
    Ok(())
}

fn run_task_command(
    store: &mut TaskStore,
    command: TaskCommand,
    input: &mut impl BufRead,
) -> Result<()> {
    let changed = match command {
        TaskCommand::Add { text } => store.add(text.join(" ")),
        TaskCommand::Toggle { id } => store.toggle(&ItemId::from(id)),
        TaskCommand::Edit { id, text } => store.edit(&ItemId::from(id), text.join(" ")),
        TaskCommand::Rm { id, yes } => {
            let id = ItemId::from(id);
            store.state().exists(&id)
                && (yes || confirm(&mut *input, "Delete this task?")?)
                && store.remove(&id)
        },
        TaskCommand::ClearCompleted { yes } => {
            store.state().completed_count() > 0
                && (yes || confirm(&mut *input, "Remove all completed tasks?")?)
                && store.clear_completed()
        },
    };

    if !changed {
        tracing::info!("Nothing changed");
    }
    Ok(())
}

fn run_shell(store: &mut TaskStore, screen: &Screen, input: &mut impl BufRead) -> Result<()> {
    print_frame(screen);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("reading command")? == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        match ShellLine::try_parse_from(words) {
            Ok(ShellLine { command }) => match command {
                ShellCommand::Task(command) => run_task_command(store, command, &mut *input)?,
                ShellCommand::List => store.refresh(),
                ShellCommand::Filter { mode } => {
                    store.set_filter(mode);
                },
                ShellCommand::Quit => break,
            },
            Err(error) => {
                let _ = error.print();
            },
        }

        print_frame(screen);
    }

    Ok(())
}

fn confirm(input: &mut impl BufRead, question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer).context("reading confirmation")?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn print_frame(screen: &Screen) {
    if let Some(frame) = screen.take_frame() {
        print!("{frame}");
    }
}
