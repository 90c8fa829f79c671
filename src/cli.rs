//! Command-line arguments and the one-shot subcommands.
//!
//! Without a subcommand the binary opens the interactive task board. Each
//! subcommand loads the tasks file, applies a single operation and saves
//! straight away.

use crate::task_store::{TaskStore, DEFAULT_TASKS_FILE};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// Terminal to-do list manager
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the tasks file
    #[arg(short, long, default_value = DEFAULT_TASKS_FILE, global = true)]
    pub file: PathBuf,

    /// Logging output: 0/off (default), 2/stderr, or filename
    #[arg(short, long, default_value = "off", global = true)]
    pub log: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all tasks
    List,

    /// Add a new task
    Add {
        /// Task description (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// Mark one or more tasks as done
    Done {
        /// Task numbers as shown by `list`
        #[arg(required = true, num_args = 1..)]
        indices: Vec<usize>,
    },

    /// Delete a task
    Delete {
        /// Task number as shown by `list`
        index: usize,
    },
}

/// Applies `command` to `store`, saving after any successful change.
pub fn run_command(store: &mut TaskStore, command: Command, out: &mut impl Write) -> Result<()> {
    if store.recovered_from_malformed() {
        writeln!(
            out,
            "⚠️ {} could not be parsed, starting with an empty list.",
            store.path().display()
        )?;
    }

    match command {
        Command::List => {
            if store.is_empty() {
                writeln!(out, "📭 No tasks found.")?;
            }
            for (i, task) in store.list().iter().enumerate() {
                let mark = if task.done { "x" } else { " " };
                writeln!(out, "{:>3}. [{}] {}", i + 1, mark, task.description)?;
            }
            return Ok(());
        }
        Command::Add { description } => {
            store.add(&description.join(" "))?;
            writeln!(out, "🟢 Task added successfully.")?;
        }
        Command::Done { indices } => {
            let count = store.mark_done(&indices)?;
            writeln!(out, "✅ {} task(s) marked as done.", count)?;
        }
        Command::Delete { index } => {
            let description = store.delete(index)?;
            writeln!(out, "🗑️ Task '{}' deleted.", description)?;
        }
    }

    store
        .save()
        .with_context(|| format!("could not save {}", store.path().display()))
}
