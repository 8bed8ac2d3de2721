//! Command-line surface over the task store.

use crate::domain::{summary, CategoryFilter, Row, TaskId};
use crate::persistence::KeyValueStore;
use crate::store::TaskStore;
use anyhow::Result;
use clap::Subcommand;
use std::io::Write;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a local .taken directory in the current directory
    Init,
    /// Add a task
    Add {
        /// Task title
        #[arg(required = true)]
        title: Vec<String>,
        /// Category (created if it does not exist). Defaults to the first default category.
        #[arg(short, long, default_value = "")]
        category: String,
    },
    /// Toggle a task between open and done
    Toggle {
        /// Task id as shown by `list`
        id: String,
    },
    /// Remove a task
    Rm {
        /// Task id as shown by `list`
        id: String,
    },
    /// List tasks grouped by category
    List {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
        /// Print the full state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove all completed tasks
    Clear,
    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommands),
    /// Print the data directory in use
    Path,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories with their colours and counts
    List,
    /// Add a category
    Add {
        name: String,
        /// Colour token, e.g. "red" or "#ff0000"
        #[arg(long)]
        color: Option<String>,
    },
    /// Remove a category and all of its tasks
    Rm { name: String },
}

/// Run a store command, writing user-facing output to `out`.
///
/// `Init` and `Path` are handled by the caller since they need no store.
pub fn run<S: KeyValueStore, W: Write>(
    store: &mut TaskStore<S>,
    command: Commands,
    out: &mut W,
) -> Result<()> {
    match command {
        Commands::Add { title, category } => {
            if let Some(id) = store.add_task(&title.join(" "), &category) {
                writeln!(out, "{}", id)?;
            }
        }
        Commands::Toggle { id } => {
            store.toggle_task(&TaskId::from(id));
        }
        Commands::Rm { id } => {
            store.remove_task(&TaskId::from(id));
        }
        Commands::List { category, json } => {
            if let Some(name) = category {
                store.set_filter(CategoryFilter::from_input(&name));
            }
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&store.snapshot())?)?;
            } else {
                write_listing(store, out)?;
            }
        }
        Commands::Clear => {
            let removed = store.clear_completed();
            writeln!(out, "{}", removed)?;
        }
        Commands::Category(CategoryCommands::List) => {
            for name in store.sorted_categories() {
                let (total, done) = store.category_counts(&name);
                match store.color(&name) {
                    Some(color) => writeln!(out, "{}  [{}]  {}", name, color, summary(total, done))?,
                    None => writeln!(out, "{}  {}", name, summary(total, done))?,
                }
            }
        }
        Commands::Category(CategoryCommands::Add { name, color }) => {
            store.add_category(&name, color.as_deref());
        }
        Commands::Category(CategoryCommands::Rm { name }) => {
            store.remove_category(name.trim());
        }
        Commands::Init | Commands::Path => {}
    }
    Ok(())
}

/// Plain-text grouped listing under the store's current filter
fn write_listing<S: KeyValueStore, W: Write>(store: &TaskStore<S>, out: &mut W) -> Result<()> {
    match store.filter() {
        CategoryFilter::All => writeln!(out, "Tasks by category")?,
        CategoryFilter::Category(name) => writeln!(out, "Tasks: {}", name)?,
    }

    let groups = store.group_by_category();
    for row in crate::domain::flatten_sections(&groups, &store.visible_categories()) {
        match row {
            Row::Header { name, total, done } => {
                writeln!(out)?;
                writeln!(out, "{}  {}", name, summary(total, done))?;
            }
            Row::Empty => writeln!(out, "  No tasks in this category.")?,
            Row::Task(id) => {
                if let Some(task) = store.task(&id) {
                    writeln!(out, "  {} {}  {}", task.checkbox(), task.id.as_str(), task.title)?;
                }
            }
        }
    }
    Ok(())
}
