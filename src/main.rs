mod app;
mod cli;
mod config;
mod domain;
mod error;
mod input;
mod persistence;
mod store;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::Parser;
use cli::Commands;
use config::Config;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use persistence::{init_local_dir, resolve_data_dir, FileStore, KeyValueStore, MemoryStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use store::TaskStore;
use tracing_subscriber::EnvFilter;

/// Input poll interval for the TUI loop
const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "taken")]
#[command(about = "A categorised, terminal-based to-do list", long_about = None)]
struct Cli {
    /// Data directory (overrides the config file and .taken discovery)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Work on a throwaway in-memory list; nothing is saved
    #[arg(long, global = true)]
    scratch: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Init) = args.command {
        init_logging(None)?;
        let current_dir = std::env::current_dir().context("Could not determine current directory")?;
        let dir = init_local_dir(&current_dir)?;
        println!("Initialized task directory: {}", dir.display());
        return Ok(());
    }

    let config = Config::load_default().context("Failed to load config")?;
    let explicit = args.data_dir.as_deref().or(config.data_dir.as_deref());
    let data_dir = resolve_data_dir(explicit)?;

    match args.command {
        Some(Commands::Path) => {
            println!("{}", data_dir.display());
            Ok(())
        }
        Some(command) => {
            init_logging(None)?;
            let mut out = io::stdout().lock();
            if args.scratch {
                cli::run(&mut TaskStore::load(MemoryStore::new()), command, &mut out)
            } else {
                let mut store = TaskStore::load(open_store(&data_dir)?);
                cli::run(&mut store, command, &mut out)
            }
        }
        None if args.scratch => {
            init_logging(Some(&std::env::temp_dir().join("taken-scratch.log")))?;
            run_tui(TaskStore::load(MemoryStore::new()), &config)
        }
        None => {
            // Logs would corrupt the alternate screen, so the TUI logs to a file
            let store = open_store(&data_dir)?;
            init_logging(Some(&data_dir.join("taken.log")))?;
            run_tui(TaskStore::load(store), &config)
        }
    }
}

fn open_store(data_dir: &Path) -> Result<FileStore> {
    FileStore::open(data_dir)
        .with_context(|| format!("Failed to open data directory: {}", data_dir.display()))
}

/// Install the tracing subscriber: stderr, or `log_file` when given.
/// Filtering follows RUST_LOG and defaults to warnings only.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn run_tui<S: KeyValueStore>(store: TaskStore<S>, config: &Config) -> Result<()> {
    let location = store.kv().location();
    let mut app = AppState::new(store, config);
    app.set_status(format!("Storage: {}", location));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState<S>,
) -> Result<()> {
    loop {
        if app.take_dirty() {
            app.clamp_selection();
            terminal.draw(|f| ui::render(f, app))?;
        }

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(app, key)? {
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => app.mark_dirty(),
                _ => {}
            }
        }
    }
}
