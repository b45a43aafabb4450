//! `Jobboard`: terminal job tracker.
//!
//! Launches the TUI over a file-backed store. Configuration via CLI flags,
//! environment variables, or config file (`~/.config/jobboard/config.toml`).
//!
//! ```bash
//! # Default data directory
//! cargo run --bin jobboard
//!
//! # Throwaway session, nothing written to disk
//! cargo run --bin jobboard -- --ephemeral --view kanban
//!
//! # Print overdue jobs and exit
//! cargo run --bin jobboard -- --overdue
//! ```

use std::io;
use std::path::Path;
use std::process::ExitCode;

use chrono::{Days, Local, NaiveDate};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_appender::non_blocking::WorkerGuard;

use jobboard::app::App;
use jobboard::config::{CliArgs, TrackerConfig};
use jobboard::controller::Controller;
use jobboard::store::{FileStore, InMemoryStore, JobStore};
use jobboard::ui;
use jobboard::view::format_due;
use jobboard_model::JobStatus;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    // A bad config is fatal; no store is opened.
    let config = match TrackerConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.overdue {
        init_stderr_logging(&cli.log_level);
        return match print_overdue(&config).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("jobboard starting");

    let result = if config.ephemeral {
        launch(InMemoryStore::new(), "in-memory (not saved)".to_string(), &config).await
    } else {
        match config.jobs_dir() {
            Ok(dir) => {
                let location = dir.display().to_string();
                launch(FileStore::new(dir), location, &config).await
            }
            Err(e) => Err(e.to_string()),
        }
    };

    tracing::info!("jobboard exiting");
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "jobboard failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("jobboard.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter(level))
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Logging for one-shot commands: stderr, so stdout stays clean for output.
fn init_stderr_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(env_filter(level))
        .init();
}

/// `RUST_LOG` wins when set; otherwise `--log-level` / `JOBBOARD_LOG`.
fn env_filter(level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
}

/// Prints every unfinished job whose due date has passed.
async fn print_overdue(config: &TrackerConfig) -> Result<(), String> {
    let store = FileStore::new(config.jobs_dir().map_err(|e| e.to_string())?);
    store.initialize().await.map_err(|e| e.to_string())?;

    let Some(yesterday) = Local::now().date_naive().checked_sub_days(Days::new(1)) else {
        return Ok(());
    };
    let overdue = store
        .due_between(NaiveDate::MIN, yesterday)
        .await
        .map_err(|e| e.to_string())?;

    let mut count = 0;
    for job in overdue.iter().filter(|job| job.status != JobStatus::Done) {
        println!(
            "{}\t{}\t{}",
            format_due(job, &config.date_format),
            job.status,
            job.title
        );
        count += 1;
    }
    tracing::info!(count, "overdue jobs listed");
    Ok(())
}

/// Opens the store, then runs the TUI until the user quits.
///
/// The store is opened before raw mode so a failure is reported on a normal
/// terminal.
async fn launch<S: JobStore>(
    store: S,
    location: String,
    config: &TrackerConfig,
) -> Result<(), String> {
    let controller = Controller::start(store, config.default_view, config.controller_settings())
        .await
        .map_err(|e| format!("cannot open job store at {location}: {e}"))?;
    tracing::info!(
        location = %location,
        jobs = controller.state().jobs().len(),
        "store opened"
    );
    let mut app = App::new(controller, config.date_format.clone(), location);

    let mut terminal = setup_terminal().map_err(|e| e.to_string())?;
    let result = run_app(&mut terminal, &mut app, config).await;
    restore_terminal(&mut terminal).map_err(|e| e.to_string())?;
    result.map_err(|e| e.to_string())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Main application loop.
async fn run_app<S: JobStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
    config: &TrackerConfig,
) -> io::Result<()> {
    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Step 2: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key_event(key).await;
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
