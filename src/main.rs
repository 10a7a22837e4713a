//! Main entry point for the show-browser CLI application.

use clap::Parser;
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, info, warn};
use ratatui::prelude::*;
use show_browser::api::{CatalogClient, CatalogSource};
use show_browser::cache::EpisodeCache;
use show_browser::config::Config;
use show_browser::loader::Loader;
use show_browser::session::Loaded;
use show_browser::session::Session;
use show_browser::tui::{Action, App, draw, poll_event};
use show_browser::types::ShowId;
use show_browser::view::SummaryMode;
use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::error::TryRecvError;

/// Command-line arguments for the show-browser application.
#[derive(Parser, Debug)]
#[command(
    name = "show-browser",
    version,
    about = "A terminal browser for TV shows and episodes",
    long_about = "Browse and filter the TVMaze show catalog and each show's episodes in a TUI."
)]
struct Args {
    /// Root URL of the catalog API (overrides config)
    #[arg(short, long)]
    api_url: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Open this show as soon as the show list has loaded
    #[arg(short, long)]
    show: Option<u64>,

    /// Show summaries with their markup instead of as plain text
    #[arg(short, long)]
    raw_summaries: bool,

    /// Log verbosity level: 0=error, 1=warn, 2=info, 3=debug, 4=trace
    #[arg(short, long, default_value_t = 1)]
    log: u8,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Config file to read instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Initialize the terminal for TUI mode.
fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

fn init_logging(level: u8, log_file: Option<&PathBuf>) -> io::Result<()> {
    let log_level = match level {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false);

    if let Some(path) = log_file {
        builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
    }

    builder.init();
    debug!("Log level set to {:?}", log_level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.log, args.log_file.as_ref())?;

    let loaded = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = loaded.unwrap_or_else(|e| {
        warn!("Failed to load config: {}. Using defaults.", e);
        Config::new()
    });

    // CLI args take precedence over the config file
    let base_url = args.api_url.unwrap_or(config.api_base_url);
    let timeout = Duration::from_secs(args.timeout.unwrap_or(config.timeout_secs).max(1));
    let initial_show = args.show.or(config.initial_show).map(ShowId);
    let summary_mode = if args.raw_summaries || !config.plain_summaries {
        SummaryMode::Raw
    } else {
        SummaryMode::Plain
    };

    info!("Using catalog at {} (timeout {:?})", base_url, timeout);

    let source: Arc<dyn CatalogSource> = Arc::new(CatalogClient::new(&base_url, timeout)?);
    let cache = Arc::new(EpisodeCache::new(source.clone()));
    let (loader, mut rx) = Loader::new(source, cache.clone());

    let mut session = Session::new(cache).with_initial_show(initial_show);
    loader.dispatch(session.start());

    let mut app = App::new(session, config.keybindings, summary_mode);

    let mut terminal = init_terminal()?;
    let result = run_app(&mut terminal, &mut app, &loader, &mut rx);
    restore_terminal()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    loader: &Loader,
    rx: &mut UnboundedReceiver<Loaded>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Draw UI
        terminal.draw(|f| draw(f, app))?;

        // Pick up finished fetches
        loop {
            match rx.try_recv() {
                Ok(loaded) => {
                    if let Action::Dispatch(command) = app.apply(loaded) {
                        loader.dispatch(command);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        // Poll for events
        if let Some(Event::Key(key)) = poll_event(Duration::from_millis(100))? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match app.handle_input(key) {
                Action::Quit => break,
                Action::Dispatch(command) => {
                    loader.dispatch(command);
                }
                Action::None => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
