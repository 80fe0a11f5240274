mod app;
mod config;
mod logging;
mod nav;
mod route;
mod ui;
mod watchdog;

use crate::app::dispatch;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use crate::logging::SessionLogger;
use crate::watchdog::{SessionResetTimer, TokioScheduler};
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "kioskwatch")]
#[command(version)]
#[command(about = "Kiosk shell with an idle session-reset watchdog")]
struct Cli {
    /// Config file (default: <config dir>/kioskwatch/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override watchdog.timeout_ms
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Override shell.start_path
    #[arg(long, value_name = "PATH")]
    start: Option<String>,

    /// Run without the idle watchdog
    #[arg(long)]
    no_watchdog: bool,

    /// Write the effective config to the config path and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config: file, then environment, then flags
    let mut cfg = config::load_config(cli.config.as_deref())?;
    config::apply_env_overrides(&mut cfg, |var| std::env::var(var).ok())?;
    if let Some(ms) = cli.timeout_ms {
        cfg.watchdog.timeout_ms = ms;
    }
    if let Some(start) = cli.start {
        cfg.shell.start_path = start;
    }
    if cli.no_watchdog {
        cfg.watchdog.enabled = false;
    }
    cfg.validate().context("Invalid configuration")?;

    if cli.init_config {
        let path = cli.config.unwrap_or_else(config::config_path);
        config::save_config(&cfg, &path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    logging::init_diagnostics(&cfg.logging)?;
    tracing::info!(
        base_url = %cfg.shell.base_url,
        graphql_url = cfg.endpoints.graphql_url.as_deref().unwrap_or("-"),
        api_url = cfg.endpoints.api_url.as_deref().unwrap_or("-"),
        url = cfg.endpoints.url.as_deref().unwrap_or("-"),
        env = cfg.endpoints.env.as_deref().unwrap_or("-"),
        "starting kiosk shell"
    );

    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, cfg).await;

    restore_terminal()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "shell exited with error");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let base_url = cfg.base_url()?;
    let reset_config = cfg.reset_config()?;
    let tick_ms = cfg.shell.tick_ms.max(10);
    let watchdog_enabled = cfg.watchdog.enabled;

    let mut state = AppState::new(cfg.clone(), base_url);
    let mut session_logger = SessionLogger::new(&cfg.logging);

    // The watchdog samples the history's current location when it fires
    let mut watchdog = watchdog_enabled.then(|| {
        SessionResetTimer::new(
            reset_config,
            TokioScheduler::new(event_tx.clone()),
            state.history.subscribe(),
        )
    });
    if let Some(timer) = watchdog.as_mut() {
        timer.start();
    }

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if term_tx.send(AppEvent::Terminal(event)).is_err() {
                break;
            }
        }
    });

    // Spawn tick task for the countdown display
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    state.system_message("Type a path or /help. Clicks, taps and keys keep the session alive.".to_string());
    dispatch::sync_status(&mut state, watchdog.as_ref());

    // Initial render
    terminal.draw(|f| ui::render(f, &state))?;

    // Main event loop
    while let Some(event) = event_rx.recv().await {
        let actions = handler::handle_event(&mut state, event);

        for action in actions {
            dispatch::execute(&mut state, watchdog.as_mut(), action);
        }
        dispatch::sync_status(&mut state, watchdog.as_ref());

        // Drain new entries for the session log
        for entry in state.new_entries.drain(..) {
            session_logger.log_entry(&entry);
        }

        if state.should_quit {
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    if let Some(timer) = watchdog.as_mut() {
        timer.stop();
    }
    tracing::info!(resets = state.watchdog.resets, "kiosk shell stopped");
    Ok(())
}
