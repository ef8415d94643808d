//! control-catalog: browse tui-controls stories in the terminal
//!
//! Keys: j/k pick a story, Enter opens it, Esc goes back, q quits.
//! Logs go to a JSON file under `--log-dir`; `RUST_LOG` overrides the level.

use std::io;
use std::time::Duration;

use clap::Parser;
use control_catalog::{load_keybindings, Action, Args, Catalog, CatalogState, Focus};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tui_controls::{process_raw_event, spawn_event_poller, EventKind, PollerConfig, RawEvent};

/// Spinner frame interval
const TICK: Duration = Duration::from_millis(80);

const DEFAULT_LOG_FILTER: &str =
    "control_catalog=info,tui_controls_core=info,tui_controls_components=info";

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    let keybindings = match load_keybindings(args.keybindings.as_deref()) {
        Ok(keybindings) => keybindings,
        Err(error) => {
            eprintln!("control-catalog: {}", error);
            std::process::exit(2);
        }
    };
    // Flushes the log file on drop
    let _log_guard = init_logging(&args);

    let mut state = CatalogState::new(args.story.unwrap_or_default(), args.async_delay());
    if args.story.is_some() {
        state.focus = Focus::Canvas;
    }
    info!(story = state.story.id(), delay_ms = args.async_delay_ms, "Starting catalog");
    let catalog = Catalog::new(state, keybindings);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, catalog).await;

    // Cleanup
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// File logging; the terminal belongs to the UI
///
/// Precedence: RUST_LOG env var > default filter.
fn init_logging(args: &Args) -> Option<WorkerGuard> {
    let log_dir = args.log_dir();
    if let Err(error) = std::fs::create_dir_all(&log_dir) {
        eprintln!(
            "Warning: could not create log directory {}: {}",
            log_dir.display(),
            error
        );
        return None;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let file_appender = tracing_appender::rolling::never(&log_dir, "control-catalog.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Some(guard)
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut catalog: Catalog,
) -> io::Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _handle = spawn_event_poller(event_tx, PollerConfig::default(), cancel_token.clone());

    let mut ticks = tokio::time::interval(TICK);
    let mut should_render = true;

    loop {
        if should_render {
            terminal.draw(|frame| catalog.render(frame))?;
            should_render = false;
        }

        tokio::select! {
            Some(raw_event) = event_rx.recv() => {
                let event = process_raw_event(raw_event);
                for action in catalog.handle_event(&event) {
                    let _ = action_tx.send(action);
                }
                // Cursor moves and resizes change the screen without an action
                should_render = true;
            }

            Some(action) = action_rx.recv() => {
                if matches!(action, Action::Quit) {
                    break;
                }
                should_render |= catalog.dispatch(action);
            }

            action = catalog.settled() => {
                let _ = action_tx.send(action);
                should_render = true;
            }

            _ = ticks.tick() => {
                if catalog.is_animating() {
                    catalog.handle_event(&EventKind::Tick);
                    should_render = true;
                }
            }
        }
    }

    cancel_token.cancel();
    Ok(())
}
