use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use palaver::{
    app::{App, AppEvent, AppState},
    chat_view, config, key_handlers, logging, quit_confirm,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    config::initialize_config()?;
    let _logger = logging::init_logging()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(100);
    spawn_input_task(event_tx.clone());
    let app = App::new(event_tx);

    let res = run_app(&mut terminal, app, event_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

/// Reads terminal events off the blocking crossterm API and forwards them,
/// plus a periodic tick, onto the app's event channel.
fn spawn_input_task(tx: mpsc::Sender<AppEvent>) {
    let tick_rate = Duration::from_millis(config::get_config().tick_rate_ms);

    tokio::task::spawn_blocking(move || {
        let mut last_tick = Instant::now();
        loop {
            let timeout = tick_rate
                .saturating_sub(last_tick.elapsed())
                .min(Duration::from_millis(100));

            if event::poll(timeout).unwrap_or(false) {
                if let Ok(ev) = event::read() {
                    if tx.blocking_send(AppEvent::Input(ev)).is_err() {
                        return;
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if tx.blocking_send(AppEvent::Tick).is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });
}

/// Main loop of the application: draw, then apply the next event. Replies
/// from in-flight round trips arrive interleaved with input on the same
/// channel and render in arrival order.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut events: mpsc::Receiver<AppEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, &mut app))?;

        match events.recv().await {
            Some(AppEvent::Input(CEvent::Key(key))) => {
                if key.kind == KeyEventKind::Press {
                    match app.state {
                        AppState::Chat => key_handlers::handle_chat_input(key, &mut app),
                        AppState::QuitConfirm => {
                            key_handlers::handle_quit_confirm_input(key, &mut app)
                        }
                        AppState::Quit => {}
                    }
                }
            }
            Some(AppEvent::Input(_)) => {}
            Some(AppEvent::Tick) => {}
            Some(AppEvent::Reply(text)) => app.apply_reply(text),
            None => break,
        }

        if app.state == AppState::Quit {
            break;
        }
    }

    Ok(())
}

/// Renders the active screen.
fn ui(f: &mut Frame<'_>, app: &mut App) {
    match app.state {
        AppState::QuitConfirm => quit_confirm::draw_quit_confirm(f, f.area()),
        _ => chat_view::draw_chat(f, app),
    }
}
