use crate::api;
use crate::app::{App, AppEvent, AppState};
use crate::message::{ChatMessage, Sender};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;

/// Key dispatch for the chat screen.
pub fn handle_chat_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::QuitConfirm;
        }
        KeyCode::Enter => submit_input(app),
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.state = AppState::Quit,
                    'u' => app.scroll_up(),
                    'd' => app.scroll_down(),
                    _ => {}
                }
            } else {
                app.input.push(c);
            }
        }
        _ => {}
    }
}

/// The single send path. Every trigger lands here, so any binding that
/// submits stays equivalent to Enter for the same input content.
///
/// An empty or whitespace-only buffer is a silent no-op: nothing is
/// appended and no request goes out.
pub fn submit_input(app: &mut App) {
    let text = app.input.trim().to_string();
    if text.is_empty() {
        return;
    }

    app.input.clear();
    app.push_message(ChatMessage::new(Sender::User, text.clone()));

    let snippet: String = text.chars().take(60).collect();
    app.logs.add(format!("sending \"{}\"", snippet));
    debug!("dispatching chat message ({} chars)", text.len());

    // Each send gets its own task; replies render in arrival order, with no
    // ordering guarantee between overlapping round trips.
    let client = app.http.clone();
    let endpoint = app.endpoint.clone();
    let tx = app.event_tx.clone();
    tokio::spawn(async move {
        let reply = match api::send_chat_message(&client, &endpoint, &text).await {
            Ok(message) => message,
            Err(e) => format!("Error: {}", e),
        };
        // The loop may already be gone on shutdown; nothing left to render then
        let _ = tx.send(AppEvent::Reply(reply)).await;
    });
}

pub fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.state = AppState::Chat;
        }
        _ => {}
    }
}
