use crate::config;
use crate::log_view::LogView;
use crate::message::{ChatMessage, Sender};
use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Chat,
    QuitConfirm,
    Quit,
}

/// Events carried on the channel feeding the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    Input(CEvent),
    Tick,
    /// A finished round trip: the text to append as the bot's message.
    Reply(String),
}

pub struct App {
    pub state: AppState,
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub chat_scroll: u16,
    pub logs: LogView,
    pub logs_scroll: u16,
    pub endpoint: String,
    pub http: reqwest::Client,
    pub event_tx: mpsc::Sender<AppEvent>,
}

impl App {
    pub fn new(event_tx: mpsc::Sender<AppEvent>) -> App {
        App {
            state: AppState::Chat,
            messages: Vec::new(),
            input: String::new(),
            chat_scroll: 0,
            logs: LogView::new(),
            logs_scroll: 0,
            endpoint: config::get_config().endpoint,
            http: reqwest::Client::new(),
            event_tx,
        }
    }

    /// Appends a message and snaps the pane to the newest entry. The next
    /// draw pass clamps the scroll back to the last visible line.
    pub fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.chat_scroll = u16::MAX;
    }

    /// Renders a finished round trip. Errors were already folded into the
    /// reply text by the request task, so every reply is just a bot line.
    pub fn apply_reply(&mut self, text: String) {
        self.logs.add("reply received");
        self.push_message(ChatMessage::new(Sender::Bot, text));
    }

    pub fn scroll_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_apply_reply_appends_a_bot_message() {
        let (tx, _rx) = mpsc::channel(16);
        let mut app = App::new(tx);

        app.apply_reply("hi there".to_string());

        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.messages[0].sender(), Sender::Bot);
        assert_eq!(app.messages[0].text(), "hi there");
    }
}
