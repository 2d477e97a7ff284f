use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// A single entry in the conversation. Lives only in the visible message
/// list, never persisted anywhere.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    sender: Sender,
    text: String,
    timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: Local::now(),
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Renders the message as styled lines for the message pane. The text
    /// goes out verbatim as raw spans; nothing in it is ever interpreted as
    /// markup.
    pub fn render(&self, area: Rect) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let style = self.base_style();

        self.render_header(&mut lines, style);
        self.render_body(&mut lines, area, style);

        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("╰─".to_string(), style),
        ]));

        lines
    }

    // User messages are nudged right, like the original's bubble layout
    fn indent(&self) -> &'static str {
        match self.sender {
            Sender::User => "  ",
            Sender::Bot => "",
        }
    }

    fn base_style(&self) -> Style {
        Style::default().fg(match self.sender {
            Sender::User => Color::Rgb(255, 223, 128),
            Sender::Bot => Color::Rgb(144, 238, 144),
        })
    }

    fn render_header(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        let timestamp = self.timestamp.format("%H:%M").to_string();
        let label = match self.sender {
            Sender::User => "you",
            Sender::Bot => "bot",
        };

        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("┌─".to_string(), style),
            Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
            Span::styled(format!(" {}", label), style),
        ]));
    }

    fn render_body(&self, lines: &mut Vec<Line<'static>>, area: Rect, style: Style) {
        let wrap_width = (area.width as usize).saturating_sub(4).max(1);

        for raw_line in self.text.lines() {
            if raw_line.is_empty() {
                lines.push(Line::from(vec![
                    Span::styled(self.indent().to_string(), style),
                    Span::styled("│".to_string(), style),
                ]));
                continue;
            }

            for wrapped in wrap(raw_line, wrap_width) {
                lines.push(Line::from(vec![
                    Span::styled(self.indent().to_string(), style),
                    Span::styled("│ ".to_string(), style),
                    Span::styled(wrapped.to_string(), style),
                ]));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered_text(message: &ChatMessage, width: u16) -> String {
        message
            .render(Rect::new(0, 0, width, 20))
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_text_is_rendered_verbatim() {
        let message = ChatMessage::new(Sender::Bot, "<b>hi & bye</b>");
        assert!(rendered_text(&message, 80).contains("<b>hi & bye</b>"));
    }

    #[test]
    fn test_long_text_wraps_to_area_width() {
        let message = ChatMessage::new(
            Sender::Bot,
            "a reasonably long reply that cannot fit on a single narrow line",
        );
        let lines = message.render(Rect::new(0, 0, 20, 20));
        // header + several body lines + footer
        assert!(lines.len() > 4);
    }

    #[test]
    fn test_header_names_the_sender() {
        let from_user = ChatMessage::new(Sender::User, "hello");
        let from_bot = ChatMessage::new(Sender::Bot, "hi there");
        assert!(rendered_text(&from_user, 80).contains("you"));
        assert!(rendered_text(&from_bot, 80).contains("bot"));
    }
}
