//! Conversation history: message model and display component

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Greeting seeded into every new conversation.
pub const GREETING: &str =
    "Hello! I am your AI Assistant. How can I help you with your customer data platform today?";

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn display_name(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "AI Assistant",
        }
    }
}

/// A single message in the conversation.
///
/// Immutable once created; ids are unique and strictly increasing within a
/// session.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
}

/// Append-only conversation history with a bottom-anchored viewport.
pub struct ConversationHistory {
    messages: Vec<Message>,
    next_id: u64,
    /// Lines scrolled up from the latest entry; 0 = pinned to bottom
    scroll_offset: usize,
    /// Total wrapped lines at the width of the last render
    rendered_lines: usize,
    viewport_height: usize,
}

impl ConversationHistory {
    /// Create a history seeded with the assistant greeting.
    pub fn new() -> Self {
        let mut history = Self {
            messages: Vec::new(),
            next_id: 1,
            scroll_offset: 0,
            rendered_lines: 0,
            viewport_height: 0,
        };
        history.push(Sender::Assistant, GREETING.to_string());
        history
    }

    fn push(&mut self, sender: Sender, text: String) -> &Message {
        let message = Message {
            id: self.next_id,
            text,
            sender,
            timestamp: Local::now(),
        };
        self.next_id += 1;
        self.messages.push(message);
        self.messages.last().expect("just pushed")
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &Message {
        self.push(Sender::User, text.into())
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) -> &Message {
        self.push(Sender::Assistant, text.into())
    }

    /// Lazy view over the messages in display order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Pin the viewport back to the latest entry.
    pub fn scroll_to_latest(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_up(&mut self) {
        let max = self.rendered_lines.saturating_sub(self.viewport_height);
        self.scroll_offset = (self.scroll_offset + 1).min(max);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_page_up(&mut self) {
        let half = (self.viewport_height / 2).max(1);
        let max = self.rendered_lines.saturating_sub(self.viewport_height);
        self.scroll_offset = (self.scroll_offset + half).min(max);
    }

    pub fn scroll_page_down(&mut self) {
        let half = (self.viewport_height / 2).max(1);
        self.scroll_offset = self.scroll_offset.saturating_sub(half);
    }

    /// Render the history, optionally followed by extra trailing lines
    /// (the processing indicator) that scroll with the content.
    pub fn render_with_trailer(&mut self, area: Rect, buf: &mut Buffer, trailer: &[Line<'_>]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("💬 Conversation");

        let inner = block.inner(area);
        block.render(area, buf);

        let width = inner.width.saturating_sub(2) as usize;
        let mut all_lines: Vec<Line> = Vec::new();
        for message in &self.messages {
            append_message_lines(&mut all_lines, message, width);
        }
        all_lines.extend(trailer.iter().cloned());

        let height = inner.height as usize;
        self.rendered_lines = all_lines.len();
        self.viewport_height = height;

        // Clamp in case the viewport grew since the offset was set
        let max_offset = all_lines.len().saturating_sub(height);
        self.scroll_offset = self.scroll_offset.min(max_offset);

        let end = all_lines.len() - self.scroll_offset;
        let start = end.saturating_sub(height);
        for (i, line) in all_lines[start..end].iter().enumerate() {
            buf.set_line(inner.x, inner.y + i as u16, line, inner.width);
        }
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new()
    }
}

fn append_message_lines(lines: &mut Vec<Line<'_>>, message: &Message, width: usize) {
    let (label_style, text_style) = match message.sender {
        Sender::User => (
            Style::default().fg(Color::Blue),
            Style::default().fg(Color::White),
        ),
        Sender::Assistant => (
            Style::default().fg(Color::Green),
            Style::default().fg(Color::Gray),
        ),
    };

    let header = format!(
        "{} · {}",
        message.sender.display_name(),
        message.timestamp.format("%H:%M")
    );
    lines.push(Line::from(Span::styled(header, label_style)));

    for paragraph in message.text.lines() {
        for wrapped in wrap_text(paragraph, width) {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(wrapped, text_style),
            ]));
        }
    }

    // spacing between messages
    lines.push(Line::from(Span::raw("")));
}

/// Wrap text to fit within the given width
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        let current_len = current_line.chars().count();
        let word_len = word.chars().count();
        if current_len + word_len + 1 <= width || current_line.is_empty() {
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        } else {
            lines.push(current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
