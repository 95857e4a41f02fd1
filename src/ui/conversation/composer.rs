use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::ui::conversation::commands::{CommandEntry, COMMAND_ENTRIES};

/// Input hint shown while the buffer is empty.
const PLACEHOLDER: &str = "Ask anything about your customer data...";

/// Result of feeding a key event to the composer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerResult {
    /// The user pressed Enter on a non-empty line
    Submitted(String),
    /// Nothing to report
    None,
}

/// Single-line input box for the conversation.
///
/// The cursor is tracked in characters, not bytes, so editing inside
/// multi-byte input stays on char boundaries.
pub struct Composer {
    content: String,
    cursor: usize,
    enabled: bool,
}

/// Byte index of the `char_idx`-th character of `s`.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

impl Composer {
    pub fn new() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            enabled: true,
        }
    }

    /// Enable or disable input; disabled while a query is in flight.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Handle a key press. Returns the submitted line on Enter.
    pub fn handle_key(&mut self, key: KeyEvent) -> ComposerResult {
        if !self.enabled {
            return ComposerResult::None;
        }

        match key.code {
            KeyCode::Enter => {
                if !self.content.trim().is_empty() {
                    let content = std::mem::take(&mut self.content);
                    self.cursor = 0;
                    return ComposerResult::Submitted(content);
                }
            }
            KeyCode::Char(c) => {
                let byte_pos = char_to_byte_index(&self.content, self.cursor);
                self.content.insert(byte_pos, c);
                self.cursor += 1;
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let byte_pos = char_to_byte_index(&self.content, self.cursor);
                    self.content.remove(byte_pos);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.content.chars().count() {
                    let byte_pos = char_to_byte_index(&self.content, self.cursor);
                    self.content.remove(byte_pos);
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.content.chars().count());
            }
            KeyCode::Home => {
                self.cursor = 0;
            }
            KeyCode::End => {
                self.cursor = self.content.chars().count();
            }
            _ => {}
        }

        ComposerResult::None
    }

    /// Palette entries matching the current buffer, when it is a command
    /// prefix.
    fn palette_entries(&self) -> Vec<CommandEntry> {
        let Some(rest) = self.content.strip_prefix('/') else {
            return Vec::new();
        };
        if rest.contains(char::is_whitespace) {
            return Vec::new();
        }

        let query = rest.to_lowercase();
        COMMAND_ENTRIES
            .iter()
            .filter(|entry| entry.keyword.starts_with(&query))
            .copied()
            .collect()
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.enabled {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let title = if self.enabled {
            "Message"
        } else {
            "Message (waiting for answer)"
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.content.is_empty() {
            let placeholder = Line::from(Span::styled(
                PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ));
            buf.set_line(inner.x, inner.y, &placeholder, inner.width);
        } else {
            let mut shown = self.content.clone();
            if self.enabled {
                let byte_pos = char_to_byte_index(&shown, self.cursor);
                shown.insert(byte_pos, '▌');
            }
            let line = Line::from(Span::raw(shown));
            buf.set_line(inner.x, inner.y, &line, inner.width);
        }

        let palette = self.palette_entries();
        if self.enabled && !palette.is_empty() {
            self.render_palette(&palette, inner, buf);
        }
    }

    fn render_palette(&self, entries: &[CommandEntry], inner: Rect, buf: &mut Buffer) {
        let height = (entries.len() + 2) as u16;
        let palette_area = Rect {
            x: inner.x,
            y: inner.y.saturating_sub(height),
            width: inner.width,
            height,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Commands")
            .style(Style::default().fg(Color::Blue));
        let palette_inner = block.inner(palette_area);
        block.render(palette_area, buf);

        for (i, entry) in entries.iter().enumerate() {
            if i >= palette_inner.height as usize {
                break;
            }
            let line = Line::from(vec![
                Span::styled(
                    format!("/{}", entry.keyword),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" - ", Style::default().fg(Color::DarkGray)),
                Span::styled(entry.description, Style::default().fg(Color::Gray)),
            ]);
            buf.set_line(palette_inner.x, palette_inner.y + i as u16, &line, palette_inner.width);
        }
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}
