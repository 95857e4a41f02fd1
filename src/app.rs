use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::client::AnswerClient;
use crate::config::Config;
use crate::events::AppEvent;
use crate::logging::DiagnosticsLog;
use crate::tui::{EventHandler, Tui};
use crate::ui::conversation::{ConversationAction, ConversationManager};

/// Interactive chat application
pub struct App {
    manager: ConversationManager,
    tick_rate: Duration,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let client = AnswerClient::new(&config.answer_service_url);
        // Diagnostics are best-effort; a read-only home dir should not
        // keep the chat from starting.
        let log = DiagnosticsLog::open(&config.log_dir()).ok();

        Self {
            manager: ConversationManager::new(client, log),
            tick_rate: Duration::from_millis(config.ui.tick_rate_ms),
            should_quit: false,
        }
    }

    /// Run the draw/event loop until the user exits.
    pub async fn run(mut self, terminal: &mut Tui) -> Result<()> {
        let mut events = EventHandler::new(self.tick_rate);

        while !self.should_quit {
            terminal.draw(|frame| {
                let area = frame.size();
                self.render(area, frame.buffer_mut());
            })?;

            match events.next().await {
                Some(AppEvent::Key(key)) => self.handle_key(key),
                Some(AppEvent::Tick) => {
                    self.manager.on_tick();
                    self.manager.poll_response();
                }
                Some(AppEvent::Resize(_, _)) => {}
                None => break,
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.manager.handle_key(key) == ConversationAction::Exit {
            self.should_quit = true;
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(8),    // Conversation
                Constraint::Length(1), // Footer
            ])
            .split(area);

        render_header(chunks[0], buf);
        self.manager.render(chunks[1], buf);
        render_footer(chunks[2], buf);
    }
}

fn render_header(area: Rect, buf: &mut Buffer) {
    let title = Line::from(vec![
        Span::styled("✨ DataMind", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
        Span::styled(
            " · Your Intelligent Data Assistant",
            Style::default().fg(Color::Blue),
        ),
    ]);
    title.render(area, buf);
}

fn render_footer(area: Rect, buf: &mut Buffer) {
    let hint = Line::from(Span::styled(
        "Enter to send · ↑/↓ to scroll · /help for commands · Ctrl+C to quit",
        Style::default().fg(Color::DarkGray),
    ));
    hint.render(area, buf);
}
