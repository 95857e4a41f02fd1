use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::client::{AnswerClient, AnswerReply};
use crate::logging::DiagnosticsLog;
use crate::ui::conversation::commands::{help_text, parse_slash_command, SlashCommand};
use crate::ui::conversation::composer::{Composer, ComposerResult};
use crate::ui::conversation::history::ConversationHistory;
use crate::ui::conversation::indicator::ProcessingIndicator;

/// Shown when the service answers without an `answer` field.
pub const FALLBACK_ANSWER: &str = "Sorry, I could not process your request.";

/// Shown when the request fails outright.
pub const CONNECTION_ERROR: &str = "Sorry, there was an error connecting to the server. \
     Please make sure the backend is running and has CORS enabled.";

/// Actions the conversation hands back to the application loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationAction {
    None,
    Exit,
}

/// Owns the conversation state and mediates the one-at-a-time query
/// lifecycle against the Answer Service.
pub struct ConversationManager {
    history: ConversationHistory,
    composer: Composer,
    indicator: ProcessingIndicator,
    client: AnswerClient,
    log: Option<DiagnosticsLog>,
    response_rx: Option<mpsc::UnboundedReceiver<Result<AnswerReply>>>,
}

impl ConversationManager {
    pub fn new(client: AnswerClient, log: Option<DiagnosticsLog>) -> Self {
        Self {
            history: ConversationHistory::new(),
            composer: Composer::new(),
            indicator: ProcessingIndicator::new(),
            client,
            log,
            response_rx: None,
        }
    }

    /// True between a submission and the arrival of its answer.
    pub fn is_awaiting_response(&self) -> bool {
        self.response_rx.is_some()
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Submit a query. Blank input and input arriving while a request is
    /// outstanding are ignored.
    pub fn submit(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() || self.response_rx.is_some() {
            return;
        }

        self.history.push_user(text);
        self.composer.clear();
        self.composer.set_enabled(false);
        self.indicator.start();
        self.history.scroll_to_latest();

        if let Some(log) = &mut self.log {
            log.request(text);
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let client = self.client.clone();
        let query = text.to_string();
        tokio::spawn(async move {
            let _ = tx.send(client.ask(&query).await);
        });
        self.response_rx = Some(rx);
    }

    /// Apply a resolved answer if one has arrived. Non-blocking; called
    /// from the application loop on every tick.
    pub fn poll_response(&mut self) {
        let Some(rx) = self.response_rx.as_mut() else {
            return;
        };

        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            // Sender dropped without a value; treat as a failed request.
            Err(TryRecvError::Disconnected) => Err(anyhow::anyhow!("request task dropped")),
        };

        match outcome {
            Ok(reply) => {
                let answer = reply
                    .answer
                    .unwrap_or_else(|| FALLBACK_ANSWER.to_string());
                self.history.push_assistant(answer);
            }
            Err(err) => {
                if let Some(log) = &mut self.log {
                    log.error("answer service request failed", &err);
                }
                self.history.push_assistant(CONNECTION_ERROR);
            }
        }

        self.response_rx = None;
        self.indicator.stop();
        self.composer.set_enabled(true);
        self.history.scroll_to_latest();
    }

    /// Advance the indicator animation.
    pub fn on_tick(&mut self) {
        self.indicator.tick();
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> ConversationAction {
        use crossterm::event::KeyCode;

        // History scrolling works even while a request is outstanding.
        match key.code {
            KeyCode::Up => {
                self.history.scroll_up();
                return ConversationAction::None;
            }
            KeyCode::Down => {
                self.history.scroll_down();
                return ConversationAction::None;
            }
            KeyCode::PageUp => {
                self.history.scroll_page_up();
                return ConversationAction::None;
            }
            KeyCode::PageDown => {
                self.history.scroll_page_down();
                return ConversationAction::None;
            }
            _ => {}
        }

        match self.composer.handle_key(key) {
            ComposerResult::Submitted(input) => self.handle_submitted(input),
            ComposerResult::None => ConversationAction::None,
        }
    }

    fn handle_submitted(&mut self, input: String) -> ConversationAction {
        match parse_slash_command(&input) {
            Some(SlashCommand::Help) => {
                self.history.push_assistant(help_text());
                self.history.scroll_to_latest();
                ConversationAction::None
            }
            Some(SlashCommand::Bye) => ConversationAction::Exit,
            None => {
                self.submit(&input);
                ConversationAction::None
            }
        }
    }

    /// Render history, indicator, and composer into `area`.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // History
                Constraint::Length(3), // Composer
            ])
            .split(area);

        let trailer = self.indicator.lines();
        self.history.render_with_trailer(chunks[0], buf, &trailer);
        self.composer.render(chunks[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::conversation::history::GREETING;

    fn manager_for(url: &str) -> ConversationManager {
        ConversationManager::new(AnswerClient::new(url), None)
    }

    #[tokio::test]
    async fn blank_submission_is_ignored() {
        let mut manager = manager_for("http://127.0.0.1:9");
        manager.submit("");
        manager.submit("   \t  ");
        assert!(!manager.is_awaiting_response());
        assert_eq!(manager.history().len(), 1);
    }

    #[tokio::test]
    async fn submission_appends_user_message_before_in_flight() {
        let mut manager = manager_for("http://127.0.0.1:9");
        manager.submit("  what is zeotap?  ");

        let last = manager.history().last().unwrap();
        assert_eq!(last.text, "what is zeotap?");
        assert!(manager.is_awaiting_response());
    }

    #[tokio::test]
    async fn second_submission_while_awaiting_is_ignored() {
        let mut manager = manager_for("http://127.0.0.1:9");
        manager.submit("first");
        let len_after_first = manager.history().len();

        manager.submit("second");
        assert_eq!(manager.history().len(), len_after_first);
        assert!(manager.is_awaiting_response());
    }

    #[tokio::test]
    async fn help_command_appends_without_a_request() {
        let mut manager = manager_for("http://127.0.0.1:9");
        let action = manager.handle_submitted("/help".to_string());
        assert_eq!(action, ConversationAction::None);
        assert!(!manager.is_awaiting_response());
        assert!(manager.history().last().unwrap().text.contains("/bye"));
    }

    #[tokio::test]
    async fn bye_command_requests_exit() {
        let mut manager = manager_for("http://127.0.0.1:9");
        let action = manager.handle_submitted("/bye".to_string());
        assert_eq!(action, ConversationAction::Exit);
        assert_eq!(manager.history().len(), 1);
    }

    #[tokio::test]
    async fn greeting_is_present_before_any_interaction() {
        let manager = manager_for("http://127.0.0.1:9");
        assert_eq!(manager.history().last().unwrap().text, GREETING);
    }
}
