//! Conversation UI components for the chat interface

pub mod commands;
pub mod composer;
pub mod history;
pub mod indicator;
pub mod manager;

pub use commands::SlashCommand;
pub use composer::Composer;
pub use history::{ConversationHistory, Message, Sender, GREETING};
pub use indicator::ProcessingIndicator;
pub use manager::{ConversationAction, ConversationManager, CONNECTION_ERROR, FALLBACK_ANSWER};
