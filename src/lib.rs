//! Terminal chat client for the DataMind Answer Service.
//!
//! The conversation controller lives in [`ui::conversation`]; [`client`]
//! wraps the single `GET /ask` call; [`app`] runs the interactive loop.

pub mod app;
pub mod client;
pub mod config;
pub mod events;
pub mod logging;
pub mod tui;
pub mod ui;
