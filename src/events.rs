use crossterm::event::KeyEvent;

/// Events delivered to the application loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Key press event
    Key(KeyEvent),

    /// Terminal resize
    Resize(u16, u16),

    /// Periodic tick for animation and response polling
    Tick,
}
