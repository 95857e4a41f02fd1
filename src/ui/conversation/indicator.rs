use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// Animated "processing" line shown while a query is awaiting its answer.
pub struct ProcessingIndicator {
    active: bool,
    frame: u8,
}

impl ProcessingIndicator {
    pub fn new() -> Self {
        Self {
            active: false,
            frame: 0,
        }
    }

    pub fn start(&mut self) {
        self.active = true;
        self.frame = 0;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the dot animation; driven by the app tick.
    pub fn tick(&mut self) {
        if self.active {
            self.frame = (self.frame + 1) % 4;
        }
    }

    /// Lines to append after the history while active; empty otherwise.
    pub fn lines(&self) -> Vec<Line<'static>> {
        if !self.active {
            return Vec::new();
        }

        let dots = match self.frame {
            0 => "",
            1 => ".",
            2 => "..",
            _ => "...",
        };

        vec![Line::from(vec![
            Span::styled("🤖 ", Style::default().fg(Color::Green)),
            Span::styled("Processing your request", Style::default().fg(Color::Green)),
            Span::styled(dots.to_string(), Style::default().fg(Color::Yellow)),
        ])]
    }
}

impl Default for ProcessingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_indicator_renders_nothing() {
        let indicator = ProcessingIndicator::new();
        assert!(indicator.lines().is_empty());
    }

    #[test]
    fn active_indicator_cycles_dots() {
        let mut indicator = ProcessingIndicator::new();
        indicator.start();
        assert_eq!(indicator.lines().len(), 1);

        for _ in 0..4 {
            indicator.tick();
        }
        // Wrapped back to the first frame
        assert_eq!(indicator.lines().len(), 1);
        assert!(indicator.is_active());
    }

    #[test]
    fn stop_clears_the_line() {
        let mut indicator = ProcessingIndicator::new();
        indicator.start();
        indicator.stop();
        assert!(indicator.lines().is_empty());
        assert!(!indicator.is_active());
    }
}
