//! Console configuration.

use std::io::{self, IsTerminal};

/// Prompt shown before each command in interactive sessions.
pub const PROMPT: &str = "(hbnb) ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Print [`PROMPT`] before reading each line.
    pub show_prompt: bool,
}

impl ConsoleConfig {
    pub fn new(show_prompt: bool) -> Self {
        Self { show_prompt }
    }

    /// Prompt on when stdin is a terminal, off when input is piped.
    pub fn detect() -> Self {
        let interactive = io::stdin().is_terminal();
        if !interactive {
            tracing::debug!("stdin is not a terminal; prompt disabled");
        }
        Self::new(interactive)
    }
}
