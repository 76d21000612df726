use std::io;

use crate::completion::Completer;
use crate::config::Config;
use crate::io::editor::{LineEditor, ReadOutcome};
use crate::io::terminal::RawMode;

/// Reads one line from the real terminal.
pub struct ShellPrompt {
    prompt: String,
    bell: bool,
}

impl ShellPrompt {
    pub fn new() -> Self {
        ShellPrompt {
            prompt: "$ ".to_string(),
            bell: true,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        ShellPrompt {
            prompt: config.prompt.clone(),
            bell: config.bell,
        }
    }

    /// Raw mode is held only while this call runs and is restored before it
    /// returns, on success and on error alike.
    pub fn read_line(&self, completer: &Completer) -> io::Result<ReadOutcome> {
        let _raw = RawMode::enter()?;
        let stdin = io::stdin();
        let stdout = io::stdout();
        LineEditor::new(stdin.lock(), stdout.lock(), &self.prompt, completer)
            .bell(self.bell)
            .read_line()
    }
}

impl Default for ShellPrompt {
    fn default() -> Self {
        ShellPrompt::new()
    }
}
