use std::io::{self, Read, Write};

use crate::completion::{Completer, Completion};
use super::input::{Key, KeyReader};

/// What the terminal side has to do after a key was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Nothing,
    Redraw,
    Bell,
    ShowMatches(Vec<String>),
    Submit(String),
    Abort,
    Eof,
}

/// How a line read ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    Interrupted,
    Eof,
}

/// Buffer plus the tab-press memory for one line read.
///
/// A second tab on an unchanged buffer lists all candidates; any edit forgets
/// the previous presses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    buffer: String,
    last_prefix: Option<String>,
    tab_presses: u32,
}

impl EditorState {
    pub fn new() -> Self {
        EditorState::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn tab_presses(&self) -> u32 {
        self.tab_presses
    }

    pub fn apply(&mut self, key: Key, completer: &Completer) -> Action {
        match key {
            Key::Char(c) => {
                self.buffer.push(c);
                self.forget_tabs();
                Action::Redraw
            }
            Key::Backspace => {
                self.buffer.pop();
                self.forget_tabs();
                Action::Redraw
            }
            Key::Enter => {
                let line = std::mem::take(&mut self.buffer);
                self.forget_tabs();
                Action::Submit(line)
            }
            Key::Interrupt => {
                *self = EditorState::default();
                Action::Abort
            }
            Key::EndOfFile if self.buffer.is_empty() => Action::Eof,
            Key::Tab => self.complete(completer),
            Key::EndOfFile | Key::Ignored => Action::Nothing,
        }
    }

    fn complete(&mut self, completer: &Completer) -> Action {
        // Only the command word is completed.
        if self.buffer.contains(' ') {
            self.forget_tabs();
            return Action::Nothing;
        }

        if self.last_prefix.as_deref() != Some(self.buffer.as_str()) {
            self.tab_presses = 0;
            self.last_prefix = Some(self.buffer.clone());
        }
        self.tab_presses += 1;

        match completer.complete(&self.buffer, self.tab_presses) {
            Completion::Suffix(suffix) => {
                self.buffer.push_str(&suffix);
                self.buffer.push(' ');
                self.forget_tabs();
                Action::Redraw
            }
            Completion::Matches(matches) => Action::ShowMatches(matches),
            Completion::Ambiguous | Completion::NoMatch => Action::Bell,
        }
    }

    fn forget_tabs(&mut self) {
        self.tab_presses = 0;
        self.last_prefix = None;
    }
}

/// Drives an `EditorState` from a key source and paints it onto `out`.
///
/// Output uses `\r\n` line ends because raw mode turns off output
/// post-processing.
pub struct LineEditor<'a, R, W> {
    keys: KeyReader<R>,
    out: W,
    prompt: &'a str,
    completer: &'a Completer,
    bell: bool,
    state: EditorState,
}

impl<'a, R: Read, W: Write> LineEditor<'a, R, W> {
    pub fn new(input: R, out: W, prompt: &'a str, completer: &'a Completer) -> Self {
        LineEditor {
            keys: KeyReader::new(input),
            out,
            prompt,
            completer,
            bell: true,
            state: EditorState::new(),
        }
    }

    pub fn bell(mut self, enabled: bool) -> Self {
        self.bell = enabled;
        self
    }

    pub fn read_line(&mut self) -> io::Result<ReadOutcome> {
        self.state = EditorState::new();
        write!(self.out, "\r{}", self.prompt)?;
        self.out.flush()?;

        loop {
            // A last line without a newline still runs; the next call sees Eof.
            let Some(key) = self.keys.next_key()? else {
                write!(self.out, "\r\n")?;
                self.out.flush()?;
                if self.state.buffer.is_empty() {
                    return Ok(ReadOutcome::Eof);
                }
                return Ok(ReadOutcome::Line(std::mem::take(&mut self.state.buffer)));
            };

            let outcome = match self.state.apply(key, self.completer) {
                Action::Nothing => None,
                Action::Redraw => {
                    self.render()?;
                    None
                }
                Action::Bell => {
                    if self.bell {
                        write!(self.out, "\x07")?;
                    }
                    None
                }
                Action::ShowMatches(matches) => {
                    write!(self.out, "\r\n{}\r\n", matches.join("  "))?;
                    self.render()?;
                    None
                }
                Action::Submit(line) => Some(ReadOutcome::Line(line)),
                Action::Abort => Some(ReadOutcome::Interrupted),
                Action::Eof => Some(ReadOutcome::Eof),
            };

            if let Some(outcome) = outcome {
                write!(self.out, "\r\n")?;
                self.out.flush()?;
                return Ok(outcome);
            }
            self.out.flush()?;
        }
    }

    // Clear the line, then repaint prompt and buffer.
    fn render(&mut self) -> io::Result<()> {
        write!(self.out, "\r\x1b[K{}{}", self.prompt, self.state.buffer())
    }
}
