mod redirect;

use std::path::PathBuf;

pub use redirect::parse;

/// Where one standard stream of a command goes, and whether the file is
/// appended to or truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub path: PathBuf,
    pub append: bool,
}

impl RedirectTarget {
    pub fn new(path: impl Into<PathBuf>, append: bool) -> Self {
        RedirectTarget { path: path.into(), append }
    }
}

/// A missing target means the stream is inherited from the shell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectPlan {
    pub stdout: Option<RedirectTarget>,
    pub stderr: Option<RedirectTarget>,
}

impl RedirectPlan {
    pub fn is_empty(&self) -> bool {
        self.stdout.is_none() && self.stderr.is_none()
    }
}

/// Command words with redirection operators stripped out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub argv: Vec<String>,
    pub redirects: RedirectPlan,
}

impl ParsedCommand {
    pub fn name(&self) -> Option<&str> {
        self.argv.first().map(|s| s.as_str())
    }

    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or(&[])
    }
}
