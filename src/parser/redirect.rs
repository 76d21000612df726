use log::debug;

use super::{ParsedCommand, RedirectPlan, RedirectTarget};
use crate::error::ShellError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

fn operator(token: &str) -> Option<(Stream, bool)> {
    match token {
        ">" | "1>" => Some((Stream::Stdout, false)),
        ">>" | "1>>" => Some((Stream::Stdout, true)),
        "2>" => Some((Stream::Stderr, false)),
        "2>>" => Some((Stream::Stderr, true)),
        _ => None,
    }
}

/// Pulls `>`, `1>`, `>>`, `1>>`, `2>` and `2>>` (each with its file operand)
/// out of a token list.
///
/// The first token is the command name and is never read as an operator. When
/// a stream is redirected more than once the last operator wins. An operator
/// without a following file name rejects the whole line.
pub fn parse(tokens: Vec<String>) -> Result<ParsedCommand, ShellError> {
    let mut argv = Vec::with_capacity(tokens.len());
    let mut redirects = RedirectPlan::default();
    let mut iter = tokens.into_iter();

    if let Some(name) = iter.next() {
        argv.push(name);
    }

    while let Some(token) = iter.next() {
        let Some((stream, append)) = operator(&token) else {
            argv.push(token);
            continue;
        };
        let file = iter.next().ok_or(ShellError::Syntax)?;
        let target = Some(RedirectTarget::new(file, append));
        match stream {
            Stream::Stdout => redirects.stdout = target,
            Stream::Stderr => redirects.stderr = target,
        }
    }

    debug!("parsed argv={:?} redirects={:?}", argv, redirects);
    Ok(ParsedCommand { argv, redirects })
}
