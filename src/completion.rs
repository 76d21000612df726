use std::collections::BTreeSet;

use log::debug;

use crate::executor::builtin::Builtin;
use crate::executor::path_resolver::PathResolver;

/// Result of one tab press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    NoMatch,
    /// Exactly one candidate; holds the text still missing after the prefix.
    Suffix(String),
    /// Several candidates on a first press.
    Ambiguous,
    /// Several candidates on a repeated press, sorted.
    Matches(Vec<String>),
}

/// Completes the command-name word from built-ins, falling back to the files
/// on the search path when no built-in matches.
///
/// Directories are rescanned on every request, so programs installed after
/// the shell started show up straight away.
pub struct Completer {
    builtins: &'static [&'static str],
    resolver: PathResolver,
}

impl Completer {
    pub fn new(resolver: PathResolver) -> Self {
        Completer::with_builtins(Builtin::NAMES, resolver)
    }

    pub fn with_builtins(builtins: &'static [&'static str], resolver: PathResolver) -> Self {
        Completer { builtins, resolver }
    }

    /// Sorted, deduplicated names that extend `prefix`.
    pub fn candidates(&self, prefix: &str) -> Vec<String> {
        if prefix.is_empty() || prefix.contains(' ') {
            return Vec::new();
        }
        let extends = |name: &str| name.starts_with(prefix) && name != prefix;

        let mut found: BTreeSet<String> = self
            .builtins
            .iter()
            .filter(|name| extends(**name))
            .map(|name| name.to_string())
            .collect();

        if found.is_empty() {
            for dir in self.resolver.dirs() {
                found.extend(
                    PathResolver::list_executables(dir)
                        .into_iter()
                        .filter(|name| extends(name.as_str())),
                );
            }
        }

        found.into_iter().collect()
    }

    /// `attempt` counts consecutive presses for the same prefix, starting at 1.
    pub fn complete(&self, prefix: &str, attempt: u32) -> Completion {
        let mut matches = self.candidates(prefix);
        debug!("completing {:?} (attempt {}): {:?}", prefix, attempt, matches);

        match matches.len() {
            0 => Completion::NoMatch,
            1 => {
                let only = matches.remove(0);
                Completion::Suffix(only[prefix.len()..].to_string())
            }
            _ if attempt >= 2 => Completion::Matches(matches),
            _ => Completion::Ambiguous,
        }
    }
}
