use crate::environment::Environment;
use crate::error::ShellError;
use crate::executor::redirect::CommandIo;
use crate::executor::{ExecOutcome, ExecStatus};

use super::commands;

/// Commands the shell runs in-process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Echo,
    Type,
    Pwd,
    Cd,
}

impl Builtin {
    pub const ALL: [Builtin; 5] = [
        Builtin::Exit,
        Builtin::Echo,
        Builtin::Type,
        Builtin::Pwd,
        Builtin::Cd,
    ];

    pub const NAMES: &'static [&'static str] = &["exit", "echo", "type", "pwd", "cd"];

    pub fn lookup(name: &str) -> Option<Builtin> {
        Builtin::ALL.into_iter().find(|b| b.name() == name)
    }

    pub fn is_builtin(name: &str) -> bool {
        Builtin::lookup(name).is_some()
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Exit => "exit",
            Builtin::Echo => "echo",
            Builtin::Type => "type",
            Builtin::Pwd => "pwd",
            Builtin::Cd => "cd",
        }
    }

    /// `argv` includes the command name. Misuse is reported on `io.stderr`
    /// and turned into status 1; only I/O failures come back as errors.
    pub fn run(self, argv: &[String], io: &mut CommandIo<'_>, env: &mut Environment) -> ExecStatus {
        let result = match self {
            Builtin::Exit => commands::exit(argv),
            Builtin::Echo => commands::echo(argv, io),
            Builtin::Type => commands::type_of(argv, io, env),
            Builtin::Pwd => commands::pwd(io),
            Builtin::Cd => commands::cd(argv, env),
        };

        match result {
            Err(ShellError::Handler(msg)) => {
                writeln!(io.stderr, "{}", msg)?;
                Ok(ExecOutcome::Code(1))
            }
            other => other,
        }
    }
}
