use crate::environment::Environment;
use crate::error::ShellError;
use crate::parser::ParsedCommand;

pub type ExecStatus = Result<ExecOutcome, ShellError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    /// The command ran and finished with this status.
    Code(i32),
    /// The shell itself should terminate with this status.
    Exit(i32),
}

pub trait Executor {
    fn exec(&mut self, cmd: &ParsedCommand, env: &mut Environment) -> ExecStatus;
}
