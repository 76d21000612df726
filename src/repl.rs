use log::debug;

use crate::completion::Completer;
use crate::environment::Environment;
use crate::error::ShellError;
use crate::executor::path_resolver::PathResolver;
use crate::executor::{DefaultExecutor, ExecOutcome, ExecStatus, Executor};
use crate::io::editor::ReadOutcome;
use crate::lexer::tokenize;
use crate::parser::parse;
use crate::prompt::ShellPrompt;

/// The read-parse-execute loop. One line is fully executed before the next
/// one is read.
pub struct Repl<E: Executor = DefaultExecutor> {
    env: Environment,
    executor: E,
    prompt: ShellPrompt,
}

impl Repl<DefaultExecutor> {
    pub fn new(env: Environment, prompt: ShellPrompt) -> Self {
        Repl::with_executor(env, prompt, DefaultExecutor::new())
    }
}

impl<E: Executor> Repl<E> {
    pub fn with_executor(env: Environment, prompt: ShellPrompt, executor: E) -> Self {
        Repl { env, executor, prompt }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Runs until `exit`, Ctrl-C or end of input and returns the status the
    /// process should exit with. Only a failure to read input is an error.
    pub fn run(&mut self) -> Result<i32, ShellError> {
        loop {
            // Rebuilt per line so completion follows the current search path.
            let completer = Completer::new(PathResolver::from_env(&self.env));
            let line = match self.prompt.read_line(&completer)? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Interrupted => {
                    debug!("interrupted");
                    return Ok(0);
                }
                ReadOutcome::Eof => return Ok(0),
            };

            match self.eval(&line) {
                Ok(ExecOutcome::Exit(code)) => return Ok(code),
                Ok(ExecOutcome::Code(code)) => debug!("status {}", code),
                Err(e) => eprintln!("minish: {}", e),
            }
        }
    }

    /// One cycle: tokenize, strip redirections, execute. Blank lines and
    /// lines that reduce to no words do nothing.
    pub fn eval(&mut self, line: &str) -> ExecStatus {
        let line = line.trim();
        if line.is_empty() {
            return Ok(ExecOutcome::Code(0));
        }

        let tokens = tokenize(line);
        debug!("tokens {:?}", tokens);
        if tokens.is_empty() {
            return Ok(ExecOutcome::Code(0));
        }

        let cmd = parse(tokens)?;
        if cmd.argv.is_empty() {
            return Ok(ExecOutcome::Code(0));
        }

        self.executor.exec(&cmd, &mut self.env)
    }
}
