use std::fs::File;
use std::io;
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Everything needed to start one external program.
pub struct LaunchRequest<'a> {
    pub program: &'a Path,
    /// Name the program sees as `argv[0]`.
    pub arg0: &'a str,
    pub args: &'a [String],
    pub envs: Vec<(String, String)>,
    /// `None` inherits the shell's stream.
    pub stdout: Option<File>,
    pub stderr: Option<File>,
}

/// Runs a program to completion and reports its exit status.
pub trait ProcessLauncher {
    fn launch(&mut self, request: LaunchRequest<'_>) -> io::Result<i32>;
}

#[derive(Debug, Default)]
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn launch(&mut self, request: LaunchRequest<'_>) -> io::Result<i32> {
        let mut command = Command::new(request.program);
        command
            .arg0(request.arg0)
            .args(request.args)
            .env_clear()
            .envs(request.envs)
            .stdin(Stdio::inherit());

        match request.stdout {
            Some(f) => command.stdout(Stdio::from(f)),
            None => command.stdout(Stdio::inherit()),
        };
        match request.stderr {
            Some(f) => command.stderr(Stdio::from(f)),
            None => command.stderr(Stdio::inherit()),
        };

        let status = command.status()?;
        Ok(exit_code(status))
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => 1,
    }
}
