use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;

use log::debug;

use crate::error::ShellError;
use crate::parser::{RedirectPlan, RedirectTarget};

/// Output handles a command writes to. Built-ins receive these instead of
/// touching the process-wide streams.
pub struct CommandIo<'a> {
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
}

/// Files opened for one command's redirections. Dropping it closes them.
#[derive(Debug, Default)]
pub struct RedirectFiles {
    pub stdout: Option<File>,
    pub stderr: Option<File>,
}

impl RedirectFiles {
    /// Opens stdout's target first, then stderr's. If either fails nothing
    /// is kept open.
    pub fn open(plan: &RedirectPlan) -> Result<Self, ShellError> {
        let stdout = plan.stdout.as_ref().map(open_target).transpose()?;
        let stderr = plan.stderr.as_ref().map(open_target).transpose()?;
        Ok(RedirectFiles { stdout, stderr })
    }
}

/// Creates the file if needed, then truncates or appends per the target.
pub fn open_target(target: &RedirectTarget) -> Result<File, ShellError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).mode(0o644);
    if target.append {
        options.append(true);
    } else {
        options.truncate(true);
    }

    debug!("opening {} (append={})", target.path.display(), target.append);
    options.open(&target.path).map_err(|source| ShellError::FileOpen {
        path: target.path.clone(),
        source,
    })
}
