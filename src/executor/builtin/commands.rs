use std::io;
use std::path::PathBuf;

use log::debug;

use crate::environment::Environment;
use crate::error::ShellError;
use crate::executor::path_resolver::PathResolver;
use crate::executor::redirect::CommandIo;
use crate::executor::{ExecOutcome, ExecStatus};

use super::Builtin;

pub(super) fn exit(argv: &[String]) -> ExecStatus {
    let code = argv.get(1).and_then(|s| s.parse::<i32>().ok()).unwrap_or(0);
    Ok(ExecOutcome::Exit(code))
}

pub(super) fn echo(argv: &[String], io: &mut CommandIo<'_>) -> ExecStatus {
    let words = argv.get(1..).unwrap_or(&[]);
    writeln!(io.stdout, "{}", words.join(" "))?;
    Ok(ExecOutcome::Code(0))
}

pub(super) fn type_of(argv: &[String], io: &mut CommandIo<'_>, env: &Environment) -> ExecStatus {
    let names = argv.get(1..).unwrap_or(&[]);
    if names.is_empty() {
        return Err(ShellError::Handler("type: missing argument".to_string()));
    }

    let resolver = PathResolver::from_env(env);
    let mut code = 0;
    for name in names {
        if Builtin::is_builtin(name) {
            writeln!(io.stdout, "{} is a shell builtin", name)?;
        } else if let Some(path) = resolver.resolve(name) {
            writeln!(io.stdout, "{} is {}", name, path.display())?;
        } else {
            writeln!(io.stderr, "{}: not found", name)?;
            code = 1;
        }
    }
    Ok(ExecOutcome::Code(code))
}

pub(super) fn pwd(io: &mut CommandIo<'_>) -> ExecStatus {
    let cwd = std::env::current_dir()
        .map_err(|e| ShellError::Handler(format!("pwd: {}", e)))?;
    writeln!(io.stdout, "{}", cwd.display())?;
    Ok(ExecOutcome::Code(0))
}

/// `~` and `~/rest` expand against `HOME`; no argument means `HOME`.
pub(super) fn cd(argv: &[String], env: &mut Environment) -> ExecStatus {
    let target = match argv.get(1).map(|s| s.as_str()) {
        None | Some("~") => home(env)?,
        Some(dir) => match dir.strip_prefix("~/") {
            Some(rest) => home(env)?.join(rest),
            None => PathBuf::from(dir),
        },
    };

    if let Err(e) = std::env::set_current_dir(&target) {
        return Err(ShellError::Handler(format!(
            "cd: {}: {}",
            target.display(),
            describe(&e)
        )));
    }

    debug!("cd -> {}", target.display());
    if let Ok(cwd) = std::env::current_dir() {
        env.set("PWD", &cwd.to_string_lossy());
    }
    Ok(ExecOutcome::Code(0))
}

fn home(env: &Environment) -> Result<PathBuf, ShellError> {
    env.home()
        .ok_or_else(|| ShellError::Handler("cd: HOME not set".to_string()))
}

fn describe(e: &io::Error) -> String {
    match e.kind() {
        io::ErrorKind::NotFound => "No such file or directory".to_string(),
        io::ErrorKind::PermissionDenied => "Permission denied".to_string(),
        io::ErrorKind::NotADirectory => "Not a directory".to_string(),
        _ => e.to_string(),
    }
}
