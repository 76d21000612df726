use std::fs::File;
use std::io::{self, Write};

use log::debug;

use crate::environment::Environment;
use crate::error::ShellError;
use crate::parser::{ParsedCommand, RedirectPlan};
use super::builtin::Builtin;
use super::executor::{Executor, ExecStatus, ExecOutcome};
use super::launcher::{LaunchRequest, ProcessLauncher, SystemLauncher};
use super::path_resolver::PathResolver;
use super::redirect::{CommandIo, RedirectFiles, open_target};

/// The shell's usual status for a command it could not find.
const NOT_FOUND_STATUS: i32 = 127;

/// Status for a command that was found but could not be started.
const CANNOT_EXECUTE_STATUS: i32 = 126;

/// Runs one parsed command, either in-process as a built-in or as an
/// external program found on the search path.
///
/// Redirect files live only for the duration of a single `exec` call.
pub struct DefaultExecutor<L: ProcessLauncher = SystemLauncher> {
    launcher: L,
}

impl DefaultExecutor<SystemLauncher> {
    pub fn new() -> Self {
        DefaultExecutor::with_launcher(SystemLauncher)
    }
}

impl Default for DefaultExecutor<SystemLauncher> {
    fn default() -> Self {
        DefaultExecutor::new()
    }
}

impl<L: ProcessLauncher> DefaultExecutor<L> {
    pub fn with_launcher(launcher: L) -> Self {
        DefaultExecutor { launcher }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    fn exec_builtin(
        &mut self,
        builtin: Builtin,
        cmd: &ParsedCommand,
        env: &mut Environment,
    ) -> ExecStatus {
        let mut files = RedirectFiles::open(&cmd.redirects)?;
        let mut shell_stdout = io::stdout().lock();
        let mut shell_stderr = io::stderr().lock();

        let mut io = CommandIo {
            stdout: match files.stdout.as_mut() {
                Some(f) => f as &mut dyn Write,
                None => &mut shell_stdout,
            },
            stderr: match files.stderr.as_mut() {
                Some(f) => f as &mut dyn Write,
                None => &mut shell_stderr,
            },
        };

        debug!("builtin {} {:?}", builtin.name(), cmd.args());
        let status = builtin.run(&cmd.argv, &mut io, env);
        io.stdout.flush()?;
        status
    }

    fn exec_external(&mut self, name: &str, cmd: &ParsedCommand, env: &mut Environment) -> ExecStatus {
        let resolver = PathResolver::from_env(env);
        let Some(path) = resolver.resolve(name) else {
            return report_not_found(name, &cmd.redirects);
        };

        let files = RedirectFiles::open(&cmd.redirects)?;
        let err_target = files.stderr.as_ref().map(File::try_clone).transpose()?;

        debug!("launching {} {:?}", path.display(), cmd.args());
        let launched = self.launcher.launch(LaunchRequest {
            program: &path,
            arg0: name,
            args: cmd.args(),
            envs: env.exported_vars(),
            stdout: files.stdout,
            stderr: files.stderr,
        });

        match launched {
            Ok(code) => {
                debug!("{} exited with {}", name, code);
                Ok(ExecOutcome::Code(code))
            }
            Err(source) => {
                let err = ShellError::Launch {
                    name: name.to_string(),
                    source,
                };
                match err_target {
                    Some(mut f) => {
                        writeln!(f, "{}", err)?;
                        Ok(ExecOutcome::Code(CANNOT_EXECUTE_STATUS))
                    }
                    None => Err(err),
                }
            }
        }
    }
}

impl<L: ProcessLauncher> Executor for DefaultExecutor<L> {
    fn exec(&mut self, cmd: &ParsedCommand, env: &mut Environment) -> ExecStatus {
        let Some(name) = cmd.name() else {
            return Ok(ExecOutcome::Code(0));
        };

        match Builtin::lookup(name) {
            Some(builtin) => self.exec_builtin(builtin, cmd, env),
            None => self.exec_external(name, cmd, env),
        }
    }
}

/// Writes "`name`: command not found" to the redirected stderr when there is
/// one, otherwise to the shell's own stderr.
fn report_not_found(name: &str, redirects: &RedirectPlan) -> ExecStatus {
    let message = ShellError::CommandNotFound(name.to_string());
    match &redirects.stderr {
        Some(target) => {
            let mut f = open_target(target)?;
            writeln!(f, "{}", message)?;
        }
        None => eprintln!("{}", message),
    }
    Ok(ExecOutcome::Code(NOT_FOUND_STATUS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::launcher::tests::{Launched, MockLauncher};
    use crate::executor::path_resolver::tests::touch;
    use crate::lexer::tokenize;
    use crate::parser::parse;
    use crate::repl::tests::CWD_LOCK;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn command(line: &str) -> ParsedCommand {
        parse(tokenize(line)).unwrap()
    }

    fn env_with_path(dir: &Path) -> Environment {
        let mut env = Environment::empty();
        env.set("PATH", &dir.to_string_lossy());
        env
    }

    #[test]
    fn test_builtin_stdout_redirect() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.txt");
        let mut executor = DefaultExecutor::with_launcher(MockLauncher::new());
        let mut env = Environment::empty();

        let status = executor
            .exec(&command(&format!("echo hi > {}", out.display())), &mut env)
            .unwrap();
        assert_eq!(status, ExecOutcome::Code(0));
        assert_eq!(fs::read_to_string(&out).unwrap(), "hi\n");
        assert!(executor.launcher().launched.is_empty());
    }

    #[test]
    fn test_append_accumulates_and_truncate_discards() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("log.txt");
        let mut executor = DefaultExecutor::with_launcher(MockLauncher::new());
        let mut env = Environment::empty();

        executor
            .exec(&command(&format!("echo one >> {}", out.display())), &mut env)
            .unwrap();
        executor
            .exec(&command(&format!("echo two 1>> {}", out.display())), &mut env)
            .unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "one\ntwo\n");

        executor
            .exec(&command(&format!("echo three 1> {}", out.display())), &mut env)
            .unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "three\n");
    }

    #[test]
    fn test_builtin_stderr_redirect_captures_cd_error() {
        let _guard = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = TempDir::new().unwrap();
        let err = dir.path().join("err.txt");
        let out = dir.path().join("pwd.txt");
        let before = std::env::current_dir().unwrap();
        let mut executor = DefaultExecutor::with_launcher(MockLauncher::new());
        let mut env = Environment::empty();

        let status = executor
            .exec(
                &command(&format!("cd /no/such/dir/anywhere 2> {}", err.display())),
                &mut env,
            )
            .unwrap();
        assert_eq!(status, ExecOutcome::Code(1));
        assert_eq!(
            fs::read_to_string(&err).unwrap(),
            "cd: /no/such/dir/anywhere: No such file or directory\n"
        );

        executor
            .exec(&command(&format!("pwd > {}", out.display())), &mut env)
            .unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            format!("{}\n", before.display())
        );
    }

    #[test]
    fn test_redirect_open_failure_skips_builtin() {
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("missing").join("out.txt");
        let err_file = dir.path().join("err.txt");
        let mut executor = DefaultExecutor::with_launcher(MockLauncher::new());
        let mut env = Environment::empty();

        let line = format!("type 2> {} > {}", err_file.display(), bad.display());
        let result = executor.exec(&command(&line), &mut env);
        assert!(matches!(result, Err(ShellError::FileOpen { .. })));
        // stdout is opened first, so the stderr target is never created
        assert!(!err_file.exists());
    }

    #[test]
    fn test_external_gets_args_and_redirects() {
        let bin = TempDir::new().unwrap();
        let tool = touch(bin.path(), "tool", 0o755);
        let out_dir = TempDir::new().unwrap();
        let out = out_dir.path().join("out.txt");
        let mut executor = DefaultExecutor::with_launcher(MockLauncher::new());
        let mut env = env_with_path(bin.path());

        let line = format!("tool 'a b' > {} c", out.display());
        let status = executor.exec(&command(&line), &mut env).unwrap();
        assert_eq!(status, ExecOutcome::Code(0));
        assert_eq!(
            executor.launcher().launched,
            vec![Launched {
                program: tool,
                arg0: "tool".to_string(),
                args: vec!["a b".to_string(), "c".to_string()],
                redirected_stdout: true,
                redirected_stderr: false,
            }]
        );
        assert_eq!(fs::read_to_string(&out).unwrap(), "mock a b c\n");
    }

    #[test]
    fn test_external_status_is_passed_through() {
        let bin = TempDir::new().unwrap();
        touch(bin.path(), "failing", 0o755);
        let mut launcher = MockLauncher::new();
        launcher.status = 2;
        let mut executor = DefaultExecutor::with_launcher(launcher);
        let mut env = env_with_path(bin.path());

        let status = executor.exec(&command("failing"), &mut env).unwrap();
        assert_eq!(status, ExecOutcome::Code(2));
    }

    #[test]
    fn test_not_found_goes_to_stderr_target() {
        let bin = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let err = out_dir.path().join("err.txt");
        let out = out_dir.path().join("out.txt");
        fs::write(&err, "earlier\n").unwrap();
        let mut executor = DefaultExecutor::with_launcher(MockLauncher::new());
        let mut env = env_with_path(bin.path());

        let line = format!("nosuchcmd > {} 2>> {}", out.display(), err.display());
        let status = executor.exec(&command(&line), &mut env).unwrap();
        assert_eq!(status, ExecOutcome::Code(NOT_FOUND_STATUS));
        assert_eq!(
            fs::read_to_string(&err).unwrap(),
            "earlier\nnosuchcmd: command not found\n"
        );
        assert!(!out.exists());
        assert!(executor.launcher().launched.is_empty());
    }

    #[test]
    fn test_launch_failure_goes_to_stderr_target() {
        let bin = TempDir::new().unwrap();
        touch(bin.path(), "garbage", 0o755);
        let out_dir = TempDir::new().unwrap();
        let err = out_dir.path().join("err.txt");
        let mut launcher = MockLauncher::new();
        launcher.failure = Some("Exec format error");
        let mut executor = DefaultExecutor::with_launcher(launcher);
        let mut env = env_with_path(bin.path());

        let line = format!("garbage 2> {}", err.display());
        let status = executor.exec(&command(&line), &mut env).unwrap();
        assert_eq!(status, ExecOutcome::Code(CANNOT_EXECUTE_STATUS));
        assert_eq!(
            fs::read_to_string(&err).unwrap(),
            "garbage: Exec format error\n"
        );
    }

    #[test]
    fn test_launch_failure_without_redirect_is_returned() {
        let bin = TempDir::new().unwrap();
        touch(bin.path(), "garbage", 0o755);
        let mut launcher = MockLauncher::new();
        launcher.failure = Some("Exec format error");
        let mut executor = DefaultExecutor::with_launcher(launcher);
        let mut env = env_with_path(bin.path());

        let result = executor.exec(&command("garbage"), &mut env);
        assert!(matches!(result, Err(ShellError::Launch { ref name, .. }) if name == "garbage"));
    }

    #[test]
    fn test_unformatted_binary_reports_into_stderr_target() {
        let bin = TempDir::new().unwrap();
        let garbage = touch(bin.path(), "garbage", 0o755);
        fs::write(&garbage, [0x00, 0x01, 0x02, 0x03, 0xff, 0xfe]).unwrap();
        let out_dir = TempDir::new().unwrap();
        let err = out_dir.path().join("err.txt");
        let mut executor = DefaultExecutor::new();
        let mut env = env_with_path(bin.path());

        let line = format!("garbage 2> {}", err.display());
        let status = executor.exec(&command(&line), &mut env).unwrap();
        assert_eq!(status, ExecOutcome::Code(CANNOT_EXECUTE_STATUS));
        assert!(fs::read_to_string(&err).unwrap().starts_with("garbage: "));
    }

    #[test]
    fn test_redirect_open_failure_skips_launch() {
        let bin = TempDir::new().unwrap();
        touch(bin.path(), "tool", 0o755);
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("missing").join("out.txt");
        let mut executor = DefaultExecutor::with_launcher(MockLauncher::new());
        let mut env = env_with_path(bin.path());

        let result = executor.exec(&command(&format!("tool > {}", bad.display())), &mut env);
        assert!(matches!(result, Err(ShellError::FileOpen { .. })));
        assert!(executor.launcher().launched.is_empty());
    }

    #[test]
    fn test_not_found_without_redirect() {
        let bin = TempDir::new().unwrap();
        let mut executor = DefaultExecutor::with_launcher(MockLauncher::new());
        let mut env = env_with_path(bin.path());

        let status = executor.exec(&command("nosuchcmd arg"), &mut env).unwrap();
        assert_eq!(status, ExecOutcome::Code(NOT_FOUND_STATUS));
    }

    #[test]
    fn test_exit_is_reported_to_caller() {
        let mut executor = DefaultExecutor::with_launcher(MockLauncher::new());
        let mut env = Environment::empty();
        let status = executor.exec(&command("exit 5"), &mut env).unwrap();
        assert_eq!(status, ExecOutcome::Exit(5));
    }

    #[test]
    fn test_real_process_output_is_redirected() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.txt");
        let mut executor = DefaultExecutor::new();
        let mut env = Environment::empty();
        env.set("PATH", "/bin:/usr/bin");
        env.export("PATH");

        let line = format!("sh -c 'echo \"$0 ran\"' > {}", out.display());
        let status = executor.exec(&command(&line), &mut env).unwrap();
        assert_eq!(status, ExecOutcome::Code(0));
        assert_eq!(fs::read_to_string(&out).unwrap(), "sh ran\n");
    }
}
