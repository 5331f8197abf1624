use crate::command::{Launcher, LoopStatus};
use crate::error::ShellError;
use crate::lexer::ArgVector;
use std::ffi::OsStr;
use std::io::{self, Write};
use std::process::{Child, Command, ExitStatus};

/// Status a child is considered to have exited with when its program could
/// not be started at all.
pub const EXEC_FAILURE_STATUS: i32 = 1;

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Normal exit with the given code.
    Exited(i32),
    /// Killed by the given signal.
    Signaled(i32),
}

impl Termination {
    /// Single-number form in the usual shell convention: the exit code, or
    /// 128 plus the signal number.
    pub fn status_code(self) -> i32 {
        match self {
            Termination::Exited(code) => code,
            Termination::Signaled(signal) => 128 + signal,
        }
    }

    fn from_status(exit_status: ExitStatus) -> Self {
        match exit_status.code() {
            Some(code) => Termination::Exited(code),
            None => terminated_by_signal(exit_status),
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> Termination {
    use std::os::unix::process::ExitStatusExt;
    match exit_status.signal() {
        Some(signal) => Termination::Signaled(signal),
        None => Termination::Exited(-1),
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> Termination {
    Termination::Exited(-1)
}

/// Whether a spawn error means no process could be created, as opposed to the
/// program itself being missing or not executable.
fn is_creation_failure(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::OutOfMemory
    )
}

/// Creates the child process for a command line.
pub trait Spawn {
    /// Start `program` with `args`; the child is not waited for.
    fn spawn(&self, program: &OsStr, args: &[&OsStr]) -> io::Result<Child>;
}

/// Starts programs through [`Command`], looked up via `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsSpawner;

impl Spawn for OsSpawner {
    fn spawn(&self, program: &OsStr, args: &[&OsStr]) -> io::Result<Child> {
        Command::new(program).args(args).spawn()
    }
}

/// Launches external programs as child processes and waits for them.
///
/// The program inherits the shell's standard streams, environment and working
/// directory. There is no timeout: a child that never exits blocks the shell.
pub struct ProcessLauncher {
    spawner: Box<dyn Spawn>,
}

impl ProcessLauncher {
    /// A launcher that starts real processes.
    pub fn new() -> Self {
        Self::with_spawner(Box::new(OsSpawner))
    }

    pub fn with_spawner(spawner: Box<dyn Spawn>) -> Self {
        Self { spawner }
    }

    /// Run `argv` to completion.
    ///
    /// A program that cannot be found or executed is reported on `stderr` and
    /// counts as a child that exited with [`EXEC_FAILURE_STATUS`]; the shell
    /// itself never continues in a half-started child.
    pub fn run(
        &self,
        argv: &ArgVector<'_>,
        stderr: &mut dyn Write,
    ) -> Result<Termination, ShellError> {
        let Some((program, args)) = argv.as_slice().split_first() else {
            return Ok(Termination::Exited(0));
        };
        let name = program.to_string_lossy();

        let mut child = match self.spawner.spawn(program, args) {
            Ok(child) => child,
            Err(e) if is_creation_failure(&e) => return Err(ShellError::Spawn(e)),
            Err(e) => {
                log::debug!("could not execute {name}: {e}");
                writeln!(stderr, "lsh: {name}: {e}")?;
                return Ok(Termination::Exited(EXEC_FAILURE_STATUS));
            }
        };
        log::debug!("spawned {name} as pid {}", child.id());

        // Only returns once the child has exited or was killed; a stopped
        // child keeps us waiting.
        let exit_status = child.wait().map_err(ShellError::Wait)?;
        let termination = Termination::from_status(exit_status);
        log::debug!(
            "pid {} terminated: {:?} (status {})",
            child.id(),
            termination,
            termination.status_code()
        );
        Ok(termination)
    }
}

impl Default for ProcessLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl Launcher for ProcessLauncher {
    fn launch(
        &self,
        argv: &ArgVector<'_>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> LoopStatus {
        // The child writes to the same descriptor; keep output in order.
        let _ = stdout.flush();
        if let Err(e) = self.run(argv, stderr) {
            log::debug!("launch failed: {e:?}");
            let _ = writeln!(stderr, "lsh: {e}");
        }
        LoopStatus::Continue
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use crate::lexer::split_into_args;
    use crate::reader::InputLine;

    fn run_line(line: &str) -> (Result<Termination, ShellError>, String) {
        let line = InputLine::from(line);
        let argv = split_into_args(&line).unwrap();
        let mut err = Vec::new();
        let res = ProcessLauncher::new().run(&argv, &mut err);
        (res, String::from_utf8(err).unwrap())
    }

    #[test]
    fn successful_program_exits_zero() {
        let (res, err) = run_line("true");
        assert_eq!(res.unwrap(), Termination::Exited(0));
        assert!(err.is_empty());
    }

    #[test]
    fn exit_code_is_observed() {
        let (res, _) = run_line("sh -c exit${IFS}7");
        assert_eq!(res.unwrap(), Termination::Exited(7));

        let (res, _) = run_line("false");
        assert_eq!(res.unwrap(), Termination::Exited(1));
    }

    #[test]
    fn signal_termination_is_observed() {
        let (res, _) = run_line("sh -c kill${IFS}-9${IFS}$$");
        let termination = res.unwrap();
        assert_eq!(termination, Termination::Signaled(9));
        assert_eq!(termination.status_code(), 137);
    }

    #[test]
    fn missing_program_reports_and_fails() {
        let (res, err) = run_line("nonexistent-cmd-xyz --flag");
        assert_eq!(res.unwrap(), Termination::Exited(EXEC_FAILURE_STATUS));
        assert!(err.starts_with("lsh: nonexistent-cmd-xyz: "), "{err}");
    }

    #[test]
    fn launch_always_continues() {
        let line = InputLine::from("nonexistent-cmd-xyz");
        let argv = split_into_args(&line).unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = ProcessLauncher::new().launch(&argv, &mut out, &mut err);
        assert_eq!(status, LoopStatus::Continue);
        assert!(!err.is_empty());
    }

    #[test]
    fn creation_failures_are_classified() {
        assert!(is_creation_failure(&io::Error::from(
            io::ErrorKind::WouldBlock
        )));
        assert!(!is_creation_failure(&io::Error::from(
            io::ErrorKind::NotFound
        )));
    }

    /// Fails every spawn with the given error kind.
    struct FailingSpawner(io::ErrorKind);

    impl Spawn for FailingSpawner {
        fn spawn(&self, _program: &OsStr, _args: &[&OsStr]) -> io::Result<Child> {
            Err(io::Error::new(self.0, "fork: resource temporarily unavailable"))
        }
    }

    #[test]
    fn process_creation_failure_is_an_error() {
        let launcher = ProcessLauncher::with_spawner(Box::new(FailingSpawner(
            io::ErrorKind::WouldBlock,
        )));
        let line = InputLine::from("true");
        let argv = split_into_args(&line).unwrap();
        let mut err = Vec::new();

        let res = launcher.run(&argv, &mut err);

        assert!(matches!(res, Err(ShellError::Spawn(_))));
        assert!(err.is_empty());
    }

    #[test]
    fn launch_reports_process_creation_failure_and_continues() {
        let launcher = ProcessLauncher::with_spawner(Box::new(FailingSpawner(
            io::ErrorKind::OutOfMemory,
        )));
        let line = InputLine::from("sleep 10");
        let argv = split_into_args(&line).unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();

        let status = launcher.launch(&argv, &mut out, &mut err);

        assert_eq!(status, LoopStatus::Continue);
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "lsh: fork: resource temporarily unavailable\n"
        );
    }

    #[test]
    fn non_creation_spawn_error_counts_as_failed_exec() {
        let launcher = ProcessLauncher::with_spawner(Box::new(FailingSpawner(
            io::ErrorKind::PermissionDenied,
        )));
        let line = InputLine::from("./script.sh");
        let argv = split_into_args(&line).unwrap();
        let mut err = Vec::new();

        let res = launcher.run(&argv, &mut err);

        assert_eq!(res.unwrap(), Termination::Exited(EXEC_FAILURE_STATUS));
        assert!(String::from_utf8(err).unwrap().starts_with("lsh: ./script.sh: "));
    }
}
