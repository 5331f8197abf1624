use crate::command::{Context, Launcher, LoopStatus};
use crate::error::ShellError;
use crate::external::ProcessLauncher;
use crate::lexer::{self, ArgVector};
use crate::reader::{InputLine, LineSource};
use crate::registry::BuiltinTable;
use std::io::{self, Write};

/// Prompt shown before every line is read.
pub const PROMPT: &str = "> ";

/// Why the main loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// The input stream ran out.
    EndOfInput,
    /// The `exit` builtin was run.
    Exit,
}

/// Report how the main loop ended and pick the process exit status.
///
/// Both ways of stopping succeed with 0. A fatal error is written to `stderr`
/// and gives 1.
pub fn exit_status(outcome: Result<Shutdown, ShellError>, stderr: &mut dyn Write) -> u8 {
    match outcome {
        Ok(shutdown) => {
            log::debug!("shell stopped: {shutdown:?}");
            0
        }
        Err(e) => {
            log::debug!("fatal: {e:?}");
            let _ = writeln!(stderr, "lsh: {e}");
            1
        }
    }
}

/// A minimal interactive command interpreter.
///
/// Each line is split into words; the first word names either a builtin from
/// the [`BuiltinTable`] or an external program handed to the [`Launcher`].
///
/// Example
/// ```
/// use lsh::{Interpreter, InputLine, LoopStatus};
/// let mut sh = Interpreter::default();
/// let status = sh.execute_line(&InputLine::from("exit")).unwrap();
/// assert_eq!(status, LoopStatus::Stop);
/// ```
pub struct Interpreter {
    builtins: BuiltinTable,
    names: Vec<&'static str>,
    launcher: Box<dyn Launcher>,
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
}

impl Interpreter {
    /// Create an interpreter writing to the process's standard streams.
    pub fn new(builtins: BuiltinTable, launcher: Box<dyn Launcher>) -> Self {
        let names = builtins.names();
        Self {
            builtins,
            names,
            launcher,
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
        }
    }

    /// Redirect the shell's own output (prompt, builtin output, diagnostics).
    ///
    /// External programs keep inheriting the process's real streams.
    pub fn with_output(mut self, stdout: Box<dyn Write>, stderr: Box<dyn Write>) -> Self {
        self.stdout = stdout;
        self.stderr = stderr;
        self
    }

    pub fn builtins(&self) -> &BuiltinTable {
        &self.builtins
    }

    /// Dispatch one parsed command line.
    ///
    /// An empty vector is a no-op. Otherwise a builtin with a matching name is
    /// run and its status returned verbatim; anything else goes to the launcher.
    pub fn execute(&mut self, argv: &ArgVector<'_>) -> LoopStatus {
        let Some(name) = argv.command() else {
            return LoopStatus::Continue;
        };

        let status = match self.builtins.lookup(name) {
            Some(builtin) => {
                log::debug!(
                    "running builtin {} with {} argument(s)",
                    builtin.name(),
                    argv.len() - 1
                );
                let mut ctx = Context {
                    stdout: &mut *self.stdout,
                    stderr: &mut *self.stderr,
                    builtins: &self.names,
                };
                builtin.invoke(argv, &mut ctx)
            }
            None => {
                log::debug!("launching external program {}", name.to_string_lossy());
                self.launcher
                    .launch(argv, &mut *self.stdout, &mut *self.stderr)
            }
        };
        let _ = self.stdout.flush();
        status
    }

    /// Split `line` into arguments and dispatch it.
    pub fn execute_line(&mut self, line: &InputLine) -> Result<LoopStatus, ShellError> {
        let argv = lexer::split_into_args(line)?;
        Ok(self.execute(&argv))
    }

    /// Run the read-dispatch loop until `exit` or end of input.
    ///
    /// Errors returned from here are fatal: the caller should report them and
    /// exit with a failure status.
    pub fn repl(&mut self, source: &mut dyn LineSource) -> Result<Shutdown, ShellError> {
        loop {
            let Some(line) = source.read_line(PROMPT, &mut *self.stdout)? else {
                return Ok(Shutdown::EndOfInput);
            };
            if self.execute_line(&line)? == LoopStatus::Stop {
                return Ok(Shutdown::Exit);
            }
        }
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the standard builtins and the process launcher.
    fn default() -> Self {
        Self::new(BuiltinTable::standard(), Box::new(ProcessLauncher::new()))
    }
}
