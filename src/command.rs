use crate::lexer::ArgVector;
use std::io::Write;

/// Signal threaded from a command back to the main loop.
///
/// Only the `exit` builtin ever produces [`LoopStatus::Stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    Continue,
    Stop,
}

impl LoopStatus {
    /// Conventional numeric form: 1 to keep going, 0 to stop.
    pub fn code(self) -> i32 {
        match self {
            LoopStatus::Continue => 1,
            LoopStatus::Stop => 0,
        }
    }
}

/// What a builtin gets to work with besides its arguments.
pub struct Context<'a> {
    /// Regular output, e.g. the `pwd` path or the `ls` listing.
    pub stdout: &'a mut dyn Write,
    /// Diagnostics.
    pub stderr: &'a mut dyn Write,
    /// Names of all registered builtins, in registration order.
    pub builtins: &'a [&'static str],
}

/// Object-safe trait for a command executed inside the shell process.
///
/// Every builtin of the shell is adapted to it by a generic factory.
pub trait Builtin {
    /// The name the command is invoked by.
    fn name(&self) -> &'static str;

    /// Run the command. `argv` includes the command name at index 0.
    fn invoke(&self, argv: &ArgVector<'_>, ctx: &mut Context<'_>) -> LoopStatus;
}

/// Runs everything that is not a builtin.
pub trait Launcher {
    /// Execute `argv` as an external program and wait for it to finish.
    ///
    /// Failures are reported on `stderr`; they never stop the shell.
    fn launch(
        &self,
        argv: &ArgVector<'_>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> LoopStatus;
}
