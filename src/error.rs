use std::io;

/// Errors that escape a single command invocation.
///
/// Most failures a user can cause (a bad `cd` target, a missing program) are
/// reported where they happen and never reach this type. What remains is either
/// fatal for the whole shell (`Allocation`, `Io`, `Editor`) or a failure the
/// launcher reports on the caller's behalf (`Spawn`, `Wait`).
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// Growing the line buffer or the argument slots failed.
    #[error("allocation error")]
    Allocation,

    /// A builtin with the same name is already registered.
    #[error("builtin `{0}` is already registered")]
    DuplicateBuiltin(&'static str),

    /// The OS refused to create a child process.
    #[error("{0}")]
    Spawn(#[source] io::Error),

    /// Waiting for a child process failed.
    #[error("{0}")]
    Wait(#[source] io::Error),

    /// The interactive line editor failed for a reason other than Ctrl-C / Ctrl-D.
    #[error("line editor: {0}")]
    Editor(#[from] rustyline::error::ReadlineError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<std::collections::TryReserveError> for ShellError {
    fn from(_: std::collections::TryReserveError) -> Self {
        ShellError::Allocation
    }
}
