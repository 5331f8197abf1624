//! A small interactive command interpreter.
//!
//! The shell reads a line, splits it on whitespace and either runs one of a
//! fixed set of builtins in-process or launches an external program and waits
//! for it. There are no pipes, redirections, quoting or variables: a line is
//! just a command name followed by its arguments.
//!
//! The main entry point is [`Interpreter`]. Lines come from a [`LineSource`],
//! either the plain [`StreamReader`] or the `rustyline`-backed
//! [`EditorReader`].

mod buffer;
mod builtin;
pub mod command;
pub mod error;
mod external;
mod interpreter;
pub mod io_adapters;
mod lexer;
mod reader;
mod registry;

pub use buffer::{ARG_CHUNK, LINE_CHUNK};
pub use command::LoopStatus;
pub use error::ShellError;
pub use external::{EXEC_FAILURE_STATUS, OsSpawner, ProcessLauncher, Spawn, Termination};
pub use interpreter::{Interpreter, PROMPT, Shutdown, exit_status};
pub use lexer::{ArgVector, DELIMITERS, split_into_args};
pub use reader::{EditorReader, InputLine, LineSource, StreamReader};
pub use registry::BuiltinTable;
