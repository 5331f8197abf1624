//! A module implementing lexical analysis (tokenization) of a command line.
//!
//! There is no quoting, escaping or expansion: a token is simply a maximal run
//! of bytes that are not delimiters.

use crate::buffer::{ARG_CHUNK, ChunkedVec};
use crate::error::ShellError;
use crate::reader::InputLine;
use std::ffi::OsStr;

/// Bytes that separate tokens: space, tab, carriage return, newline, bell.
pub const DELIMITERS: [u8; 5] = [b' ', b'\t', b'\r', b'\n', 0x07];

/// The parsed form of one command line.
///
/// Every argument is a view into the [`InputLine`] it was split from, so the
/// vector cannot outlive that line. Index 0 is the command name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgVector<'line> {
    args: Vec<&'line OsStr>,
    slots: usize,
}

impl<'line> ArgVector<'line> {
    /// The command name, or `None` for a line without tokens.
    pub fn command(&self) -> Option<&'line OsStr> {
        self.get(0)
    }

    /// The argument at `index`; `None` at and past the end, which plays the
    /// role of the terminating sentinel.
    pub fn get(&self, index: usize) -> Option<&'line OsStr> {
        self.args.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn as_slice(&self) -> &[&'line OsStr] {
        &self.args
    }

    /// Slots allocated while splitting, always a multiple of [`ARG_CHUNK`].
    pub fn slot_capacity(&self) -> usize {
        self.slots
    }
}

fn is_delimiter(byte: &u8) -> bool {
    DELIMITERS.contains(byte)
}

#[cfg(unix)]
fn as_os_str(token: &[u8]) -> &OsStr {
    use std::os::unix::ffi::OsStrExt;
    OsStr::from_bytes(token)
}

#[cfg(not(unix))]
fn as_os_str(token: &[u8]) -> &OsStr {
    // Lines are valid UTF-8 here and delimiters are ASCII.
    OsStr::new(std::str::from_utf8(token).unwrap_or_default())
}

/// Split `line` into delimiter-separated arguments without copying any bytes.
pub fn split_into_args(line: &InputLine) -> Result<ArgVector<'_>, ShellError> {
    let mut slots = ChunkedVec::with_increment(ARG_CHUNK)?;
    for token in line.as_bytes().split(is_delimiter) {
        if !token.is_empty() {
            slots.push(as_os_str(token))?;
        }
    }
    let capacity = slots.capacity();
    Ok(ArgVector {
        args: slots.into_vec(),
        slots: capacity,
    })
}
