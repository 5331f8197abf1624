//! Line acquisition: the byte-at-a-time stream reader and the optional
//! interactive editor.

use crate::buffer::{ChunkedVec, LINE_CHUNK};
use crate::error::ShellError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, BufReader, Read, Write};

/// One line of user input, without its trailing newline.
///
/// The bytes are kept as typed so arguments reach programs unchanged. Off
/// unix, where arguments must be Unicode, invalid UTF-8 is replaced when the
/// line is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    bytes: Vec<u8>,
}

impl InputLine {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[cfg(unix)]
    fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    #[cfg(not(unix))]
    fn from_bytes(bytes: Vec<u8>) -> Self {
        let bytes = match String::from_utf8(bytes) {
            Ok(text) => text.into_bytes(),
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned().into_bytes(),
        };
        Self { bytes }
    }
}

impl From<Vec<u8>> for InputLine {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<String> for InputLine {
    fn from(text: String) -> Self {
        Self {
            bytes: text.into_bytes(),
        }
    }
}

impl From<&str> for InputLine {
    fn from(text: &str) -> Self {
        Self::from(text.to_owned())
    }
}

/// Anything the main loop can pull command lines from.
pub trait LineSource {
    /// Show `prompt` and read the next line.
    ///
    /// Returns `Ok(None)` once input is exhausted; the shell treats that as a
    /// request to terminate successfully.
    fn read_line(
        &mut self,
        prompt: &str,
        stdout: &mut dyn Write,
    ) -> Result<Option<InputLine>, ShellError>;
}

/// Reads lines from any byte stream, one byte at a time.
///
/// The line buffer starts at [`LINE_CHUNK`] bytes and grows by the same amount,
/// so there is no upper bound on line length.
pub struct StreamReader<R> {
    input: BufReader<R>,
}

impl<R: Read> StreamReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input: BufReader::new(input),
        }
    }

    /// Read up to the next newline. `Ok(None)` on end of input, even mid-line.
    pub fn next_line(&mut self) -> Result<Option<InputLine>, ShellError> {
        let mut buffer = ChunkedVec::with_increment(LINE_CHUNK)?;
        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(0) => {
                    log::debug!("end of input after {} buffered bytes", buffer.len());
                    return Ok(None);
                }
                Ok(_) if byte[0] == b'\n' => {
                    return Ok(Some(InputLine::from_bytes(buffer.into_vec())));
                }
                Ok(_) => buffer.push(byte[0])?,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::debug!("read error treated as end of input: {e}");
                    return Ok(None);
                }
            }
        }
    }
}

impl StreamReader<io::Stdin> {
    pub fn stdin() -> Self {
        Self::new(io::stdin())
    }
}

impl<R: Read> LineSource for StreamReader<R> {
    fn read_line(
        &mut self,
        prompt: &str,
        stdout: &mut dyn Write,
    ) -> Result<Option<InputLine>, ShellError> {
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;
        self.next_line()
    }
}

/// Interactive line editing with history, backed by `rustyline`.
pub struct EditorReader {
    editor: DefaultEditor,
}

impl EditorReader {
    pub fn new() -> Result<Self, ShellError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorReader {
    fn read_line(
        &mut self,
        prompt: &str,
        _stdout: &mut dyn Write,
    ) -> Result<Option<InputLine>, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(InputLine::from(line)))
            }
            // Ctrl-C abandons the current line only.
            Err(ReadlineError::Interrupted) => Ok(Some(InputLine::from(""))),
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
