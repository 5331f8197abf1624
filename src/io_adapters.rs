use std::cell::RefCell;
use std::io::{Result as IoResult, Write};
use std::rc::Rc;

/// Memory-backed writer for capturing what the shell prints.
///
/// The interpreter owns its output streams as boxed writers; keep the
/// [`CaptureHandle`] returned by [`CaptureWriter::with_handle`] to read the
/// bytes back afterwards.
#[derive(Default)]
pub struct CaptureWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

/// Read side of a [`CaptureWriter`].
#[derive(Clone)]
pub struct CaptureHandle {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl CaptureWriter {
    /// Create a writer together with a handle onto its buffer.
    pub fn with_handle() -> (Self, CaptureHandle) {
        let writer = CaptureWriter::default();
        let handle = CaptureHandle {
            buf: Rc::clone(&writer.buf),
        };
        (writer, handle)
    }
}

impl CaptureHandle {
    /// Everything written so far, decoded lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.buf.borrow()).into_owned()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.buf.borrow().clone()
    }
}

impl Write for CaptureWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_sees_writes() {
        let (mut w, handle) = CaptureWriter::with_handle();
        write!(w, "> ").unwrap();
        writeln!(w, "hi").unwrap();
        assert_eq!(handle.text(), "> hi\n");
        assert_eq!(handle.bytes(), b"> hi\n");
    }
}
