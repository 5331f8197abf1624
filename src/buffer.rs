use crate::error::ShellError;

/// Growth step of the line buffer, in bytes.
pub const LINE_CHUNK: usize = 1024;

/// Growth step of the argument slot array, in slots.
pub const ARG_CHUNK: usize = 64;

/// A vector that grows by a fixed increment instead of doubling.
///
/// The logical capacity always is a multiple of `increment`. Allocation is
/// fallible: running out of memory surfaces as [`ShellError::Allocation`]
/// rather than an abort, and the items stored so far are kept intact.
#[derive(Debug)]
pub(crate) struct ChunkedVec<T> {
    items: Vec<T>,
    capacity: usize,
    increment: usize,
}

impl<T> ChunkedVec<T> {
    /// Allocate the first chunk.
    pub fn with_increment(increment: usize) -> Result<Self, ShellError> {
        assert!(increment > 0, "growth increment must be positive");
        let mut items = Vec::new();
        items.try_reserve_exact(increment)?;
        Ok(Self {
            items,
            capacity: increment,
            increment,
        })
    }

    /// Append one item, growing by one chunk if the current one is full.
    pub fn push(&mut self, item: T) -> Result<(), ShellError> {
        if self.items.len() == self.capacity {
            self.grow()?;
        }
        self.items.push(item);
        Ok(())
    }

    fn grow(&mut self) -> Result<(), ShellError> {
        let target = self.capacity + self.increment;
        self.items.try_reserve_exact(target - self.items.len())?;
        self.capacity = target;
        log::trace!("chunked buffer grown to {} slots", self.capacity);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Logical capacity: initial chunk plus every increment added since.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}
