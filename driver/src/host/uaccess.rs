//! Copies across the user/kernel boundary.

/// The caller's memory could not be accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault;

/// Destination buffer in the calling process.
pub trait UserSliceWriter {
    /// Bytes the caller can still accept.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy all of `data` out, or nothing on failure.
    fn write_slice(&mut self, data: &[u8]) -> Result<(), Fault>;
}

/// Source buffer in the calling process.
pub trait UserSliceReader {
    /// Bytes still available to read.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fill all of `data` from the caller, or nothing on failure.
    fn read_slice(&mut self, data: &mut [u8]) -> Result<(), Fault>;
}
