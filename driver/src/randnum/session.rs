use super::{BoundedGenerator, Message, format};
use crate::host::uaccess::{Fault, UserSliceWriter};

/// Delivery state of one open-to-close interval.
///
/// Holds a single generated message and a cursor into it. Reads drain the
/// message front to back; once the cursor reaches the end every read returns 0.
#[derive(Debug, Clone)]
pub struct ReadSession {
    value: i32,
    message: Message,
    cursor: usize,
}

impl ReadSession {
    /// Generate the session's value. Entropy is consumed here and nowhere else.
    pub fn begin(generator: &BoundedGenerator) -> Self {
        Self::with_value(generator.generate())
    }

    pub fn with_value(value: i32) -> Self {
        Self {
            value,
            message: format(value),
            cursor: 0,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.message.len() - self.cursor
    }

    /// Copy the next `min(out.len(), remaining)` bytes into `out`.
    ///
    /// The cursor only moves after the copy succeeded.
    pub fn read(&mut self, out: &mut dyn UserSliceWriter) -> Result<usize, Fault> {
        let remaining = self.remaining();
        if remaining == 0 {
            return Ok(0);
        }
        let count = out.len().min(remaining);
        let chunk = &self.message.as_bytes()[self.cursor..self.cursor + count];
        out.write_slice(chunk)?;
        self.cursor += count;
        Ok(count)
    }
}
