use core::fmt::{Debug, Formatter};

use config::MAX_MSG_LEN;

/// Longest decimal text of an `i32` (`-2147483648`).
pub const I32_DECIMAL_LEN: usize = 11;

const _: () = assert!(MAX_MSG_LEN >= I32_DECIMAL_LEN);

/// Decimal text of one generated value, held in a fixed `MAX_MSG_LEN` buffer.
#[derive(Clone)]
pub struct Message {
    bytes: [u8; MAX_MSG_LEN],
    len: usize,
}

impl Message {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII digits and '-' are ever stored.
        core::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Debug for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Message").field(&self.as_str()).finish()
    }
}

/// Format `value` in base 10: no padding, `-` for negatives, `"0"` for zero.
pub fn format(value: i32) -> Message {
    let mut digits = [0u8; I32_DECIMAL_LEN];
    let mut start = digits.len();
    let mut magnitude = value.unsigned_abs();
    loop {
        start -= 1;
        digits[start] = b'0' + (magnitude % 10) as u8;
        magnitude /= 10;
        if magnitude == 0 {
            break;
        }
    }
    if value < 0 {
        start -= 1;
        digits[start] = b'-';
    }

    let len = digits.len() - start;
    let mut message = Message {
        bytes: [0; MAX_MSG_LEN],
        len,
    };
    message.bytes[..len].copy_from_slice(&digits[start..]);
    message
}
