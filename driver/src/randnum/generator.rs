use alloc::sync::Arc;

use crate::{host::entropy::EntropySource, utils::num::power};

/// `BOUNDS[d] == 10^d`.
const BOUNDS: [i32; 10] = {
    let mut table = [0; 10];
    let mut digits = 0;
    while digits < table.len() {
        table[digits] = power(10, digits as u32);
        digits += 1;
    }
    table
};

/// Upper bound (exclusive) on the magnitude selected by `selector`.
///
/// A selector ending in 0 yields a bound of 1, which only admits 0.
pub const fn bound_for(selector: u8) -> i32 {
    BOUNDS[(selector % 10) as usize]
}

/// Reduce a raw draw into the bounded range. Keeps the sign of `value`.
pub const fn bounded(value: i32, selector: u8) -> i32 {
    value % bound_for(selector)
}

/// Produces integers whose magnitude is bounded by a random power of ten.
pub struct BoundedGenerator {
    entropy: Arc<dyn EntropySource>,
}

impl BoundedGenerator {
    pub fn new(entropy: Arc<dyn EntropySource>) -> Self {
        Self { entropy }
    }

    /// Draw a value, then a selector byte, and combine them with [bounded].
    pub fn generate(&self) -> i32 {
        let mut value = [0u8; 4];
        self.entropy.fill_bytes(&mut value);
        let mut selector = [0u8; 1];
        self.entropy.fill_bytes(&mut selector);
        bounded(i32::from_ne_bytes(value), selector[0])
    }
}
