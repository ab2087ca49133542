//! Numeric Utilities

/// Raise `num` to `times` by repeated multiplication.
///
/// `power(n, 0)` is 1. Overflow is the caller's problem; keep the result within `i32`.
pub const fn power(num: i32, times: u32) -> i32 {
    let mut res = 1;
    let mut i = 0;
    while i < times {
        res *= num;
        i += 1;
    }
    res
}
