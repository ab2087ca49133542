/// Source of random bytes, e.g. the kernel's `get_random_bytes`.
///
/// Implementations never fail and never block the caller. The bytes are not
/// required to be cryptographically strong.
pub trait EntropySource: Send + Sync {
    /// Fill all of `buf` with independently uniform bytes.
    fn fill_bytes(&self, buf: &mut [u8]);
}
