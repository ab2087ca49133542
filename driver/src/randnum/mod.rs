//! Random decimal messages: generation, formatting and per-session delivery.

mod format;
pub use format::*;
pub mod generator;
pub use generator::BoundedGenerator;
mod session;
pub use session::*;
