//! Device identities, node permissions and the file-operation interface
//! the host calls into.

pub mod io;

mod mode;
pub use mode::*;
mod number;
pub use number::*;
