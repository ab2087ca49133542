//! Configurations for the chardev driver.
//! The module is divided as a library so the build-time flags stay independent
//! from the driver code that consumes them.

#![no_std]
#![deny(missing_docs)]

/// Constants generated from `flags.json` at the workspace root.
pub mod build_flags {
    include!(concat!(env!("OUT_DIR"), "/build_flags.rs"));
}

pub use build_flags::*;
