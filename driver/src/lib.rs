//! chardev: a character device driver that streams random decimal numbers.
//!
//! The host loads the driver by calling [activate] with its registration,
//! entropy and parameters, and unloads it with [DriverState::deactivate].
//! Each open of `/dev/<name><i>` gets its own generated number, which
//! successive reads drain until they return 0.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
pub mod console;
pub mod dev;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod lifecycle;
pub mod logging;
pub mod params;
pub mod randnum;
pub mod utils;

pub use lifecycle::{DriverState, activate};
pub use params::DriverParams;

/// Static description of the module, as shown by the host's module listing.
#[derive(Debug, Clone, Copy)]
pub struct ModuleInfo {
    pub name: &'static str,
    pub license: &'static str,
    pub description: &'static str,
}

pub const MODULE_INFO: ModuleInfo = ModuleInfo {
    name: config::DEVICE_NAME,
    license: "GPL",
    description: "Character device streaming random decimal numbers",
};
