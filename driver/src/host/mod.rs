//! Capabilities the host kernel provides to the driver.
//!
//! None of these are implemented here: the loader hands in concrete
//! implementations at activation time.

pub mod entropy;
pub mod registration;
pub mod uaccess;
