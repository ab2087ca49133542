//! File-operation traits the host dispatches into.
//!
//! Notes:
//! - Implementers run on the caller's thread and must never block.
//! - [FileOperations] is registered once per device number; every successful
//!   [FileOperations::open] hands the host an independent [OpenFile] that it
//!   keeps until close.
use alloc::boxed::Box;
use core::fmt::{Display, Formatter};

use crate::{
    dev::DeviceNumber,
    error::{EFAULT, ENXIO, MessageError},
    host::uaccess::{Fault, UserSliceReader, UserSliceWriter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IOError {
    /// Copying to or from the caller's memory failed.
    Fault,
    /// No instance behind the opened device number.
    NoDevice,
}

impl From<Fault> for IOError {
    fn from(_: Fault) -> Self {
        IOError::Fault
    }
}

impl Display for IOError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            IOError::Fault => f.write_str("bad address"),
            IOError::NoDevice => f.write_str("no such device"),
        }
    }
}

impl MessageError for IOError {
    fn errno(&self) -> i32 {
        match self {
            IOError::Fault => -EFAULT,
            IOError::NoDevice => -ENXIO,
        }
    }
}

/// Operation table bound to a device number.
pub trait FileOperations: Send + Sync {
    /// Start a session on `number`.
    fn open(&self, number: DeviceNumber) -> Result<Box<dyn OpenFile>, IOError>;
}

/// State of one open-to-close interval.
///
/// The host owns the box between `open` and close and never shares it between
/// two file descriptions.
pub trait OpenFile: Send {
    /// Copy up to `buf.len()` bytes out. `Ok(0)` means end of data.
    ///
    /// `offset` is the host's file position; it is updated on success.
    fn read(&mut self, buf: &mut dyn UserSliceWriter, offset: &mut u64) -> Result<usize, IOError>;

    /// Accept up to `buf.len()` bytes; return how many were consumed.
    fn write(
        &mut self,
        buf: &mut dyn UserSliceReader,
        offset: &mut u64,
    ) -> Result<usize, IOError>;

    fn ioctl(&mut self, cmd: u32, arg: usize) -> Result<isize, IOError>;

    /// Called once on the last close.
    fn release(self: Box<Self>);
}
