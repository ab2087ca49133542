//! Entry points the host calls for the random-number nodes.
use alloc::{boxed::Box, sync::Arc};

use crate::{
    debug_ex,
    dev::{
        DeviceNumber,
        io::{FileOperations, IOError, OpenFile},
    },
    host::{
        entropy::EntropySource,
        uaccess::{UserSliceReader, UserSliceWriter},
    },
    randnum::{BoundedGenerator, ReadSession},
};

/// Operation table shared by every instance of the driver.
pub struct RandNumOps {
    generator: BoundedGenerator,
    instances: u32,
}

impl RandNumOps {
    pub fn new(entropy: Arc<dyn EntropySource>, instances: u32) -> Self {
        Self {
            generator: BoundedGenerator::new(entropy),
            instances,
        }
    }
}

impl FileOperations for RandNumOps {
    fn open(&self, number: DeviceNumber) -> Result<Box<dyn OpenFile>, IOError> {
        if number.minor() >= self.instances {
            return Err(IOError::NoDevice);
        }
        debug_ex!("chardev: device open {}", number);
        Ok(Box::new(RandNumFile {
            number,
            session: ReadSession::begin(&self.generator),
        }))
    }
}

/// One open file: owns its own session, never shared with other opens.
pub struct RandNumFile {
    number: DeviceNumber,
    session: ReadSession,
}

impl RandNumFile {
    pub fn number(&self) -> DeviceNumber {
        self.number
    }

    pub fn session(&self) -> &ReadSession {
        &self.session
    }
}

impl OpenFile for RandNumFile {
    fn read(&mut self, buf: &mut dyn UserSliceWriter, offset: &mut u64) -> Result<usize, IOError> {
        let count = self.session.read(buf)?;
        *offset = self.session.cursor() as u64;
        debug_ex!("chardev: read {} bytes from {}", count, self.number);
        Ok(count)
    }

    fn write(
        &mut self,
        _buf: &mut dyn UserSliceReader,
        _offset: &mut u64,
    ) -> Result<usize, IOError> {
        debug_ex!("chardev: device write {} ignored", self.number);
        Ok(0)
    }

    fn ioctl(&mut self, cmd: u32, _arg: usize) -> Result<isize, IOError> {
        debug_ex!("chardev: device ioctl {} cmd {:#x}", self.number, cmd);
        Ok(0)
    }

    fn release(self: Box<Self>) {
        debug_ex!("chardev: device close {}", self.number);
    }
}
