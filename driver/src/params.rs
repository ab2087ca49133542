//! Load-time parameters of the driver.
use alloc::boxed::Box;

use crate::{dev::MAX_MINORS, error::ParamError};

/// Device name prefix and number of instances to register.
///
/// Defaults come from the `DEVICE_NAME`/`DEVICE_COUNT` build flags; a loader
/// may override them the way module parameters would.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverParams {
    name: Box<str>,
    count: u32,
}

impl DriverParams {
    pub fn new(name: &str, count: u32) -> Self {
        Self {
            name: Box::from(name),
            count,
        }
    }

    pub fn from_build_flags() -> Self {
        Self::new(config::DEVICE_NAME, config::DEVICE_COUNT)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        if self.name.is_empty() {
            return Err(ParamError::EmptyName);
        }
        if self.count == 0 {
            return Err(ParamError::NoInstances);
        }
        if self.count > MAX_MINORS {
            return Err(ParamError::TooManyInstances { count: self.count });
        }
        Ok(())
    }
}

impl Default for DriverParams {
    fn default() -> Self {
        Self::from_build_flags()
    }
}
