//! Error types reported by the driver to its host.

use core::fmt::{Debug, Display, Formatter, Write};

use crate::dev::MAX_MINORS;

/// An error that can be printed to a string device and reported as an errno.
pub trait MessageError: Debug + Display {
    /// Negative errno handed back to the host.
    fn errno(&self) -> i32;

    /// Print the error message to a writer
    fn print_to_writer(&self, f: &mut dyn Write) -> core::fmt::Result {
        f.write_fmt(format_args!("{} (errno {})", self, self.errno()))
    }
}

pub const EFAULT: i32 = 14;
pub const ENXIO: i32 = 6;
pub const ENOMEM: i32 = 12;
pub const EBUSY: i32 = 16;
pub const EINVAL: i32 = 22;

/// Failures reported by the host's device registration interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationError {
    /// The requested number range, class or node name is taken.
    Busy,
    NoMemory,
    /// The host rejected the arguments.
    Invalid,
    /// Any other host error, as a negative errno.
    Host(i32),
}

impl Display for RegistrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            RegistrationError::Busy => f.write_str("resource busy"),
            RegistrationError::NoMemory => f.write_str("out of memory"),
            RegistrationError::Invalid => f.write_str("invalid argument"),
            RegistrationError::Host(errno) => write!(f, "host error {}", errno),
        }
    }
}

impl MessageError for RegistrationError {
    fn errno(&self) -> i32 {
        match self {
            RegistrationError::Busy => -EBUSY,
            RegistrationError::NoMemory => -ENOMEM,
            RegistrationError::Invalid => -EINVAL,
            RegistrationError::Host(errno) => *errno,
        }
    }
}

/// Rejected driver parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamError {
    EmptyName,
    NoInstances,
    TooManyInstances { count: u32 },
}

impl Display for ParamError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ParamError::EmptyName => f.write_str("device name is empty"),
            ParamError::NoInstances => f.write_str("instance count is zero"),
            ParamError::TooManyInstances { count } => write!(
                f,
                "{} instances requested, at most {} minors exist",
                count, MAX_MINORS
            ),
        }
    }
}

impl MessageError for ParamError {
    fn errno(&self) -> i32 {
        -EINVAL
    }
}

/// The activation step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationStage {
    NumberRange,
    Class,
    /// Binding the operation table of the instance with this index.
    ControlStructure(u32),
    /// Creating the filesystem node of the instance with this index.
    Node(u32),
}

impl Display for ActivationStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ActivationStage::NumberRange => f.write_str("device number range"),
            ActivationStage::Class => f.write_str("device class"),
            ActivationStage::ControlStructure(index) => write!(f, "control structure #{}", index),
            ActivationStage::Node(index) => write!(f, "device node #{}", index),
        }
    }
}

/// Activation failed; everything acquired before the failing step has been released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationError {
    Params(ParamError),
    Resource {
        stage: ActivationStage,
        cause: RegistrationError,
    },
}

impl From<ParamError> for ActivationError {
    fn from(value: ParamError) -> Self {
        ActivationError::Params(value)
    }
}

impl Display for ActivationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ActivationError::Params(err) => write!(f, "bad parameters: {}", err),
            ActivationError::Resource { stage, cause } => {
                write!(f, "acquiring {} failed: {}", stage, cause)
            }
        }
    }
}

impl MessageError for ActivationError {
    fn errno(&self) -> i32 {
        match self {
            ActivationError::Params(err) => err.errno(),
            ActivationError::Resource { cause, .. } => cause.errno(),
        }
    }
}
