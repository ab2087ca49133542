use core::fmt::{Display, Formatter};

/// Major number shared by every instance of one driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Major(u32);

impl Major {
    pub const fn new(x: u32) -> Self {
        Major(x)
    }
    pub const fn data(&self) -> u32 {
        self.0
    }
}

/// Packed `(major, minor)` pair identifying one device instance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceNumber {
    data: u32,
}

pub const MINOR_BITS: u32 = 20;
pub const MINOR_MASK: u32 = (1 << MINOR_BITS) - 1;
/// Number of distinct minors below one major.
pub const MAX_MINORS: u32 = 1 << MINOR_BITS;

impl DeviceNumber {
    /// `minor` is truncated to [MINOR_BITS] bits.
    pub const fn new(major: Major, minor: u32) -> Self {
        Self {
            data: (major.data() << MINOR_BITS) | (minor & MINOR_MASK),
        }
    }

    pub const fn major(&self) -> Major {
        Major::new(self.data >> MINOR_BITS)
    }

    pub const fn minor(&self) -> u32 {
        self.data & MINOR_MASK
    }

    pub const fn data(&self) -> u32 {
        self.data
    }
}

impl From<u32> for DeviceNumber {
    fn from(x: u32) -> Self {
        Self { data: x }
    }
}

impl Display for DeviceNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}", self.major().data(), self.minor())
    }
}
