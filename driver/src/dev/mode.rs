use bitflags::bitflags;

bitflags! {
    /// Permission bits of a device node, as in `st_mode & 0o777`.
    pub struct NodeMode: u16 {
        const OWNER_READ    = 0o400;
        const OWNER_WRITE   = 0o200;
        const OWNER_EXEC    = 0o100;
        const GROUP_READ    = 0o040;
        const GROUP_WRITE   = 0o020;
        const GROUP_EXEC    = 0o010;
        const OTHER_READ    = 0o004;
        const OTHER_WRITE   = 0o002;
        const OTHER_EXEC    = 0o001;
        /// `0666`: read and write for everyone.
        const WORLD_RW      = Self::OWNER_READ.bits | Self::OWNER_WRITE.bits
                            | Self::GROUP_READ.bits | Self::GROUP_WRITE.bits
                            | Self::OTHER_READ.bits | Self::OTHER_WRITE.bits;
    }
}
