// Fri Oct 16 2026 - Alex

use bitflags::bitflags;
use std::fmt;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ByteFlags: u8 {
        /// Value was read from the target. A byte without it is unknown.
        const VALID = 0b0000_0001;
        const READ_ONLY = 0b0000_0010;
        /// Value differs from the previous snapshot of the same address.
        const CHANGED = 0b0000_0100;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ByteState {
    Normal,
    Changed,
    Unknown,
}

impl ByteState {
    pub fn combine<'a, I>(bytes: I) -> Self
    where
        I: IntoIterator<Item = &'a MemoryByte>,
    {
        bytes
            .into_iter()
            .map(MemoryByte::state)
            .max()
            .unwrap_or(ByteState::Normal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryByte {
    value: u8,
    flags: ByteFlags,
}

impl MemoryByte {
    pub fn new(value: u8, flags: ByteFlags) -> Self {
        Self { value, flags }
    }

    pub fn known(value: u8) -> Self {
        Self::new(value, ByteFlags::VALID)
    }

    pub fn unknown() -> Self {
        Self::new(0, ByteFlags::empty())
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn flags(&self) -> ByteFlags {
        self.flags
    }

    pub fn is_valid(&self) -> bool {
        self.flags.contains(ByteFlags::VALID)
    }

    pub fn is_unknown(&self) -> bool {
        !self.is_valid()
    }

    pub fn is_read_only(&self) -> bool {
        self.flags.contains(ByteFlags::READ_ONLY)
    }

    pub fn is_changed(&self) -> bool {
        self.flags.contains(ByteFlags::CHANGED)
    }

    pub fn with_flag(mut self, flag: ByteFlags, on: bool) -> Self {
        self.flags.set(flag, on);
        self
    }

    /// Unknown outranks changed: an edited byte that can no longer be read
    /// is shown as unreadable.
    pub fn state(&self) -> ByteState {
        if self.is_unknown() {
            ByteState::Unknown
        } else if self.is_changed() {
            ByteState::Changed
        } else {
            ByteState::Normal
        }
    }
}

impl fmt::Display for MemoryByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            write!(f, "??")
        } else {
            write!(f, "{:02X}", self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_is_not_valid() {
        let byte = MemoryByte::unknown();
        assert!(byte.is_unknown());
        assert!(!byte.is_valid());
        assert!(MemoryByte::known(0).is_valid());
    }

    #[test]
    fn test_unknown_outranks_changed() {
        let changed_unreadable = MemoryByte::unknown().with_flag(ByteFlags::CHANGED, true);
        assert_eq!(changed_unreadable.state(), ByteState::Unknown);

        let changed = MemoryByte::known(1).with_flag(ByteFlags::CHANGED, true);
        assert_eq!(changed.state(), ByteState::Changed);
    }

    #[test]
    fn test_combine_states() {
        let bytes = [
            MemoryByte::known(1),
            MemoryByte::known(2).with_flag(ByteFlags::CHANGED, true),
        ];
        assert_eq!(ByteState::combine(&bytes), ByteState::Changed);
        assert_eq!(ByteState::combine(&bytes[..1]), ByteState::Normal);

        let with_unknown = [bytes[1], MemoryByte::unknown()];
        assert_eq!(ByteState::combine(&with_unknown), ByteState::Unknown);
    }

    #[test]
    fn test_flags_are_independent() {
        let byte = MemoryByte::known(0x41)
            .with_flag(ByteFlags::READ_ONLY, true)
            .with_flag(ByteFlags::CHANGED, true);
        assert!(byte.is_read_only());
        assert!(byte.is_changed());
        assert_eq!(byte.value(), 0x41);
        assert_eq!(byte.to_string(), "41");
    }
}
