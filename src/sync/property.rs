// Sat Oct 17 2026 - Alex

use crate::memory::{Address, BlockId};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyId {
    SelectedAddress,
    ColumnSize,
    TopVisibleAddress,
}

impl PropertyId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelectedAddress => "selectedAddress",
            Self::ColumnSize => "columnSize",
            Self::TopVisibleAddress => "topAddress",
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncProperty {
    SelectedAddress(Address),
    /// Addressable units per column.
    ColumnSize(usize),
    TopVisibleAddress(Address),
}

impl SyncProperty {
    pub fn id(&self) -> PropertyId {
        match self {
            Self::SelectedAddress(_) => PropertyId::SelectedAddress,
            Self::ColumnSize(_) => PropertyId::ColumnSize,
            Self::TopVisibleAddress(_) => PropertyId::TopVisibleAddress,
        }
    }
}

impl fmt::Display for SyncProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectedAddress(addr) | Self::TopVisibleAddress(addr) => write!(f, "{}={}", self.id(), addr),
            Self::ColumnSize(size) => write!(f, "{}={}", self.id(), size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEvent {
    pub block: BlockId,
    pub property: SyncProperty,
}
