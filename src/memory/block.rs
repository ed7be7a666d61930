// Fri Oct 16 2026 - Alex

use crate::memory::{Address, Endianness};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_BLOCK_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u64);

impl BlockId {
    pub fn next() -> Self {
        Self(NEXT_BLOCK_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBlock {
    id: BlockId,
    name: String,
    base: Address,
    length: Option<u64>,
    addressable_size: usize,
    address_size: usize,
    endianness: Option<Endianness>,
}

impl MemoryBlock {
    pub fn new(name: impl Into<String>, base: Address) -> Self {
        Self {
            id: BlockId::next(),
            name: name.into(),
            base,
            length: None,
            addressable_size: 1,
            address_size: 4,
            endianness: None,
        }
    }

    pub fn with_length(mut self, length: u64) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_addressable_size(mut self, size: usize) -> Self {
        self.addressable_size = size.max(1);
        self
    }

    pub fn with_address_size(mut self, size: usize) -> Self {
        self.address_size = size.max(1);
        self
    }

    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = Some(endianness);
        self
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> &Address {
        &self.base
    }

    pub fn length(&self) -> Option<u64> {
        self.length
    }

    pub fn addressable_size(&self) -> usize {
        self.addressable_size
    }

    pub fn address_size(&self) -> usize {
        self.address_size
    }

    pub fn label_digits(&self) -> usize {
        self.address_size * 2
    }

    pub fn preferred_endianness(&self) -> Option<Endianness> {
        self.endianness
    }
}

impl fmt::Display for MemoryBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) @ {}", self.name, self.id, self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = MemoryBlock::new("a", Address::zero());
        let b = MemoryBlock::new("a", Address::zero());
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn test_builder() {
        let block = MemoryBlock::new("stack", Address::from(0x7fff0000))
            .with_length(256)
            .with_addressable_size(0)
            .with_address_size(8)
            .with_endianness(Endianness::Little);
        assert_eq!(block.addressable_size(), 1);
        assert_eq!(block.label_digits(), 16);
        assert_eq!(block.length(), Some(256));
        assert_eq!(block.preferred_endianness(), Some(Endianness::Little));
    }
}
