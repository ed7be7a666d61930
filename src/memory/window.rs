// Fri Oct 16 2026 - Alex

use crate::memory::{Address, ByteFlags, Endianness, MemoryByte};
use num_traits::ToPrimitive;
use std::sync::Arc;

/// Immutable snapshot of a contiguous address range.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryWindow {
    base: Address,
    bytes: Arc<[MemoryByte]>,
    preferred_endianness: Option<Endianness>,
}

impl MemoryWindow {
    pub fn new(base: Address, bytes: Vec<MemoryByte>) -> Self {
        Self {
            base,
            bytes: bytes.into(),
            preferred_endianness: None,
        }
    }

    pub fn from_values(base: Address, values: &[u8]) -> Self {
        Self::new(base, values.iter().copied().map(MemoryByte::known).collect())
    }

    pub fn with_preferred_endianness(mut self, endianness: Option<Endianness>) -> Self {
        self.preferred_endianness = endianness;
        self
    }

    pub fn base(&self) -> &Address {
        &self.base
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bytes(&self) -> &[MemoryByte] {
        &self.bytes
    }

    pub fn get(&self, index: usize) -> Option<&MemoryByte> {
        self.bytes.get(index)
    }

    pub fn preferred_endianness(&self) -> Option<Endianness> {
        self.preferred_endianness
    }

    pub fn address_at(&self, index: usize) -> Address {
        self.base.offset(index as u64)
    }

    pub fn end_address(&self) -> Address {
        self.base.offset(self.bytes.len() as u64)
    }

    pub fn contains(&self, address: &Address) -> bool {
        address.is_within_range(&self.base, &self.end_address())
    }

    pub fn index_of(&self, address: &Address) -> Option<usize> {
        let distance = address.distance_from(&self.base)?.to_usize()?;
        if distance < self.bytes.len() {
            Some(distance)
        } else {
            None
        }
    }

    /// # Panics
    ///
    /// Panics when the range is not covered by the window. Callers must fetch
    /// at least as much memory as they render.
    pub fn range(&self, offset: usize, width: usize) -> &[MemoryByte] {
        let end = offset.checked_add(width);
        assert!(
            matches!(end, Some(end) if end <= self.bytes.len()),
            "caller contract violation: range {}+{} exceeds window of {} bytes at {}",
            offset,
            width,
            self.bytes.len(),
            self.base
        );
        &self.bytes[offset..offset + width]
    }

    pub fn values(&self, offset: usize, width: usize) -> Option<Vec<u8>> {
        let range = self.range(offset, width);
        if range.iter().any(MemoryByte::is_unknown) {
            return None;
        }
        Some(range.iter().map(MemoryByte::value).collect())
    }

    pub fn unknown_count(&self) -> usize {
        self.bytes.iter().filter(|b| b.is_unknown()).count()
    }

    pub fn padded_to(&self, len: usize) -> MemoryWindow {
        if self.bytes.len() >= len {
            return self.clone();
        }
        let mut bytes = self.bytes.to_vec();
        bytes.resize(len, MemoryByte::unknown());
        Self {
            base: self.base.clone(),
            bytes: bytes.into(),
            preferred_endianness: self.preferred_endianness,
        }
    }

    /// New window whose bytes carry `CHANGED` where the value differs from
    /// `previous` at the same address. Bytes unknown in either snapshot, or
    /// not covered by `previous`, are never marked.
    pub fn with_changes_from(&self, previous: &MemoryWindow) -> MemoryWindow {
        let bytes: Vec<MemoryByte> = self
            .bytes
            .iter()
            .enumerate()
            .map(|(index, byte)| {
                let before = previous.index_of(&self.address_at(index)).and_then(|i| previous.get(i));
                let changed = match before {
                    Some(old) => old.is_valid() && byte.is_valid() && old.value() != byte.value(),
                    None => false,
                };
                byte.with_flag(ByteFlags::CHANGED, changed)
            })
            .collect();
        Self {
            base: self.base.clone(),
            bytes: bytes.into(),
            preferred_endianness: self.preferred_endianness,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(values: &[u8]) -> MemoryWindow {
        MemoryWindow::from_values(Address::from(0x1000), values)
    }

    #[test]
    fn test_values_and_unknown() {
        let w = MemoryWindow::new(
            Address::from(0x1000),
            vec![MemoryByte::known(1), MemoryByte::unknown(), MemoryByte::known(3)],
        );
        assert_eq!(w.values(0, 1), Some(vec![1]));
        assert_eq!(w.values(0, 2), None);
        assert_eq!(w.unknown_count(), 1);
    }

    #[test]
    #[should_panic(expected = "caller contract violation")]
    fn test_range_past_end_panics() {
        let w = window(&[1, 2, 3, 4]);
        let _ = w.range(2, 4);
    }

    #[test]
    fn test_index_of() {
        let w = window(&[0; 16]);
        assert_eq!(w.index_of(&Address::from(0x1004)), Some(4));
        assert_eq!(w.index_of(&Address::from(0x1010)), None);
        assert_eq!(w.index_of(&Address::from(0x0fff)), None);
        assert!(w.contains(&Address::from(0x100f)));
    }

    #[test]
    fn test_padded_to() {
        let w = window(&[0xAA, 0xBB]);
        let padded = w.padded_to(4);
        assert_eq!(padded.len(), 4);
        assert!(padded.get(3).unwrap().is_unknown());
        assert_eq!(w.len(), 2);
        assert_eq!(w.padded_to(1).len(), 2);
    }

    #[test]
    fn test_changes_between_snapshots() {
        let before = MemoryWindow::from_values(Address::from(0x0FFE), &[9, 9, 1, 2]);
        let after = MemoryWindow::new(
            Address::from(0x1000),
            vec![
                MemoryByte::known(1),
                MemoryByte::known(7),
                MemoryByte::unknown(),
            ],
        );
        let marked = after.with_changes_from(&before);
        assert!(!marked.get(0).unwrap().is_changed());
        assert!(marked.get(1).unwrap().is_changed());
        assert!(!marked.get(2).unwrap().is_changed());
        assert!(!after.get(1).unwrap().is_changed());
    }
}
