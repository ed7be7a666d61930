// Fri Oct 16 2026 - Alex

use crate::codec::{Codec, CodecError};
use crate::memory::{Address, Endianness, MemoryWindow};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteChange {
    pub offset: usize,
    pub address: Address,
    pub old: Option<u8>,
    pub new: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRun {
    pub address: Address,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    address: Address,
    bytes: Vec<u8>,
    changes: Vec<ByteChange>,
}

impl EditOutcome {
    pub fn diff(previous: &MemoryWindow, offset: usize, bytes: Vec<u8>) -> Self {
        let before = previous.range(offset, bytes.len());
        let changes = before
            .iter()
            .zip(bytes.iter())
            .enumerate()
            .filter_map(|(i, (old, &new))| {
                let old_value = if old.is_valid() { Some(old.value()) } else { None };
                if old_value == Some(new) {
                    return None;
                }
                Some(ByteChange {
                    offset: i,
                    address: previous.address_at(offset + i),
                    old: old_value,
                    new,
                })
            })
            .collect();
        Self {
            address: previous.address_at(offset),
            bytes,
            changes,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn changes(&self) -> &[ByteChange] {
        &self.changes
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Changed bytes grouped into runs of adjacent addresses. Unchanged bytes
    /// are never part of a run.
    pub fn write_runs(&self) -> Vec<WriteRun> {
        let mut runs: Vec<(usize, Vec<u8>)> = Vec::new();
        for change in &self.changes {
            if let Some((start, bytes)) = runs.last_mut() {
                if *start + bytes.len() == change.offset {
                    bytes.push(change.new);
                    continue;
                }
            }
            runs.push((change.offset, vec![change.new]));
        }
        runs.into_iter()
            .map(|(start, bytes)| WriteRun {
                address: self.address.offset(start as u64),
                bytes,
            })
            .collect()
    }
}

pub fn encode_edit(
    codec: &dyn Codec,
    text: &str,
    previous: &MemoryWindow,
    offset: usize,
    width: usize,
    endianness: Endianness,
) -> Result<EditOutcome, CodecError> {
    let bytes = codec.to_bytes(text, width, endianness)?;
    Ok(EditOutcome::diff(previous, offset, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{RawHexCodec, SignedIntegerCodec, UnsignedIntegerCodec};
    use crate::memory::MemoryByte;

    #[test]
    fn test_only_changed_bytes_are_flagged() {
        let window = MemoryWindow::from_values(Address::from(0x100), &[0x00, 0x00, 0x01, 0x00]);
        let outcome = encode_edit(&UnsignedIntegerCodec, "65792", &window, 0, 4, Endianness::Big).unwrap();
        assert_eq!(outcome.bytes(), &[0x00, 0x01, 0x01, 0x00]);
        assert_eq!(outcome.changes().len(), 1);
        assert_eq!(outcome.changes()[0].address, Address::from(0x101));
        assert_eq!(outcome.changes()[0].old, Some(0x00));
        assert_eq!(outcome.changes()[0].new, 0x01);
    }

    #[test]
    fn test_same_value_has_no_changes() {
        let window = MemoryWindow::from_values(Address::from(0), &[0xFF, 0xFF]);
        let outcome = encode_edit(&SignedIntegerCodec, "-1", &window, 0, 2, Endianness::Little).unwrap();
        assert!(!outcome.has_changes());
        assert!(outcome.write_runs().is_empty());
    }

    #[test]
    fn test_unknown_previous_byte_counts_as_changed() {
        let window = MemoryWindow::new(Address::from(0), vec![MemoryByte::unknown(), MemoryByte::known(0xAB)]);
        let outcome = encode_edit(&RawHexCodec, "00AB", &window, 0, 2, Endianness::Big).unwrap();
        assert_eq!(outcome.changes().len(), 1);
        assert_eq!(outcome.changes()[0].old, None);
    }

    #[test]
    fn test_write_runs_skip_unchanged() {
        let window = MemoryWindow::from_values(Address::from(0x10), &[1, 2, 3, 4, 5]);
        let outcome = encode_edit(&RawHexCodec, "0902030807", &window, 0, 5, Endianness::Big).unwrap();
        let runs = outcome.write_runs();
        assert_eq!(
            runs,
            vec![
                WriteRun { address: Address::from(0x10), bytes: vec![9] },
                WriteRun { address: Address::from(0x13), bytes: vec![8, 7] },
            ]
        );
    }

    #[test]
    fn test_failed_parse_leaves_window() {
        let window = MemoryWindow::from_values(Address::from(0), &[1, 2]);
        let copy = window.clone();
        assert!(encode_edit(&SignedIntegerCodec, "40000", &window, 0, 2, Endianness::Big).is_err());
        assert_eq!(window, copy);
    }

    #[test]
    fn test_edit_at_offset() {
        let window = MemoryWindow::from_values(Address::from(0x200), &[0, 0, 0, 0]);
        let outcome = encode_edit(&RawHexCodec, "AA", &window, 3, 1, Endianness::Big).unwrap();
        assert_eq!(outcome.address(), &Address::from(0x203));
        assert_eq!(outcome.changes()[0].offset, 0);
    }
}
