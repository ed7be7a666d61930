// Fri Oct 16 2026 - Alex

use crate::codec::{Codec, CodecError};
use crate::memory::Endianness;

pub const PLACEHOLDER: char = '.';

fn is_printable(byte: u8) -> bool {
    (0x20..=0x7E).contains(&byte)
}

/// One character per byte. Several byte values share the placeholder, so
/// text does not always round-trip.
#[derive(Debug, Default, Clone, Copy)]
pub struct AsciiCodec;

impl Codec for AsciiCodec {
    fn name(&self) -> &str {
        "ascii"
    }

    fn display_width(&self, width: usize) -> usize {
        width
    }

    fn chars_per_byte(&self) -> Option<usize> {
        Some(1)
    }

    fn format(&self, values: &[u8], _endianness: Endianness) -> String {
        values
            .iter()
            .map(|&b| if is_printable(b) { b as char } else { PLACEHOLDER })
            .collect()
    }

    fn to_bytes(&self, text: &str, width: usize, _endianness: Endianness) -> Result<Vec<u8>, CodecError> {
        if width == 0 {
            return Err(CodecError::zero_width());
        }
        let count = text.chars().count();
        if count != width {
            return Err(CodecError::invalid(
                text,
                format!("expected {} character(s), got {}", width, count),
            ));
        }
        text.chars()
            .map(|c| match u8::try_from(c) {
                Ok(b) if is_printable(b) => Ok(b),
                _ => Err(CodecError::invalid(text, format!("'{}' is not printable ASCII", c))),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Address, MemoryByte, MemoryWindow};

    #[test]
    fn test_printable_and_placeholder() {
        let w = MemoryWindow::from_values(Address::from(0), &[b'H', b'i', 0x00, 0x7F, b' ']);
        assert_eq!(AsciiCodec.to_text(&w, 0, 5, Endianness::Big, "?").unwrap(), "Hi.. ");
        assert_eq!(AsciiCodec.to_text(&w, 0, 2, Endianness::Little, "?").unwrap(), "Hi");
    }

    #[test]
    fn test_encode() {
        assert_eq!(AsciiCodec.to_bytes("AB", 2, Endianness::Little).unwrap(), b"AB".to_vec());
        assert_eq!(AsciiCodec.to_bytes("  ", 2, Endianness::Big).unwrap(), b"  ".to_vec());
        assert!(AsciiCodec.to_bytes("ABC", 2, Endianness::Big).is_err());
        assert!(AsciiCodec.to_bytes("A", 2, Endianness::Big).is_err());
        assert!(AsciiCodec.to_bytes("é", 1, Endianness::Big).is_err());
        assert!(AsciiCodec.to_bytes("\t", 1, Endianness::Big).is_err());
    }

    #[test]
    fn test_round_trip_is_one_directional() {
        let w = MemoryWindow::from_values(Address::from(0), &[0x01, b'z']);
        let text = AsciiCodec.to_text(&w, 0, 2, Endianness::Big, "?").unwrap();
        assert_eq!(text, ".z");
        assert_eq!(AsciiCodec.to_bytes(&text, 2, Endianness::Big).unwrap(), vec![b'.', b'z']);
    }

    #[test]
    fn test_unknown_pads() {
        let w = MemoryWindow::new(Address::from(0), vec![MemoryByte::known(b'a'), MemoryByte::unknown()]);
        assert_eq!(AsciiCodec.to_text(&w, 0, 2, Endianness::Big, "??").unwrap(), "??");
        assert_eq!(AsciiCodec.to_text(&w, 0, 1, Endianness::Big, "??").unwrap(), "a");
    }
}
