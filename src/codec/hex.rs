// Fri Oct 16 2026 - Alex

use crate::codec::{Codec, CodecError};
use crate::memory::Endianness;

#[derive(Debug, Default, Clone, Copy)]
pub struct RawHexCodec;

impl Codec for RawHexCodec {
    fn name(&self) -> &str {
        "raw hex"
    }

    fn display_width(&self, width: usize) -> usize {
        width * 2
    }

    fn chars_per_byte(&self) -> Option<usize> {
        Some(2)
    }

    fn format(&self, values: &[u8], _endianness: Endianness) -> String {
        values.iter().map(|b| format!("{:02X}", b)).collect()
    }

    fn to_bytes(&self, text: &str, width: usize, _endianness: Endianness) -> Result<Vec<u8>, CodecError> {
        if width == 0 {
            return Err(CodecError::zero_width());
        }
        let digits = text.trim();
        if digits.len() != width * 2 {
            return Err(CodecError::invalid(
                text,
                format!("expected {} hex digits, got {}", width * 2, digits.chars().count()),
            ));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CodecError::invalid(text, "not a hex number"));
        }
        (0..width)
            .map(|i| {
                u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
                    .map_err(|_| CodecError::invalid(text, "not a hex number"))
            })
            .collect()
    }
}
