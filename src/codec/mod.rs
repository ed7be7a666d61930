// Fri Oct 16 2026 - Alex

pub mod ascii;
pub mod edit;
pub mod error;
pub mod hex;
pub mod integer;

pub use ascii::AsciiCodec;
pub use edit::{encode_edit, ByteChange, EditOutcome, WriteRun};
pub use error::CodecError;
pub use hex::RawHexCodec;
pub use integer::{SignedIntegerCodec, UnsignedIntegerCodec};

use crate::memory::{Endianness, MemoryWindow};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Byte/text conversion for one data type.
pub trait Codec: Send + Sync {
    fn name(&self) -> &str;

    fn display_width(&self, width: usize) -> usize;

    fn chars_per_byte(&self) -> Option<usize> {
        None
    }

    fn is_endian_sensitive(&self) -> bool {
        false
    }

    fn format(&self, values: &[u8], endianness: Endianness) -> String;

    fn to_bytes(&self, text: &str, width: usize, endianness: Endianness) -> Result<Vec<u8>, CodecError>;

    fn to_text(
        &self,
        window: &MemoryWindow,
        offset: usize,
        width: usize,
        endianness: Endianness,
        padding: &str,
    ) -> Result<String, CodecError> {
        if width == 0 {
            return Err(CodecError::zero_width());
        }
        match window.values(offset, width) {
            Some(values) => Ok(self.format(&values, endianness)),
            None => Ok(pad(padding, self.display_width(width))),
        }
    }
}

pub fn pad(token: &str, width: usize) -> String {
    if token.is_empty() {
        return " ".repeat(width);
    }
    token.chars().cycle().take(width).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataType {
    SignedInteger,
    UnsignedInteger,
    Ascii,
    RawHex,
}

impl DataType {
    pub const ALL: [DataType; 4] = [
        DataType::SignedInteger,
        DataType::UnsignedInteger,
        DataType::Ascii,
        DataType::RawHex,
    ];

    pub fn rendering_id(self) -> &'static str {
        match self {
            Self::SignedInteger => "signed-integer",
            Self::UnsignedInteger => "unsigned-integer",
            Self::Ascii => "ascii",
            Self::RawHex => "raw-hex",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::SignedInteger => "Signed Integer",
            Self::UnsignedInteger => "Unsigned Integer",
            Self::Ascii => "ASCII",
            Self::RawHex => "Hex",
        }
    }

    pub fn from_rendering_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.rendering_id() == id)
    }

    pub fn codec(self) -> Arc<dyn Codec> {
        match self {
            Self::SignedInteger => Arc::new(SignedIntegerCodec),
            Self::UnsignedInteger => Arc::new(UnsignedIntegerCodec),
            Self::Ascii => Arc::new(AsciiCodec),
            Self::RawHex => Arc::new(RawHexCodec),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Address, MemoryByte};

    #[test]
    fn test_pad() {
        assert_eq!(pad("??", 5), "?????");
        assert_eq!(pad("xyz", 2), "xy");
        assert_eq!(pad("", 3), "   ");
        assert_eq!(pad("ab", 0), "");
    }

    #[test]
    fn test_unknown_never_renders_a_number() {
        let window = MemoryWindow::new(
            Address::from(0),
            vec![MemoryByte::known(0x12), MemoryByte::known(0x34), MemoryByte::unknown(), MemoryByte::known(0x56)],
        );
        for data_type in DataType::ALL {
            let codec = data_type.codec();
            let text = codec.to_text(&window, 0, 4, Endianness::Big, "*").unwrap();
            assert_eq!(text, "*".repeat(codec.display_width(4)), "{}", codec.name());
        }
    }

    #[test]
    fn test_endian_sensitivity() {
        assert!(DataType::SignedInteger.codec().is_endian_sensitive());
        assert!(DataType::UnsignedInteger.codec().is_endian_sensitive());
        assert!(!DataType::Ascii.codec().is_endian_sensitive());
        assert!(!DataType::RawHex.codec().is_endian_sensitive());
    }

    #[test]
    fn test_rendering_ids() {
        for data_type in DataType::ALL {
            assert_eq!(DataType::from_rendering_id(data_type.rendering_id()), Some(data_type));
        }
        assert_eq!(DataType::from_rendering_id("integer-8"), None);
    }
}
