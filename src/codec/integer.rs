// Fri Oct 16 2026 - Alex

use crate::codec::{Codec, CodecError};
use crate::memory::Endianness;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::One;

fn assemble(values: &[u8], endianness: Endianness) -> BigUint {
    match endianness {
        Endianness::Big => BigUint::from_bytes_be(values),
        Endianness::Little => BigUint::from_bytes_le(values),
    }
}

fn split(value: &BigUint, width: usize, endianness: Endianness) -> Vec<u8> {
    let mut bytes = value.to_bytes_le();
    bytes.resize(width, 0);
    if endianness == Endianness::Big {
        bytes.reverse();
    }
    bytes
}

fn parse_decimal(text: &str) -> Result<BigInt, CodecError> {
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::invalid(text, "not a decimal integer"));
    }
    let magnitude = BigUint::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| CodecError::invalid(text, "not a decimal integer"))?;
    let sign = if negative { Sign::Minus } else { Sign::Plus };
    Ok(BigInt::from_biguint(sign, magnitude))
}

fn modulus(width: usize) -> BigUint {
    BigUint::one() << (8 * width)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SignedIntegerCodec;

impl SignedIntegerCodec {
    fn bounds(width: usize) -> (BigInt, BigInt) {
        let half = BigInt::from(BigUint::one() << (8 * width - 1));
        let min = -half.clone();
        let max = half - 1u32;
        (min, max)
    }
}

impl Codec for SignedIntegerCodec {
    fn name(&self) -> &str {
        "signed integer"
    }

    fn display_width(&self, width: usize) -> usize {
        if width == 0 {
            return 0;
        }
        Self::bounds(width).0.to_string().len()
    }

    fn is_endian_sensitive(&self) -> bool {
        true
    }

    fn format(&self, values: &[u8], endianness: Endianness) -> String {
        let raw = assemble(values, endianness);
        let width = values.len();
        if width > 0 && raw.bit(8 * width as u64 - 1) {
            (BigInt::from(raw) - BigInt::from(modulus(width))).to_string()
        } else {
            raw.to_string()
        }
    }

    fn to_bytes(&self, text: &str, width: usize, endianness: Endianness) -> Result<Vec<u8>, CodecError> {
        if width == 0 {
            return Err(CodecError::zero_width());
        }
        let value = parse_decimal(text)?;
        let (min, max) = Self::bounds(width);
        if value < min || value > max {
            return Err(CodecError::invalid(
                text,
                format!("out of range [{}, {}] for {} byte(s)", min, max, width),
            ));
        }
        let raw = if value.sign() == Sign::Minus {
            value + BigInt::from(modulus(width))
        } else {
            value
        };
        Ok(split(raw.magnitude(), width, endianness))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UnsignedIntegerCodec;

impl Codec for UnsignedIntegerCodec {
    fn name(&self) -> &str {
        "unsigned integer"
    }

    fn display_width(&self, width: usize) -> usize {
        if width == 0 {
            return 0;
        }
        (modulus(width) - 1u32).to_string().len()
    }

    fn is_endian_sensitive(&self) -> bool {
        true
    }

    fn format(&self, values: &[u8], endianness: Endianness) -> String {
        assemble(values, endianness).to_string()
    }

    fn to_bytes(&self, text: &str, width: usize, endianness: Endianness) -> Result<Vec<u8>, CodecError> {
        if width == 0 {
            return Err(CodecError::zero_width());
        }
        let value = parse_decimal(text)?;
        let max = modulus(width) - 1u32;
        if value.sign() == Sign::Minus {
            return Err(CodecError::invalid(text, "negative value for unsigned integer"));
        }
        let magnitude = value.magnitude();
        if *magnitude > max {
            return Err(CodecError::invalid(
                text,
                format!("out of range [0, {}] for {} byte(s)", max, width),
            ));
        }
        Ok(split(magnitude, width, endianness))
    }
}
