// Fri Oct 16 2026 - Alex

use crate::memory::MemoryError;
use num_bigint::BigUint;
use num_traits::{Num, ToPrimitive, Zero};
use std::fmt;
use std::ops::Add;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address {
    value: BigUint,
}

impl Address {
    pub fn new(value: BigUint) -> Self {
        Self { value }
    }

    pub fn zero() -> Self {
        Self { value: BigUint::zero() }
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn into_value(self) -> BigUint {
        self.value
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.value.to_u64()
    }

    pub fn is_null(&self) -> bool {
        self.value.is_zero()
    }

    pub fn offset(&self, bytes: u64) -> Self {
        Self { value: &self.value + bytes }
    }

    /// Byte distance from `base` up to `self`, or `None` when `self` lies below `base`.
    pub fn distance_from(&self, base: &Address) -> Option<BigUint> {
        if self.value < base.value {
            None
        } else {
            Some(&self.value - &base.value)
        }
    }

    pub fn is_within_range(&self, start: &Address, end: &Address) -> bool {
        self.value >= start.value && self.value < end.value
    }

    /// Accepts `0x`-prefixed hex or plain decimal.
    pub fn parse(text: &str) -> Result<Self, MemoryError> {
        let trimmed = text.trim();
        let parsed = if let Some(hex) = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            BigUint::from_str_radix(hex, 16)
        } else {
            BigUint::from_str_radix(trimmed, 10)
        };
        parsed
            .map(Self::new)
            .map_err(|_| MemoryError::InvalidAddress(text.to_string()))
    }

    pub fn to_label(&self, digits: usize) -> String {
        let hex = self.value.to_str_radix(16).to_uppercase();
        if hex.len() >= digits {
            hex
        } else {
            format!("{}{}", "0".repeat(digits - hex.len()), hex)
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.value.to_str_radix(16))
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}

impl fmt::UpperHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.value, f)
    }
}

impl Add<u64> for &Address {
    type Output = Address;
    fn add(self, rhs: u64) -> Self::Output {
        self.offset(rhs)
    }
}

impl Add<&BigUint> for &Address {
    type Output = Address;
    fn add(self, rhs: &BigUint) -> Self::Output {
        Address { value: &self.value + rhs }
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Self::new(BigUint::from(value))
    }
}

impl From<BigUint> for Address {
    fn from(value: BigUint) -> Self {
        Self::new(value)
    }
}
