// Sat Oct 17 2026 - Alex

use crate::layout::LayoutError;
use crate::memory::Address;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

pub const COLUMN_UNITS: [usize; 5] = [1, 2, 4, 8, 16];

fn layout_violation(bytes_per_line: usize, bytes_per_column: usize, addressable_unit_size: usize) -> Option<&'static str> {
    if bytes_per_line == 0 || bytes_per_column == 0 || addressable_unit_size == 0 {
        return Some("sizes must be positive");
    }
    if bytes_per_line % bytes_per_column != 0 {
        return Some("column size must divide line size");
    }
    if bytes_per_column % addressable_unit_size != 0 {
        return Some("column size must be a multiple of the addressable unit");
    }
    if !COLUMN_UNITS.contains(&(bytes_per_column / addressable_unit_size)) {
        return Some("column must hold 1, 2, 4, 8 or 16 addressable units");
    }
    None
}

pub fn validate_layout(bytes_per_line: usize, bytes_per_column: usize, addressable_unit_size: usize) -> bool {
    layout_violation(bytes_per_line, bytes_per_column, addressable_unit_size).is_none()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPosition {
    pub row: u64,
    pub column: usize,
    pub byte_in_column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayout {
    bytes_per_line: usize,
    bytes_per_column: usize,
    addressable_unit_size: usize,
}

impl TableLayout {
    pub fn new(bytes_per_line: usize, bytes_per_column: usize, addressable_unit_size: usize) -> Result<Self, LayoutError> {
        match layout_violation(bytes_per_line, bytes_per_column, addressable_unit_size) {
            None => Ok(Self {
                bytes_per_line,
                bytes_per_column,
                addressable_unit_size,
            }),
            Some(reason) => Err(LayoutError::InvalidLayout {
                bytes_per_line,
                bytes_per_column,
                addressable_unit_size,
                reason: reason.to_string(),
            }),
        }
    }

    pub fn with_units(units_per_line: usize, units_per_column: usize, addressable_unit_size: usize) -> Result<Self, LayoutError> {
        Self::new(
            units_per_line.saturating_mul(addressable_unit_size),
            units_per_column.saturating_mul(addressable_unit_size),
            addressable_unit_size,
        )
    }

    pub fn bytes_per_line(&self) -> usize {
        self.bytes_per_line
    }

    pub fn bytes_per_column(&self) -> usize {
        self.bytes_per_column
    }

    pub fn addressable_unit_size(&self) -> usize {
        self.addressable_unit_size
    }

    pub fn columns_per_line(&self) -> usize {
        self.bytes_per_line / self.bytes_per_column
    }

    pub fn units_per_line(&self) -> usize {
        self.bytes_per_line / self.addressable_unit_size
    }

    pub fn units_per_column(&self) -> usize {
        self.bytes_per_column / self.addressable_unit_size
    }

    /// Replaces line and column size together. On error nothing changes.
    /// Returns `Ok(false)` when the table already has this format.
    pub fn reformat(&mut self, bytes_per_line: usize, bytes_per_column: usize) -> Result<bool, LayoutError> {
        let candidate = Self::new(bytes_per_line, bytes_per_column, self.addressable_unit_size)?;
        if candidate == *self {
            return Ok(false);
        }
        *self = candidate;
        Ok(true)
    }

    pub fn address_of(&self, row: u64, column: usize, base: &Address) -> Address {
        let offset = BigUint::from(row) * BigUint::from(self.bytes_per_line)
            + BigUint::from(column) * BigUint::from(self.bytes_per_column);
        base + &offset
    }

    pub fn offset_to_row_column(&self, offset: u64) -> CellPosition {
        let line = self.bytes_per_line as u64;
        let column = self.bytes_per_column as u64;
        let in_line = offset % line;
        CellPosition {
            row: offset / line,
            column: (in_line / column) as usize,
            byte_in_column: (in_line % column) as usize,
        }
    }

    pub fn position_of(&self, address: &Address, base: &Address) -> Option<CellPosition> {
        let distance = address.distance_from(base)?;
        let line = BigUint::from(self.bytes_per_line);
        let row = (&distance / &line).to_u64()?;
        let in_line = (&distance % &line).to_u64()?;
        let in_line_position = self.offset_to_row_column(in_line);
        Some(CellPosition { row, ..in_line_position })
    }

    pub fn line_start(&self, address: &Address, base: &Address) -> Option<Address> {
        let position = self.position_of(address, base)?;
        Some(self.address_of(position.row, 0, base))
    }

    pub fn cell_offset(&self, row: usize, column: usize) -> Result<usize, LayoutError> {
        if column >= self.columns_per_line() {
            return Err(LayoutError::CellOutOfRange { row, column });
        }
        row.checked_mul(self.bytes_per_line)
            .and_then(|r| r.checked_add(column * self.bytes_per_column))
            .ok_or(LayoutError::CellOutOfRange { row, column })
    }

    pub fn lines_for(&self, len: usize) -> usize {
        (len + self.bytes_per_line - 1) / self.bytes_per_line
    }
}
