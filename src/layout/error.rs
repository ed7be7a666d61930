// Sat Oct 17 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Invalid layout: {bytes_per_line} bytes per line, {bytes_per_column} bytes per column, addressable unit {addressable_unit_size}: {reason}")]
    InvalidLayout {
        bytes_per_line: usize,
        bytes_per_column: usize,
        addressable_unit_size: usize,
        reason: String,
    },
    #[error("Cell ({row}, {column}) is outside the table")]
    CellOutOfRange { row: usize, column: usize },
}
