// Sat Oct 17 2026 - Alex

pub mod error;
pub mod labels;
pub mod table;

pub use error::LayoutError;
pub use labels::column_labels;
pub use table::{validate_layout, CellPosition, TableLayout, COLUMN_UNITS};
