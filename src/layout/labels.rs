// Sat Oct 17 2026 - Alex

use crate::layout::TableLayout;

pub fn column_labels(layout: &TableLayout) -> Vec<String> {
    let units = layout.units_per_column();
    (0..layout.columns_per_line())
        .map(|i| {
            let first = i * units;
            if units >= 4 {
                format!("{:X} - {:X}", first, first + units - 1)
            } else {
                format!("{:X}", first)
            }
        })
        .collect()
}
