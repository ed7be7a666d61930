// Sat Oct 17 2026 - Alex

use crate::memory::{Address, ByteState};
use crate::rendering::{Cell, TableLine};
use colored::*;
use itertools::Itertools;

pub struct TableDisplay {
    use_color: bool,
    separator: String,
    selected: Option<Address>,
}

impl TableDisplay {
    pub fn new() -> Self {
        Self {
            use_color: true,
            separator: "  ".to_string(),
            selected: None,
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_selected(mut self, selected: Option<Address>) -> Self {
        self.selected = selected;
        self
    }

    fn cell_width(headers: &[String], lines: &[TableLine]) -> usize {
        let widest_cell = lines
            .iter()
            .flat_map(|l| l.cells.iter())
            .map(|c| c.text.chars().count())
            .max()
            .unwrap_or(0);
        let widest_header = headers.iter().map(|h| h.chars().count()).max().unwrap_or(0);
        widest_cell.max(widest_header)
    }

    fn paint(&self, cell: &Cell, width: usize) -> String {
        let padded = format!("{:>width$}", cell.text, width = width);
        if !self.use_color {
            return padded;
        }
        let styled = match cell.state {
            ByteState::Unknown => padded.dimmed(),
            ByteState::Changed => padded.red().bold(),
            ByteState::Normal => padded.normal(),
        };
        if self.selected.as_ref() == Some(&cell.address) {
            styled.reversed().to_string()
        } else {
            styled.to_string()
        }
    }

    pub fn render(&self, headers: &[String], lines: &[TableLine]) -> String {
        let width = Self::cell_width(headers, lines);
        let label_width = lines.iter().map(|l| l.label.len()).max().unwrap_or(0);
        let mut out = String::new();

        let header_row = headers
            .iter()
            .map(|h| format!("{:>width$}", h, width = width))
            .join(&self.separator);
        let header_row = format!("{:label_width$}{}{}", "", self.separator, header_row, label_width = label_width);
        if self.use_color {
            out.push_str(&header_row.cyan().bold().to_string());
        } else {
            out.push_str(&header_row);
        }
        out.push('\n');

        for line in lines {
            let label = if self.use_color {
                line.label.yellow().to_string()
            } else {
                line.label.clone()
            };
            let cells = line
                .cells
                .iter()
                .map(|c| self.paint(c, width))
                .join(&self.separator);
            out.push_str(&label);
            out.push_str(&self.separator);
            out.push_str(&cells);
            out.push('\n');
        }
        out
    }
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}
