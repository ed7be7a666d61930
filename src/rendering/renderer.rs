// Sat Oct 17 2026 - Alex

use crate::codec::{encode_edit, Codec, EditOutcome};
use crate::config::RenderingConfig;
use crate::layout::{column_labels, LayoutError, TableLayout};
use crate::memory::{Address, ByteState, Endianness, MemoryBlock, MemorySource, MemoryWindow};
use crate::rendering::RenderingError;
use crate::sync::{SyncEvent, SyncProperty};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub offset: usize,
    pub address: Address,
    pub text: String,
    pub state: ByteState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLine {
    pub address: Address,
    pub label: String,
    pub cells: Vec<Cell>,
}

impl TableLine {
    pub fn state(&self) -> ByteState {
        self.cells.iter().map(|c| c.state).max().unwrap_or(ByteState::Normal)
    }
}

pub struct Renderer {
    block: MemoryBlock,
    rendering_id: String,
    codec: Arc<dyn Codec>,
    layout: TableLayout,
    padding: String,
    units_per_line: usize,
    default_endianness: Endianness,
    endianness_override: Option<Endianness>,
    fixed_column: bool,
    selected: Option<Address>,
    top: Address,
}

impl Renderer {
    pub fn new(
        block: MemoryBlock,
        rendering_id: impl Into<String>,
        codec: Arc<dyn Codec>,
        layout: TableLayout,
        config: &RenderingConfig,
    ) -> Self {
        let top = block.base().clone();
        Self {
            block,
            rendering_id: rendering_id.into(),
            codec,
            layout,
            padding: config.padding_token.clone(),
            units_per_line: config.units_per_line,
            default_endianness: config.default_endianness,
            endianness_override: None,
            fixed_column: false,
            selected: None,
            top,
        }
    }

    pub fn with_fixed_column(mut self) -> Self {
        self.fixed_column = true;
        self
    }

    pub fn block(&self) -> &MemoryBlock {
        &self.block
    }

    pub fn rendering_id(&self) -> &str {
        &self.rendering_id
    }

    pub fn codec(&self) -> &dyn Codec {
        self.codec.as_ref()
    }

    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    pub fn padding(&self) -> &str {
        &self.padding
    }

    pub fn has_fixed_column(&self) -> bool {
        self.fixed_column
    }

    pub fn selected_address(&self) -> Option<&Address> {
        self.selected.as_ref()
    }

    pub fn top_address(&self) -> &Address {
        &self.top
    }

    pub fn column_labels(&self) -> Vec<String> {
        column_labels(&self.layout)
    }

    pub fn address_label(&self, address: &Address) -> String {
        address.to_label(self.block.label_digits())
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness_override
            .or_else(|| self.block.preferred_endianness())
            .unwrap_or(self.default_endianness)
    }

    /// An explicit user choice wins over what the window's source prefers.
    pub fn endianness_for(&self, window: &MemoryWindow) -> Endianness {
        self.endianness_override
            .or_else(|| window.preferred_endianness())
            .unwrap_or_else(|| self.endianness())
    }

    pub fn set_endianness(&mut self, endianness: Option<Endianness>) {
        self.endianness_override = endianness;
    }

    pub fn toggle_endianness(&mut self) -> Option<Endianness> {
        if !self.codec.is_endian_sensitive() {
            return None;
        }
        let next = self.endianness().toggled();
        self.endianness_override = Some(next);
        log::debug!("{} on {} switched to {}", self.rendering_id, self.block, next);
        Some(next)
    }

    pub fn render_cell(&self, window: &MemoryWindow, offset: usize) -> Result<Cell, RenderingError> {
        let width = self.layout.bytes_per_column();
        let state = ByteState::combine(window.range(offset, width));
        let text = self
            .codec
            .to_text(window, offset, width, self.endianness_for(window), &self.padding)?;
        Ok(Cell {
            offset,
            address: window.address_at(offset),
            text,
            state,
        })
    }

    pub fn render_table(&self, window: &MemoryWindow) -> Result<Vec<TableLine>, RenderingError> {
        let lines = self.layout.lines_for(window.len());
        let padded = window.padded_to(lines * self.layout.bytes_per_line());
        let mut table = Vec::with_capacity(lines);

        for row in 0..lines {
            let address = self.layout.address_of(row as u64, 0, padded.base());
            let cells = (0..self.layout.columns_per_line())
                .map(|column| {
                    let offset = self.layout.cell_offset(row, column)?;
                    self.render_cell(&padded, offset)
                })
                .collect::<Result<Vec<_>, _>>()?;
            table.push(TableLine {
                label: self.address_label(&address),
                address,
                cells,
            });
        }
        Ok(table)
    }

    /// Converts text typed into a cell into bytes diffed against `window`.
    /// Blank text means the user backed out and yields `None`.
    pub fn edit_cell(
        &self,
        window: &MemoryWindow,
        row: usize,
        column: usize,
        text: &str,
    ) -> Result<Option<EditOutcome>, RenderingError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let width = self.layout.bytes_per_column();
        let offset = self.layout.cell_offset(row, column)?;
        if offset + width > window.len() {
            return Err(LayoutError::CellOutOfRange { row, column }.into());
        }
        let outcome = encode_edit(
            self.codec.as_ref(),
            text,
            window,
            offset,
            width,
            self.endianness_for(window),
        )?;
        Ok(Some(outcome))
    }

    /// Writes only the bytes the edit changed. Every run is checked before
    /// the first write, so a rejected commit leaves memory as it was.
    pub fn commit(&self, outcome: &EditOutcome, source: &dyn MemorySource) -> Result<usize, RenderingError> {
        let runs = outcome.write_runs();
        for run in &runs {
            if let Err(e) = source.check_write(&run.address, run.bytes.len()) {
                log::warn!("Commit at {} through {} rejected: {}", outcome.address(), self.rendering_id, e);
                return Err(e.into());
            }
        }

        let mut written = 0;
        for run in &runs {
            source.write(&run.address, &run.bytes)?;
            written += run.bytes.len();
        }
        log::debug!("Committed {} byte(s) at {} through {}", written, outcome.address(), self.rendering_id);
        Ok(written)
    }

    /// Lines must stay at the configured number of units; within that the
    /// layout rules decide. Returns `Ok(false)` if nothing changed.
    pub fn reformat(&mut self, bytes_per_line: usize, bytes_per_column: usize) -> Result<bool, RenderingError> {
        let unit = self.layout.addressable_unit_size();
        let rejection = if bytes_per_line != self.units_per_line * unit {
            Some(format!("lines hold {} units", self.units_per_line))
        } else if self.fixed_column && bytes_per_column != self.layout.bytes_per_column() {
            Some(format!("{} has a fixed column size", self.rendering_id))
        } else {
            None
        };
        if let Some(reason) = rejection {
            log::warn!("Rejected reformat of {}: {}", self.rendering_id, reason);
            return Err(LayoutError::InvalidLayout {
                bytes_per_line,
                bytes_per_column,
                addressable_unit_size: unit,
                reason,
            }
            .into());
        }

        match self.layout.reformat(bytes_per_line, bytes_per_column) {
            Ok(changed) => Ok(changed),
            Err(e) => {
                log::warn!("Rejected reformat of {}: {}", self.rendering_id, e);
                Err(e.into())
            }
        }
    }

    pub fn set_column_units(&mut self, units: usize) -> Result<bool, RenderingError> {
        let unit = self.layout.addressable_unit_size();
        let Some(bytes_per_column) = units.checked_mul(unit) else {
            return Err(LayoutError::InvalidLayout {
                bytes_per_line: self.layout.bytes_per_line(),
                bytes_per_column: usize::MAX,
                addressable_unit_size: unit,
                reason: format!("{} units per column overflows", units),
            }
            .into());
        };
        self.reformat(self.layout.bytes_per_line(), bytes_per_column)
    }

    pub fn select(&mut self, address: Address) -> SyncProperty {
        self.selected = Some(address.clone());
        SyncProperty::SelectedAddress(address)
    }

    pub fn scroll_to(&mut self, address: Address) -> SyncProperty {
        self.top = address.clone();
        SyncProperty::TopVisibleAddress(address)
    }

    pub fn reset(&mut self) {
        let base = self.block.base().clone();
        self.selected = Some(base.clone());
        self.top = base;
    }

    pub fn apply_sync(&mut self, event: &SyncEvent) -> Result<bool, RenderingError> {
        if event.block != self.block.id() {
            return Ok(false);
        }
        match &event.property {
            SyncProperty::SelectedAddress(address) => {
                let changed = self.selected.as_ref() != Some(address);
                self.selected = Some(address.clone());
                Ok(changed)
            }
            SyncProperty::TopVisibleAddress(address) => {
                let changed = self.top != *address;
                self.top = address.clone();
                Ok(changed)
            }
            SyncProperty::ColumnSize(units) => {
                if self.fixed_column || *units == self.layout.units_per_column() {
                    return Ok(false);
                }
                self.set_column_units(*units)
            }
        }
    }

    pub fn sync_events(&self) -> Vec<SyncProperty> {
        let mut events = Vec::with_capacity(3);
        if let Some(selected) = &self.selected {
            events.push(SyncProperty::SelectedAddress(selected.clone()));
        }
        events.push(SyncProperty::ColumnSize(self.layout.units_per_column()));
        events.push(SyncProperty::TopVisibleAddress(self.top.clone()));
        events
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("block", &self.block.id())
            .field("rendering_id", &self.rendering_id)
            .field("codec", &self.codec.name())
            .field("layout", &self.layout)
            .field("endianness", &self.endianness())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{CodecError, DataType};
    use crate::memory::{BufferMemory, MemoryByte, MemoryError};

    fn renderer(data_type: DataType, block: MemoryBlock) -> Renderer {
        let config = RenderingConfig::default();
        let layout = TableLayout::with_units(16, 4, 1).unwrap();
        Renderer::new(block, data_type.rendering_id(), data_type.codec(), layout, &config)
    }

    fn block() -> MemoryBlock {
        MemoryBlock::new("test", Address::from(0x1000))
    }

    #[test]
    fn test_render_table_pads_last_line() {
        let r = renderer(DataType::RawHex, block());
        let values: Vec<u8> = (0u8..20).collect();
        let window = MemoryWindow::from_values(Address::from(0x1000), &values);
        let table = r.render_table(&window).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table[0].label, "00001000");
        assert_eq!(table[1].label, "00001010");
        assert_eq!(table[0].cells[0].text, "00010203");
        assert_eq!(table[1].cells[0].text, "10111213");
        assert_eq!(table[1].cells[1].text, "????????");
        assert_eq!(table[1].cells[1].state, ByteState::Unknown);
        assert_eq!(table[1].state(), ByteState::Unknown);
        assert_eq!(table[0].state(), ByteState::Normal);
    }

    #[test]
    fn test_render_cell_state_and_endianness() {
        let mut r = renderer(DataType::UnsignedInteger, block());
        let window = MemoryWindow::new(
            Address::from(0x1000),
            vec![
                MemoryByte::known(1),
                MemoryByte::known(0).with_flag(crate::memory::ByteFlags::CHANGED, true),
                MemoryByte::known(0),
                MemoryByte::known(0),
            ],
        );
        let cell = r.render_cell(&window, 0).unwrap();
        assert_eq!(cell.text, "16777216");
        assert_eq!(cell.state, ByteState::Changed);

        assert_eq!(r.toggle_endianness(), Some(Endianness::Little));
        assert_eq!(r.render_cell(&window, 0).unwrap().text, "1");
    }

    #[test]
    fn test_endianness_precedence() {
        let mut r = renderer(DataType::SignedInteger, block().with_endianness(Endianness::Little));
        assert_eq!(r.endianness(), Endianness::Little);

        let window = MemoryWindow::from_values(Address::from(0x1000), &[0; 4]).with_preferred_endianness(Some(Endianness::Big));
        assert_eq!(r.endianness_for(&window), Endianness::Big);

        r.set_endianness(Some(Endianness::Little));
        assert_eq!(r.endianness_for(&window), Endianness::Little);
    }

    #[test]
    fn test_toggle_ignored_for_ascii() {
        let mut r = renderer(DataType::Ascii, block());
        assert_eq!(r.toggle_endianness(), None);
        assert_eq!(r.endianness(), Endianness::Big);
    }

    #[test]
    fn test_edit_cell_and_commit() {
        let memory = BufferMemory::new(Address::from(0x1000), vec![0; 16]);
        let r = renderer(DataType::SignedInteger, block());
        let window = memory.fetch(&Address::from(0x1000), 16).unwrap().window;

        let outcome = r.edit_cell(&window, 0, 1, "-2").unwrap().unwrap();
        assert_eq!(outcome.bytes(), &[0xFF, 0xFF, 0xFF, 0xFE]);
        assert_eq!(r.commit(&outcome, &memory).unwrap(), 4);
        assert_eq!(&memory.snapshot()[4..8], &[0xFF, 0xFF, 0xFF, 0xFE]);
    }

    #[test]
    fn test_rejected_commit_writes_nothing() {
        let memory = BufferMemory::new(Address::from(0x10), vec![1, 2, 3, 4, 5, 0, 0, 0]).with_read_only(4..5);
        let mut r = renderer(DataType::RawHex, MemoryBlock::new("ro", Address::from(0x10)));
        r.set_column_units(8).unwrap();
        let window = memory.fetch(&Address::from(0x10), 8).unwrap().window;

        let outcome = r.edit_cell(&window, 0, 0, "0902030807000000").unwrap().unwrap();
        assert_eq!(outcome.write_runs().len(), 2);
        assert!(matches!(
            r.commit(&outcome, &memory),
            Err(RenderingError::Memory(MemoryError::ReadOnly(_)))
        ));
        assert_eq!(memory.snapshot(), vec![1, 2, 3, 4, 5, 0, 0, 0]);
    }

    #[test]
    fn test_column_units_overflow_is_rejected() {
        let mut r = renderer(DataType::RawHex, MemoryBlock::new("wide", Address::zero()).with_addressable_size(2));
        r.layout = TableLayout::with_units(16, 4, 2).unwrap();
        assert!(matches!(
            r.set_column_units(usize::MAX),
            Err(RenderingError::Layout(LayoutError::InvalidLayout { .. }))
        ));
        assert_eq!(r.layout().units_per_column(), 4);
    }

    #[test]
    fn test_edit_cell_blank_and_invalid() {
        let r = renderer(DataType::SignedInteger, block());
        let window = MemoryWindow::from_values(Address::from(0x1000), &[0; 16]);
        assert!(r.edit_cell(&window, 0, 0, "   ").unwrap().is_none());
        assert!(matches!(
            r.edit_cell(&window, 0, 0, "abc"),
            Err(RenderingError::Codec(CodecError::InvalidInput { .. }))
        ));
        assert!(matches!(
            r.edit_cell(&window, 1, 0, "1"),
            Err(RenderingError::Layout(LayoutError::CellOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_reformat_line_policy() {
        let mut r = renderer(DataType::RawHex, block());
        assert!(r.reformat(16, 8).unwrap());
        assert!(!r.reformat(16, 8).unwrap());
        assert!(r.reformat(32, 8).is_err());
        assert!(r.reformat(16, 3).is_err());
        assert_eq!(r.layout().bytes_per_column(), 8);
    }

    #[test]
    fn test_fixed_column_rejects_reformat_and_sync() {
        let mut r = renderer(DataType::SignedInteger, block()).with_fixed_column();
        assert!(r.reformat(16, 2).is_err());
        let event = SyncEvent {
            block: r.block().id(),
            property: SyncProperty::ColumnSize(2),
        };
        assert!(!r.apply_sync(&event).unwrap());
        assert_eq!(r.layout().units_per_column(), 4);
    }

    #[test]
    fn test_apply_sync_only_for_own_block() {
        let mut r = renderer(DataType::RawHex, block());
        let own = SyncEvent {
            block: r.block().id(),
            property: SyncProperty::ColumnSize(8),
        };
        assert!(r.apply_sync(&own).unwrap());
        assert_eq!(r.layout().units_per_column(), 8);

        let other = SyncEvent {
            block: crate::memory::BlockId::next(),
            property: SyncProperty::SelectedAddress(Address::from(5)),
        };
        assert!(!r.apply_sync(&other).unwrap());
        assert!(r.selected_address().is_none());
    }

    #[test]
    fn test_select_scroll_reset() {
        let mut r = renderer(DataType::RawHex, block());
        assert_eq!(r.select(Address::from(0x1004)), SyncProperty::SelectedAddress(Address::from(0x1004)));
        r.scroll_to(Address::from(0x1100));
        assert_eq!(r.sync_events().len(), 3);

        r.reset();
        assert_eq!(r.selected_address(), Some(&Address::from(0x1000)));
        assert_eq!(r.top_address(), &Address::from(0x1000));
    }
}
