// Fri Oct 16 2026 - Alex

use crate::memory::{Address, ByteFlags, Endianness, MemoryByte, MemoryError, MemoryWindow};
use num_traits::ToPrimitive;
use parking_lot::RwLock;
use std::fs;
use std::ops::Range;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Complete,
    PartiallyUnreadable { unreadable: usize },
}

impl FetchStatus {
    pub fn of(window: &MemoryWindow) -> Self {
        match window.unknown_count() {
            0 => Self::Complete,
            unreadable => Self::PartiallyUnreadable { unreadable },
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

#[derive(Debug, Clone)]
pub struct Fetched {
    pub window: MemoryWindow,
    pub status: FetchStatus,
}

impl Fetched {
    pub fn new(window: MemoryWindow) -> Self {
        let status = FetchStatus::of(&window);
        Self { window, status }
    }
}

pub trait MemorySource: Send + Sync {
    fn fetch(&self, addr: &Address, units: usize) -> Result<Fetched, MemoryError>;
    fn write(&self, addr: &Address, bytes: &[u8]) -> Result<(), MemoryError>;

    /// Whether `len` bytes at `addr` would be accepted by `write`.
    fn check_write(&self, _addr: &Address, _len: usize) -> Result<(), MemoryError> {
        Ok(())
    }

    fn addressable_size(&self) -> usize {
        1
    }

    fn preferred_endianness(&self) -> Option<Endianness> {
        None
    }
}

pub struct BufferMemory {
    base: Address,
    data: RwLock<Vec<u8>>,
    unreadable: Vec<Range<usize>>,
    read_only: Vec<Range<usize>>,
    addressable_size: usize,
    endianness: Option<Endianness>,
}

impl BufferMemory {
    pub fn new(base: Address, data: Vec<u8>) -> Self {
        Self {
            base,
            data: RwLock::new(data),
            unreadable: Vec::new(),
            read_only: Vec::new(),
            addressable_size: 1,
            endianness: None,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P, base: Address) -> Result<Self, MemoryError> {
        let data = fs::read(path.as_ref())?;
        log::debug!("Loaded {} bytes from {}", data.len(), path.as_ref().display());
        Ok(Self::new(base, data))
    }

    pub fn with_unreadable(mut self, range: Range<usize>) -> Self {
        self.unreadable.push(range);
        self
    }

    pub fn with_read_only(mut self, range: Range<usize>) -> Self {
        self.read_only.push(range);
        self
    }

    pub fn with_addressable_size(mut self, size: usize) -> Self {
        self.addressable_size = size.max(1);
        self
    }

    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = Some(endianness);
        self
    }

    pub fn base(&self) -> &Address {
        &self.base
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    pub fn snapshot(&self) -> Vec<u8> {
        self.data.read().clone()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), MemoryError> {
        fs::write(path, self.data.read().as_slice())?;
        Ok(())
    }

    fn offset_of(&self, addr: &Address) -> Option<usize> {
        addr.distance_from(&self.base)?.to_usize()
    }

    fn is_unreadable(&self, offset: usize) -> bool {
        self.unreadable.iter().any(|r| r.contains(&offset))
    }

    fn is_read_only(&self, offset: usize) -> bool {
        self.read_only.iter().any(|r| r.contains(&offset))
    }

    fn writable_range(&self, data_len: usize, addr: &Address, len: usize) -> Result<Range<usize>, MemoryError> {
        let out_of_bounds = || MemoryError::OutOfBounds {
            address: addr.to_string(),
            len,
        };
        let start = self.offset_of(addr).ok_or_else(out_of_bounds)?;
        let end = start
            .checked_add(len)
            .filter(|end| *end <= data_len)
            .ok_or_else(out_of_bounds)?;

        if let Some(offset) = (start..end).find(|o| self.is_read_only(*o)) {
            return Err(MemoryError::ReadOnly(self.base.offset(offset as u64).to_string()));
        }
        if let Some(offset) = (start..end).find(|o| self.is_unreadable(*o)) {
            return Err(MemoryError::WriteFailed(self.base.offset(offset as u64).to_string()));
        }
        Ok(start..end)
    }
}

impl MemorySource for BufferMemory {
    fn fetch(&self, addr: &Address, units: usize) -> Result<Fetched, MemoryError> {
        let len = units
            .checked_mul(self.addressable_size)
            .ok_or_else(|| MemoryError::OutOfBounds {
                address: addr.to_string(),
                len: units,
            })?;
        let data = self.data.read();
        // Offset of the buffer start relative to `addr`, in either direction.
        let ahead = self.offset_of(addr);
        let behind = self.base.distance_from(addr).and_then(|d| d.to_usize());

        let bytes = (0..len)
            .map(|i| {
                let offset = match (ahead, behind) {
                    (Some(start), _) => start.checked_add(i),
                    (None, Some(gap)) => i.checked_sub(gap),
                    (None, None) => None,
                };
                match offset {
                    Some(o) if o < data.len() && !self.is_unreadable(o) => {
                        let byte = MemoryByte::known(data[o]);
                        byte.with_flag(ByteFlags::READ_ONLY, self.is_read_only(o))
                    }
                    _ => MemoryByte::unknown(),
                }
            })
            .collect();

        let window = MemoryWindow::new(addr.clone(), bytes).with_preferred_endianness(self.endianness);
        let fetched = Fetched::new(window);
        if let FetchStatus::PartiallyUnreadable { unreadable } = fetched.status {
            log::debug!("Fetch at {}: {} of {} bytes unreadable", addr, unreadable, len);
        }
        Ok(fetched)
    }

    fn write(&self, addr: &Address, bytes: &[u8]) -> Result<(), MemoryError> {
        let mut data = self.data.write();
        let range = self.writable_range(data.len(), addr, bytes.len())?;
        data[range].copy_from_slice(bytes);
        Ok(())
    }

    fn check_write(&self, addr: &Address, len: usize) -> Result<(), MemoryError> {
        let data = self.data.read();
        self.writable_range(data.len(), addr, len).map(|_| ())
    }

    fn addressable_size(&self) -> usize {
        self.addressable_size
    }

    fn preferred_endianness(&self) -> Option<Endianness> {
        self.endianness
    }
}
