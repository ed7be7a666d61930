// Fri Oct 16 2026 - Alex

pub mod address;
pub mod block;
pub mod byte;
pub mod endian;
pub mod error;
pub mod source;
pub mod window;

pub use address::Address;
pub use block::{BlockId, MemoryBlock};
pub use byte::{ByteFlags, ByteState, MemoryByte};
pub use endian::Endianness;
pub use error::MemoryError;
pub use source::{BufferMemory, FetchStatus, Fetched, MemorySource};
pub use window::MemoryWindow;
