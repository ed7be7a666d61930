// Fri Oct 16 2026 - Alex

pub mod codec;
pub mod config;
pub mod layout;
pub mod memory;
pub mod rendering;
pub mod sync;
pub mod ui;
pub mod utils;

pub use codec::{Codec, CodecError, DataType, EditOutcome};
pub use config::{RenderingConfig, ResetScope};
pub use layout::{LayoutError, TableLayout};
pub use memory::{Address, BufferMemory, Endianness, MemoryBlock, MemoryByte, MemorySource, MemoryWindow};
pub use rendering::{Renderer, RenderingContext, RenderingError, RenderingRegistry};
pub use sync::{SyncListener, SyncProperty, SyncService};
