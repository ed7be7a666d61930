// Fri Oct 16 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Out of bounds: {address} + {len} bytes")]
    OutOfBounds { address: String, len: usize },
    #[error("Write failed at address {0}")]
    WriteFailed(String),
    #[error("Memory at {0} is read-only")]
    ReadOnly(String),
}
