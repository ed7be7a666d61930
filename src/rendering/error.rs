// Sat Oct 17 2026 - Alex

use crate::codec::CodecError;
use crate::layout::LayoutError;
use crate::memory::MemoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderingError {
    #[error("Unknown rendering id: {0}")]
    UnknownRenderingId(String),
    #[error("Rendering id already registered: {0}")]
    DuplicateRegistration(String),
    #[error("Unknown rendering factory '{factory}' for {rendering_id}")]
    UnknownFactory { rendering_id: String, factory: String },
    #[error("Invalid rendering configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid rendering manifest: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Memory(#[from] MemoryError),
}
