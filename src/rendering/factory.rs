// Sat Oct 17 2026 - Alex

use crate::codec::DataType;
use crate::config::RenderingConfig;
use crate::layout::TableLayout;
use crate::memory::MemoryBlock;
use crate::rendering::{Renderer, RenderingError};

/// Builds renderers for the ids it is registered under. `Ok(None)` means the
/// factory declines this block, which is not an error.
pub trait RendererFactory: Send + Sync {
    fn create(&self, block: &MemoryBlock, rendering_id: &str) -> Result<Option<Renderer>, RenderingError>;
}

#[derive(Debug, Clone)]
pub struct DefaultFactory {
    config: RenderingConfig,
}

impl DefaultFactory {
    pub fn new(config: RenderingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderingConfig {
        &self.config
    }
}

impl RendererFactory for DefaultFactory {
    fn create(&self, block: &MemoryBlock, rendering_id: &str) -> Result<Option<Renderer>, RenderingError> {
        let data_type = DataType::from_rendering_id(rendering_id)
            .ok_or_else(|| RenderingError::UnknownRenderingId(rendering_id.to_string()))?;
        let layout = TableLayout::with_units(
            self.config.units_per_line,
            self.config.default_column_units,
            block.addressable_size(),
        )?;
        Ok(Some(Renderer::new(
            block.clone(),
            rendering_id,
            data_type.codec(),
            layout,
            &self.config,
        )))
    }
}
