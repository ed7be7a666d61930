// Sat Oct 17 2026 - Alex

use crate::codec::SignedIntegerCodec;
use crate::config::RenderingConfig;
use crate::layout::{validate_layout, TableLayout};
use crate::memory::MemoryBlock;
use crate::rendering::{Renderer, RendererFactory, RenderingError};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderingType {
    pub id: String,
    pub display_name: String,
}

pub trait DynamicRenderingFactory: RendererFactory {
    fn rendering_types(&self, block: &MemoryBlock) -> Vec<RenderingType>;
}

pub const INTEGER_FAMILY: &str = "integer";

const INTEGER_BITS: [usize; 4] = [8, 16, 32, 64];

/// Signed integers with the column pinned to a bit width: `integer-8` up to
/// `integer-64`.
#[derive(Debug, Clone)]
pub struct IntegerWidthFactory {
    config: RenderingConfig,
}

impl IntegerWidthFactory {
    pub fn new(config: RenderingConfig) -> Self {
        Self { config }
    }

    fn bits_of(rendering_id: &str) -> Option<usize> {
        let bits: usize = rendering_id
            .strip_prefix(INTEGER_FAMILY)?
            .strip_prefix('-')?
            .parse()
            .ok()?;
        INTEGER_BITS.contains(&bits).then_some(bits)
    }

    fn line_bytes(&self, block: &MemoryBlock) -> usize {
        self.config.units_per_line * block.addressable_size()
    }
}

impl RendererFactory for IntegerWidthFactory {
    fn create(&self, block: &MemoryBlock, rendering_id: &str) -> Result<Option<Renderer>, RenderingError> {
        if rendering_id == INTEGER_FAMILY {
            return Ok(None);
        }
        let bits = Self::bits_of(rendering_id)
            .ok_or_else(|| RenderingError::UnknownRenderingId(rendering_id.to_string()))?;
        let layout = TableLayout::new(self.line_bytes(block), bits / 8, block.addressable_size())?;
        let renderer = Renderer::new(
            block.clone(),
            rendering_id,
            Arc::new(SignedIntegerCodec),
            layout,
            &self.config,
        );
        Ok(Some(renderer.with_fixed_column()))
    }
}

impl DynamicRenderingFactory for IntegerWidthFactory {
    fn rendering_types(&self, block: &MemoryBlock) -> Vec<RenderingType> {
        let unit = block.addressable_size();
        INTEGER_BITS
            .iter()
            .filter(|&&bits| validate_layout(self.line_bytes(block), bits / 8, unit))
            .map(|bits| RenderingType {
                id: format!("{}-{}", INTEGER_FAMILY, bits),
                display_name: format!("Integer ({} bit)", bits),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Address;

    #[test]
    fn test_types_for_byte_block() {
        let factory = IntegerWidthFactory::new(RenderingConfig::default());
        let block = MemoryBlock::new("b", Address::zero());
        let ids: Vec<String> = factory.rendering_types(&block).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["integer-8", "integer-16", "integer-32", "integer-64"]);
    }

    #[test]
    fn test_types_for_wide_units() {
        let factory = IntegerWidthFactory::new(RenderingConfig::default());
        let block = MemoryBlock::new("b", Address::zero()).with_addressable_size(4);
        let ids: Vec<String> = factory.rendering_types(&block).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["integer-32", "integer-64"]);
    }

    #[test]
    fn test_create_fixed_width() {
        let factory = IntegerWidthFactory::new(RenderingConfig::default());
        let block = MemoryBlock::new("b", Address::zero());
        let renderer = factory.create(&block, "integer-16").unwrap().unwrap();
        assert_eq!(renderer.layout().bytes_per_column(), 2);
        assert!(renderer.has_fixed_column());

        assert!(factory.create(&block, INTEGER_FAMILY).unwrap().is_none());
        assert!(matches!(
            factory.create(&block, "integer-12"),
            Err(RenderingError::UnknownRenderingId(_))
        ));
    }
}
