// Sat Oct 17 2026 - Alex

use crate::codec::DataType;
use crate::config::RenderingConfig;
use crate::memory::MemoryBlock;
use crate::rendering::{
    DefaultFactory, DescriptorSource, DynamicRenderingFactory, FactoryKind, IntegerWidthFactory, Renderer,
    RendererFactory, RenderingDescriptor, RenderingError, INTEGER_FAMILY,
};
use indexmap::IndexMap;
use std::sync::Arc;

struct DynamicEntry {
    types: Arc<dyn DynamicRenderingFactory>,
    factory: Arc<dyn RendererFactory>,
}

/// Rendering ids to descriptors, in registration order. Entries are never
pub struct RenderingRegistry {
    descriptors: IndexMap<String, RenderingDescriptor>,
    dynamic: IndexMap<String, DynamicEntry>,
    default_factory: DefaultFactory,
}

impl RenderingRegistry {
    pub fn new(config: RenderingConfig) -> Self {
        Self {
            descriptors: IndexMap::new(),
            dynamic: IndexMap::new(),
            default_factory: DefaultFactory::new(config),
        }
    }

    pub fn with_builtins(config: RenderingConfig) -> Self {
        let mut registry = Self::new(config.clone());
        for data_type in DataType::ALL {
            let descriptor = RenderingDescriptor::new(data_type.rendering_id(), data_type.display_name());
            // Fresh registry, ids are distinct.
            let _ = registry.register(descriptor);
        }
        let _ = registry.register_dynamic(
            RenderingDescriptor::new(INTEGER_FAMILY, "Integer"),
            Arc::new(IntegerWidthFactory::new(config)),
        );
        registry
    }

    /// Fails on an id that is already registered; the first one stays.
    pub fn register(&mut self, descriptor: RenderingDescriptor) -> Result<(), RenderingError> {
        if self.descriptors.contains_key(&descriptor.id) {
            return Err(RenderingError::DuplicateRegistration(descriptor.id));
        }
        log::debug!("Registered rendering {} ({})", descriptor.id, descriptor.display_name);
        self.descriptors.insert(descriptor.id.clone(), descriptor);
        Ok(())
    }

    pub fn register_dynamic<F>(&mut self, parent: RenderingDescriptor, factory: Arc<F>) -> Result<(), RenderingError>
    where
        F: DynamicRenderingFactory + 'static,
    {
        let as_factory: Arc<dyn RendererFactory> = factory.clone();
        let parent = RenderingDescriptor {
            factory: FactoryKind::Custom(as_factory.clone()),
            ..parent
        };
        let id = parent.id.clone();
        self.register(parent)?;
        self.dynamic.insert(
            id,
            DynamicEntry {
                types: factory,
                factory: as_factory,
            },
        );
        Ok(())
    }

    pub fn load_from(&mut self, source: &dyn DescriptorSource) -> Result<usize, RenderingError> {
        let mut added = 0;
        for descriptor in source.descriptors()? {
            match self.register(descriptor) {
                Ok(()) => added += 1,
                Err(RenderingError::DuplicateRegistration(id)) => {
                    log::warn!("Skipping duplicate rendering {}", id);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(added)
    }

    pub fn descriptor(&self, id: &str) -> Option<&RenderingDescriptor> {
        self.descriptors.get(id)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &RenderingDescriptor> {
        self.descriptors.values()
    }

    pub fn descriptors_for_view<'a>(&'a self, view_id: &'a str) -> impl Iterator<Item = &'a RenderingDescriptor> + 'a {
        self.descriptors.values().filter(move |d| d.supports_view(view_id))
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn is_dynamic_parent(&self, id: &str) -> bool {
        self.dynamic.contains_key(id)
    }

    pub fn dynamic_types(&self, block: &MemoryBlock) -> Vec<(String, String)> {
        self.dynamic
            .iter()
            .flat_map(|(parent, entry)| {
                entry
                    .types
                    .rendering_types(block)
                    .into_iter()
                    .map(move |t| (parent.clone(), t.id))
            })
            .collect()
    }

    /// Looks `id` up, falling back to the dynamic families, and runs its
    /// factory. `Ok(None)` when the factory declines.
    pub fn create(&mut self, block: &MemoryBlock, id: &str) -> Result<Option<Renderer>, RenderingError> {
        if !self.descriptors.contains_key(id) {
            self.discover(block, id)?;
        }
        let factory = match self.descriptors.get(id) {
            Some(descriptor) => descriptor.factory.clone(),
            None => return Err(RenderingError::UnknownRenderingId(id.to_string())),
        };

        let renderer = match factory {
            FactoryKind::Default => self.default_factory.create(block, id)?,
            FactoryKind::Custom(factory) => factory.create(block, id)?,
        };
        match &renderer {
            Some(_) => log::debug!("Created {} for {}", id, block),
            None => log::debug!("Factory for {} declined {}", id, block),
        }
        Ok(renderer)
    }

    fn discover(&mut self, block: &MemoryBlock, id: &str) -> Result<(), RenderingError> {
        let found = self.dynamic.iter().find_map(|(parent, entry)| {
            entry
                .types
                .rendering_types(block)
                .into_iter()
                .find(|t| t.id == id)
                .map(|t| (parent.clone(), t, entry.factory.clone()))
        });
        let Some((parent, rendering_type, factory)) = found else {
            return Ok(());
        };
        let views = self
            .descriptors
            .get(&parent)
            .map(|d| d.supported_view_ids.clone())
            .unwrap_or_default();
        log::debug!("Discovered rendering {} under {}", rendering_type.id, parent);
        self.register(RenderingDescriptor {
            id: rendering_type.id,
            display_name: rendering_type.display_name,
            factory: FactoryKind::Custom(factory),
            supported_view_ids: views,
        })
    }
}
