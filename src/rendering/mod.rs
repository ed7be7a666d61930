// Sat Oct 17 2026 - Alex

pub mod context;
pub mod descriptor;
pub mod dynamic;
pub mod error;
pub mod factory;
pub mod lifecycle;
pub mod registry;
pub mod renderer;

pub use context::{RenderingContext, SharedRenderer};
pub use descriptor::{DescriptorSource, FactoryKind, Manifest, ManifestEntry, ManifestSource, RenderingDescriptor, DEFAULT_FACTORY};
pub use dynamic::{DynamicRenderingFactory, IntegerWidthFactory, RenderingType, INTEGER_FAMILY};
pub use error::RenderingError;
pub use factory::{DefaultFactory, RendererFactory};
pub use lifecycle::{LifecycleKind, RenderingEvent, RenderingListener};
pub use registry::RenderingRegistry;
pub use renderer::{Cell, Renderer, TableLine};
