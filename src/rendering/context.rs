// Sat Oct 17 2026 - Alex

use crate::config::{RenderingConfig, ResetScope};
use crate::memory::{BlockId, MemoryBlock};
use crate::rendering::{LifecycleKind, Renderer, RenderingError, RenderingEvent, RenderingListener, RenderingRegistry};
use crate::sync::{isolate, DiagnosticSink, ListenerFailure, LogSink, PropertyId, SyncEvent, SyncListener, SyncProperty, SyncService};
use parking_lot::Mutex;
use std::sync::Arc;

pub type SharedRenderer = Arc<Mutex<Renderer>>;

/// Listener side of a shared renderer. A renderer that is locked while an
/// event goes out is the one publishing it and already holds the value.
struct RendererListener(SharedRenderer);

impl SyncListener for RendererListener {
    fn property_changed(&self, event: &SyncEvent) -> anyhow::Result<()> {
        match self.0.try_lock() {
            Some(mut renderer) => {
                renderer.apply_sync(event)?;
            }
            None => log::trace!("Skipping publishing renderer for {}", event.property),
        }
        Ok(())
    }
}

struct OpenRendering {
    block: BlockId,
    rendering_id: String,
    renderer: SharedRenderer,
    listener: Arc<dyn SyncListener>,
}

fn same_listener(a: &Arc<dyn RenderingListener>, b: &Arc<dyn RenderingListener>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

pub struct RenderingContext {
    config: RenderingConfig,
    registry: RenderingRegistry,
    sync: SyncService,
    open: Vec<OpenRendering>,
    listeners: Vec<Arc<dyn RenderingListener>>,
    sink: Arc<dyn DiagnosticSink>,
}

impl RenderingContext {
    pub fn new(config: RenderingConfig) -> Result<Self, RenderingError> {
        Self::with_sink(config, Arc::new(LogSink))
    }

    pub fn with_sink(config: RenderingConfig, sink: Arc<dyn DiagnosticSink>) -> Result<Self, RenderingError> {
        config.validate().map_err(RenderingError::InvalidConfig)?;
        log::debug!("Rendering context started");
        Ok(Self {
            registry: RenderingRegistry::with_builtins(config.clone()),
            sync: SyncService::with_sink(sink.clone()),
            config,
            open: Vec::new(),
            listeners: Vec::new(),
            sink,
        })
    }

    pub fn config(&self) -> &RenderingConfig {
        &self.config
    }

    pub fn registry(&self) -> &RenderingRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RenderingRegistry {
        &mut self.registry
    }

    pub fn sync(&self) -> &SyncService {
        &self.sync
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    pub fn add_listener(&mut self, listener: Arc<dyn RenderingListener>) {
        if !self.listeners.iter().any(|l| same_listener(l, &listener)) {
            self.listeners.push(listener);
        }
    }

    pub fn remove_listener(&mut self, listener: &Arc<dyn RenderingListener>) {
        self.listeners.retain(|l| !same_listener(l, listener));
    }

    /// Creates a renderer and joins it to its block's sync group, picking up
    /// whatever the group last published.
    pub fn create_rendering(&mut self, block: &MemoryBlock, id: &str) -> Result<Option<SharedRenderer>, RenderingError> {
        let Some(mut renderer) = self.registry.create(block, id)? else {
            return Ok(None);
        };

        for property in [PropertyId::ColumnSize, PropertyId::TopVisibleAddress, PropertyId::SelectedAddress] {
            if let Some(value) = self.sync.property(block.id(), property) {
                let event = SyncEvent {
                    block: block.id(),
                    property: value.clone(),
                };
                if let Err(e) = renderer.apply_sync(&event) {
                    log::warn!("{} could not adopt {}: {}", id, event.property, e);
                }
            }
        }

        let shared: SharedRenderer = Arc::new(Mutex::new(renderer));
        let listener: Arc<dyn SyncListener> = Arc::new(RendererListener(shared.clone()));
        self.sync.add_listener(block.id(), listener.clone());
        self.open.push(OpenRendering {
            block: block.id(),
            rendering_id: id.to_string(),
            renderer: shared.clone(),
            listener,
        });
        self.notify(LifecycleKind::Added, block.id(), id);
        Ok(Some(shared))
    }

    pub fn renderings(&self, block: BlockId, rendering_id: Option<&str>) -> Vec<SharedRenderer> {
        self.open
            .iter()
            .filter(|o| o.block == block && rendering_id.map_or(true, |id| o.rendering_id == id))
            .map(|o| o.renderer.clone())
            .collect()
    }

    pub fn close_rendering(&mut self, renderer: &SharedRenderer) {
        let Some(index) = self.open.iter().position(|o| Arc::ptr_eq(&o.renderer, renderer)) else {
            return;
        };
        let closed = self.open.remove(index);
        self.sync.remove_listener(closed.block, &closed.listener);
        self.notify(LifecycleKind::Removed, closed.block, &closed.rendering_id);
    }

    /// Closes every rendering of a block that went away and forgets its
    /// synchronized state. Returns how many renderings were closed.
    pub fn remove_block(&mut self, block: BlockId) -> usize {
        let closing: Vec<SharedRenderer> = self.renderings(block, None);
        for renderer in &closing {
            self.close_rendering(renderer);
        }
        self.sync.remove_group(block);
        log::debug!("Removed {} with {} rendering(s)", block, closing.len());
        closing.len()
    }

    pub fn publish(&mut self, block: BlockId, property: SyncProperty) -> usize {
        self.sync.publish(block, property)
    }

    pub fn reset_renderings(&self, renderers: &[SharedRenderer], active: &SharedRenderer) -> usize {
        let block = {
            let mut active = active.lock();
            active.reset();
            active.block().id()
        };
        if self.config.reset_scope == ResetScope::Active {
            return 1;
        }

        let mut count = 1;
        for renderer in renderers.iter().filter(|r| !Arc::ptr_eq(r, active)) {
            let mut renderer = renderer.lock();
            if renderer.block().id() == block {
                renderer.reset();
                count += 1;
            }
        }
        count
    }

    fn notify(&self, kind: LifecycleKind, block: BlockId, rendering_id: &str) -> usize {
        let event = RenderingEvent {
            kind,
            block,
            rendering_id: rendering_id.to_string(),
        };
        let listeners = self.listeners.clone();
        let mut delivered = 0;
        for (index, listener) in listeners.iter().enumerate() {
            match isolate(|| listener.rendering_changed(&event)) {
                Ok(()) => delivered += 1,
                Err((message, panicked)) => self.sink.report(&ListenerFailure {
                    block,
                    topic: kind.to_string(),
                    listener_index: index,
                    message,
                    panicked,
                }),
            }
        }
        delivered
    }

    pub fn shutdown(mut self) {
        for open in std::mem::take(&mut self.open) {
            self.sync.remove_listener(open.block, &open.listener);
        }
        self.listeners.clear();
        self.sync.clear();
        log::debug!("Rendering context shut down");
    }
}
