// Sat Oct 17 2026 - Alex

use crate::memory::BlockId;
use crate::sync::sink::isolate;
use crate::sync::{DiagnosticSink, ListenerFailure, PropertyId, SyncEvent, SyncProperty};
use std::collections::HashMap;
use std::sync::Arc;

pub trait SyncListener: Send + Sync {
    fn property_changed(&self, event: &SyncEvent) -> anyhow::Result<()>;
}

fn same_listener(a: &Arc<dyn SyncListener>, b: &Arc<dyn SyncListener>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

pub struct SyncGroup {
    block: BlockId,
    listeners: Vec<Arc<dyn SyncListener>>,
    properties: HashMap<PropertyId, SyncProperty>,
    sink: Arc<dyn DiagnosticSink>,
}

impl SyncGroup {
    pub fn new(block: BlockId, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            block,
            listeners: Vec::new(),
            properties: HashMap::new(),
            sink,
        }
    }

    pub fn block(&self) -> BlockId {
        self.block
    }

    pub fn add_listener(&mut self, listener: Arc<dyn SyncListener>) {
        if !self.listeners.iter().any(|l| same_listener(l, &listener)) {
            self.listeners.push(listener);
        }
    }

    pub fn remove_listener(&mut self, listener: &Arc<dyn SyncListener>) {
        self.listeners.retain(|l| !same_listener(l, listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn property(&self, id: PropertyId) -> Option<&SyncProperty> {
        self.properties.get(&id)
    }

    /// Delivers to every listener once, in registration order. Failures,
    /// returned or panicked, go to the diagnostic sink and delivery goes on.
    pub fn publish(&mut self, property: SyncProperty) -> usize {
        let event = SyncEvent {
            block: self.block,
            property,
        };
        self.properties.insert(event.property.id(), event.property.clone());
        log::trace!("Publishing {} to {} listener(s) of {}", event.property, self.listeners.len(), self.block);

        let listeners = self.listeners.clone();
        let mut delivered = 0;
        for (index, listener) in listeners.iter().enumerate() {
            match isolate(|| listener.property_changed(&event)) {
                Ok(()) => delivered += 1,
                Err((message, panicked)) => self.sink.report(&ListenerFailure {
                    block: self.block,
                    topic: event.property.id().to_string(),
                    listener_index: index,
                    message,
                    panicked,
                }),
            }
        }
        delivered
    }
}
