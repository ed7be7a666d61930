// Sat Oct 17 2026 - Alex

use crate::memory::BlockId;
use crate::sync::{DiagnosticSink, LogSink, PropertyId, SyncGroup, SyncListener, SyncProperty};
use std::collections::HashMap;
use std::sync::Arc;

pub struct SyncService {
    groups: HashMap<BlockId, SyncGroup>,
    sink: Arc<dyn DiagnosticSink>,
}

impl SyncService {
    pub fn new() -> Self {
        Self::with_sink(Arc::new(LogSink))
    }

    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            groups: HashMap::new(),
            sink,
        }
    }

    pub fn add_listener(&mut self, block: BlockId, listener: Arc<dyn SyncListener>) {
        let sink = self.sink.clone();
        self.groups
            .entry(block)
            .or_insert_with(|| SyncGroup::new(block, sink))
            .add_listener(listener);
    }

    pub fn remove_listener(&mut self, block: BlockId, listener: &Arc<dyn SyncListener>) {
        let now_empty = match self.groups.get_mut(&block) {
            Some(group) => {
                group.remove_listener(listener);
                group.is_empty()
            }
            None => return,
        };
        if now_empty {
            self.groups.remove(&block);
            log::debug!("Sync group for {} removed", block);
        }
    }

    /// Returns the number of listeners that handled the event. The value is
    /// kept for views that join the block later, even if nobody listens yet.
    pub fn publish(&mut self, block: BlockId, property: SyncProperty) -> usize {
        let sink = self.sink.clone();
        self.groups
            .entry(block)
            .or_insert_with(|| SyncGroup::new(block, sink))
            .publish(property)
    }

    pub fn remove_group(&mut self, block: BlockId) -> bool {
        let removed = self.groups.remove(&block).is_some();
        if removed {
            log::debug!("Sync group for {} removed", block);
        }
        removed
    }

    pub fn property(&self, block: BlockId, id: PropertyId) -> Option<&SyncProperty> {
        self.groups.get(&block)?.property(id)
    }

    pub fn group(&self, block: BlockId) -> Option<&SyncGroup> {
        self.groups.get(&block)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }
}

impl Default for SyncService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Address;
    use crate::sync::SyncEvent;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter(AtomicUsize);

    impl SyncListener for Counter {
        fn property_changed(&self, _event: &SyncEvent) -> anyhow::Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_groups_are_isolated() {
        let mut service = SyncService::new();
        let a = BlockId::next();
        let b = BlockId::next();
        let on_a = Arc::new(Counter::default());
        let on_b = Arc::new(Counter::default());
        service.add_listener(a, on_a.clone());
        service.add_listener(b, on_b.clone());

        assert_eq!(service.publish(a, SyncProperty::ColumnSize(4)), 1);
        assert_eq!(on_a.0.load(Ordering::SeqCst), 1);
        assert_eq!(on_b.0.load(Ordering::SeqCst), 0);
        assert_eq!(service.publish(BlockId::next(), SyncProperty::ColumnSize(4)), 0);
    }

    #[test]
    fn test_publish_before_any_listener_is_kept() {
        let mut service = SyncService::new();
        let block = BlockId::next();
        assert_eq!(service.publish(block, SyncProperty::ColumnSize(8)), 0);
        assert_eq!(service.property(block, PropertyId::ColumnSize), Some(&SyncProperty::ColumnSize(8)));

        assert!(service.remove_group(block));
        assert!(service.property(block, PropertyId::ColumnSize).is_none());
        assert!(!service.remove_group(block));
    }

    #[test]
    fn test_group_dropped_with_last_listener() {
        let mut service = SyncService::new();
        let block = BlockId::next();
        let listener: Arc<dyn SyncListener> = Arc::new(Counter::default());
        service.add_listener(block, listener.clone());
        service.publish(block, SyncProperty::SelectedAddress(Address::from(8)));
        assert_eq!(
            service.property(block, PropertyId::SelectedAddress),
            Some(&SyncProperty::SelectedAddress(Address::from(8)))
        );

        service.remove_listener(block, &listener);
        assert_eq!(service.group_count(), 0);
        assert!(service.property(block, PropertyId::SelectedAddress).is_none());
        service.remove_listener(block, &listener);
    }
}
