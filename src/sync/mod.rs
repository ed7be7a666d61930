// Sat Oct 17 2026 - Alex

pub mod bus;
pub mod property;
pub mod service;
pub mod sink;

pub use bus::{SyncGroup, SyncListener};
pub use property::{PropertyId, SyncEvent, SyncProperty};
pub use service::SyncService;
pub use sink::{isolate, DiagnosticSink, ListenerFailure, LogSink};
