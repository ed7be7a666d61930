// Sat Oct 17 2026 - Alex

use crate::memory::BlockId;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    pub block: BlockId,
    pub topic: String,
    pub listener_index: usize,
    pub message: String,
    pub panicked: bool,
}

impl fmt::Display for ListenerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.panicked { "panicked" } else { "failed" };
        write!(
            f,
            "listener #{} for {} on {} {}: {}",
            self.listener_index, self.topic, self.block, kind, self.message
        )
    }
}

pub trait DiagnosticSink: Send + Sync {
    fn report(&self, failure: &ListenerFailure);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, failure: &ListenerFailure) {
        log::error!("Notification {}", failure);
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Runs one listener callback. An error or a panic comes back as
/// `Err((message, panicked))` instead of reaching the caller.
pub fn isolate<F>(callback: F) -> Result<(), (String, bool)>
where
    F: FnOnce() -> anyhow::Result<()>,
{
    match panic::catch_unwind(AssertUnwindSafe(callback)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err((format!("{:#}", e), false)),
        Err(payload) => Err((panic_message(payload.as_ref()), true)),
    }
}
