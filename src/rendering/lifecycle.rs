// Sun Oct 18 2026 - Alex

use crate::memory::BlockId;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleKind {
    Added,
    Removed,
}

impl fmt::Display for LifecycleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "rendering-added"),
            Self::Removed => write!(f, "rendering-removed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderingEvent {
    pub kind: LifecycleKind,
    pub block: BlockId,
    pub rendering_id: String,
}

/// Told when a rendering is opened or closed in a context.
pub trait RenderingListener: Send + Sync {
    fn rendering_changed(&self, event: &RenderingEvent) -> anyhow::Result<()>;
}
