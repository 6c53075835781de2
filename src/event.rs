use crate::catalog::{ComponentKind, ScreenKind};
use crate::id_generator::{ComponentId, EdgeId, ScreenId};
use crate::view::{Selection, Tool, Viewport};
use chrono::{DateTime, Utc};

/// A change notification with timestamp, delivered to subscribers
#[derive(Debug, Clone, PartialEq)]
pub struct FlowEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: EventKind,
}

impl FlowEvent {
    /// Create a new event with the current timestamp
    pub fn new(kind: EventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }

    /// Create a new event with a specific timestamp
    pub fn with_timestamp(timestamp: DateTime<Utc>, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }
}

/// What changed in the store
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    ScreenAdded {
        id: ScreenId,
        kind: ScreenKind,
    },

    ScreenDeleted {
        id: ScreenId,
        removed_edges: Vec<EdgeId>,
    },

    ScreenDuplicated {
        original: ScreenId,
        copy: ScreenId,
    },

    ScreenUpdated {
        id: ScreenId,
    },

    ScreenMoved {
        id: ScreenId,
    },

    ComponentAdded {
        screen_id: ScreenId,
        component_id: ComponentId,
        kind: ComponentKind,
    },

    ComponentDeleted {
        screen_id: ScreenId,
        component_id: ComponentId,
    },

    ComponentUpdated {
        screen_id: ScreenId,
        component_id: ComponentId,
    },

    ComponentMoved {
        screen_id: ScreenId,
        component_id: ComponentId,
    },

    ComponentsReordered {
        screen_id: ScreenId,
        from_index: usize,
        to_index: usize,
    },

    EdgeCreated {
        id: EdgeId,
        source: ScreenId,
        target: ScreenId,
    },

    /// A batch of node or edge deltas was applied
    BatchApplied {
        changed_screens: Vec<ScreenId>,
        changed_edges: Vec<EdgeId>,
    },

    SelectionChanged {
        selection: Option<Selection>,
        screen_id: Option<ScreenId>,
    },

    ToolChanged {
        tool: Tool,
    },

    ViewportChanged {
        viewport: Viewport,
    },

    DarkModeToggled {
        enabled: bool,
    },

    FlowCleared,

    FlowImported {
        screens: usize,
        edges: usize,
    },
}

/// Handle returned by [`crate::FlowStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

pub(crate) type Listener = Box<dyn FnMut(&FlowEvent)>;
