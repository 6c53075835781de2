//! Batched deltas reported by the interaction layer.
//!
//! A drag, a marquee selection or a multi-delete arrives as a list of changes
//! that the store applies in one step (see [`crate::FlowStore::apply_node_changes`]).

use crate::geometry::{Position, Size};
use crate::id_generator::{EdgeId, ScreenId};

#[derive(Debug, Clone, PartialEq)]
pub enum NodeChange {
    /// Screen dragged to a new position
    Position { id: ScreenId, position: Position },

    /// Screen resized by the renderer
    Dimensions { id: ScreenId, size: Size },

    /// Multi-select highlight toggled
    Select { id: ScreenId, selected: bool },

    /// Screen removed (edges and selection cascade)
    Remove { id: ScreenId },
}

impl NodeChange {
    pub fn id(&self) -> &ScreenId {
        match self {
            NodeChange::Position { id, .. }
            | NodeChange::Dimensions { id, .. }
            | NodeChange::Select { id, .. }
            | NodeChange::Remove { id } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeChange {
    Select { id: EdgeId, selected: bool },
    Remove { id: EdgeId },
}

impl EdgeChange {
    pub fn id(&self) -> &EdgeId {
        match self {
            EdgeChange::Select { id, .. } | EdgeChange::Remove { id } => id,
        }
    }
}
