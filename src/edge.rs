use crate::id_generator::{EdgeId, ScreenId};
use serde_json::{json, Map, Value};

/// Stroke styling attached to an edge, passed through to renderers untouched
pub type EdgeStyle = Map<String, Value>;

/// Directed navigation edge between two screens
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Edge {
    pub id: EdgeId,

    /// Screen the navigation starts FROM
    pub source: ScreenId,

    /// Screen the navigation leads TO
    pub target: ScreenId,

    pub source_handle: Option<String>,
    pub target_handle: Option<String>,

    pub animated: Option<bool>,
    pub style: Option<EdgeStyle>,

    /// UI highlight used by multi-select
    pub selected: bool,
}

impl Edge {
    pub(crate) fn connect(source: ScreenId, target: ScreenId, options: ConnectOptions) -> Self {
        Self {
            id: EdgeId::generate(),
            source,
            target,
            source_handle: options.source_handle,
            target_handle: options.target_handle,
            animated: Some(options.animated),
            style: Some(options.style),
            selected: false,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: EdgeId,
        source: ScreenId,
        target: ScreenId,
        source_handle: Option<String>,
        target_handle: Option<String>,
        animated: Option<bool>,
        style: Option<EdgeStyle>,
        selected: bool,
    ) -> Self {
        Self {
            id,
            source,
            target,
            source_handle,
            target_handle,
            animated,
            style,
            selected,
        }
    }

    /// Check if this edge touches a given screen
    pub fn involves(&self, screen_id: &ScreenId) -> bool {
        &self.source == screen_id || &self.target == screen_id
    }

    pub fn starts_from(&self, screen_id: &ScreenId) -> bool {
        &self.source == screen_id
    }

    pub fn ends_at(&self, screen_id: &ScreenId) -> bool {
        &self.target == screen_id
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Same endpoints in the same direction, ignoring handles and styling
    pub fn is_parallel_to(&self, other: &Edge) -> bool {
        self.source == other.source && self.target == other.target
    }
}

/// Styling and handle overrides for [`crate::FlowStore::connect`]
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectOptions {
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
    pub animated: bool,
    pub style: EdgeStyle,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            source_handle: None,
            target_handle: None,
            animated: true,
            style: default_edge_style(),
        }
    }
}

/// `{"strokeWidth": 2}`
pub fn default_edge_style() -> EdgeStyle {
    let mut style = EdgeStyle::new();
    style.insert("strokeWidth".to_string(), json!(2));
    style
}
