use crate::id_generator::{ComponentId, ScreenId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pan and zoom of the canvas, independent of graph content
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Viewport {
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }

    /// Finite offsets and a finite, positive zoom
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.zoom.is_finite() && self.zoom > 0.0
    }
}

/// Interaction mode gating pointer behaviour in the renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Pan,
    Connect,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Select, Tool::Pan, Tool::Connect];

    /// Keyboard shortcut hint shown in toolbars
    pub fn shortcut(&self) -> char {
        match self {
            Tool::Select => 'V',
            Tool::Pan => 'H',
            Tool::Connect => 'C',
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tool::Select => "select",
            Tool::Pan => "pan",
            Tool::Connect => "connect",
        };
        f.write_str(name)
    }
}

/// The single selected entity: a screen, or a component inside one
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selection {
    Screen(ScreenId),
    Component {
        screen_id: ScreenId,
        component_id: ComponentId,
    },
}

impl Selection {
    /// Screen that owns the selected entity
    pub fn screen_id(&self) -> &ScreenId {
        match self {
            Selection::Screen(id) => id,
            Selection::Component { screen_id, .. } => screen_id,
        }
    }

    /// True for the screen itself and for any component inside it
    pub fn belongs_to(&self, screen_id: &ScreenId) -> bool {
        self.screen_id() == screen_id
    }

    pub fn is_component(&self, screen_id: &ScreenId, component_id: &ComponentId) -> bool {
        matches!(
            self,
            Selection::Component { screen_id: s, component_id: c } if s == screen_id && c == component_id
        )
    }

    /// Composite key used by renderers, `"<screen>"` or `"<screen>/<component>"`
    pub fn key(&self) -> String {
        match self {
            Selection::Screen(id) => id.to_string(),
            Selection::Component {
                screen_id,
                component_id,
            } => format!("{}/{}", screen_id, component_id),
        }
    }
}
