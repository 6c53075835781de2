use crate::catalog::{component_defaults, screen_defaults, ComponentKind, Properties, ScreenKind};
use crate::geometry::{Position, Size};
use crate::id_generator::{ComponentId, ScreenId};

/// A screen node in the flow, owning an ordered list of components
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Screen {
    /// Unique identifier, fixed at creation
    pub id: ScreenId,

    pub kind: ScreenKind,

    /// Top-left corner on the canvas
    pub position: Position,

    pub label: String,
    pub description: Option<String>,

    /// Height is derived from the component count when components change
    pub size: Size,

    /// Components in display order
    pub components: Vec<Component>,

    /// UI highlight used by multi-select
    pub selected: bool,
}

impl Screen {
    /// Build a screen from catalog defaults
    pub(crate) fn from_catalog(kind: ScreenKind, position: Position, size: Size) -> Self {
        let defaults = screen_defaults(kind);
        Self {
            id: ScreenId::generate(),
            kind,
            position,
            label: defaults.label.to_string(),
            description: Some(defaults.description.to_string()),
            size,
            components: Vec::new(),
            selected: false,
        }
    }

    /// Rebuild a screen from decoded document fields
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: ScreenId,
        kind: ScreenKind,
        position: Position,
        label: String,
        description: Option<String>,
        size: Size,
        components: Vec<Component>,
        selected: bool,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            label,
            description,
            size,
            components,
            selected,
        }
    }

    /// Find a component by id
    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| &c.id == id)
    }

    /// Index of a component in display order
    pub fn component_index(&self, id: &ComponentId) -> Option<usize> {
        self.components.iter().position(|c| &c.id == id)
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub(crate) fn component_mut(&mut self, id: &ComponentId) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| &c.id == id)
    }

    pub(crate) fn apply_patch(&mut self, patch: ScreenPatch) {
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
    }

    /// Deep copy under a new id; copied components get fresh ids too
    pub(crate) fn duplicate(&self, offset: Position) -> Self {
        let mut copy = self.clone();
        copy.id = ScreenId::generate();
        copy.position = self.position.offset(offset.x, offset.y);
        copy.selected = false;
        for component in &mut copy.components {
            component.id = ComponentId::generate();
        }
        copy
    }
}

/// A UI or logic element owned by exactly one screen
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Component {
    /// Stable identifier, independent of the component's index
    pub id: ComponentId,

    pub kind: ComponentKind,

    pub label: String,

    /// User override of `label`
    pub name: Option<String>,

    pub description: Option<String>,

    /// Kind-specific settings
    pub properties: Properties,

    /// Reserved for free-form layout; list layout ignores it
    pub position: Position,
}

impl Component {
    /// Build a component from catalog defaults
    pub(crate) fn from_catalog(kind: ComponentKind, position: Position) -> Self {
        let defaults = component_defaults(kind);
        Self {
            id: ComponentId::generate(),
            kind,
            label: defaults.label.to_string(),
            name: None,
            description: Some(defaults.description.to_string()),
            properties: defaults.initial_properties,
            position,
        }
    }

    pub(crate) fn from_parts(
        id: ComponentId,
        kind: ComponentKind,
        label: String,
        name: Option<String>,
        description: Option<String>,
        properties: Properties,
        position: Position,
    ) -> Self {
        Self {
            id,
            kind,
            label,
            name,
            description,
            properties,
            position,
        }
    }

    /// User-chosen name if one is set, else the label
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.label)
    }

    pub(crate) fn apply_patch(&mut self, patch: ComponentPatch) {
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(properties) = patch.properties {
            self.properties = properties;
        }
    }
}

/// Partial update for a screen's editable fields
///
/// `None` leaves a field untouched. For optional fields the inner `None`
/// clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenPatch {
    pub label: Option<String>,
    pub description: Option<Option<String>>,
    pub size: Option<Size>,
}

impl ScreenPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.description.is_none() && self.size.is_none()
    }
}

/// Partial update for a component's editable fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentPatch {
    pub label: Option<String>,
    pub name: Option<Option<String>>,
    pub description: Option<Option<String>>,
    /// Replaces the whole property map
    pub properties: Option<Properties>,
}

impl ComponentPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(Some(name.into())),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.properties.is_none()
    }
}
