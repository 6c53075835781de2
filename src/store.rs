use crate::catalog::{ComponentKind, ScreenKind};
use crate::changes::{EdgeChange, NodeChange};
use crate::config::FlowConfig;
use crate::edge::{ConnectOptions, Edge};
use crate::event::{EventKind, FlowEvent, Listener, SubscriptionId};
use crate::geometry::Position;
use crate::id_generator::{ComponentId, EdgeId, ScreenId};
use crate::screen::{Component, ComponentPatch, Screen, ScreenPatch};
use crate::view::{Selection, Tool, Viewport};
use std::fmt;

const TARGET: &str = "flow_designer::store";

/// Owner of all editable flow state
///
/// Every structural change goes through one of the methods below. Readers get
/// shared references only. Lookups of unknown ids are no-ops: mutators return
/// `false` (or `None`) and leave the state untouched.
pub struct FlowStore {
    config: FlowConfig,

    /// Screens in insertion order
    screens: Vec<Screen>,

    /// Navigation edges in insertion order
    edges: Vec<Edge>,

    viewport: Viewport,
    selected_tool: Tool,
    selection: Option<Selection>,

    /// Screen whose components are being edited
    selected_screen_id: Option<ScreenId>,

    dark_mode: bool,

    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl FlowStore {
    /// Create an empty store with default settings
    pub fn new() -> Self {
        Self::with_config(FlowConfig::default())
    }

    pub fn with_config(config: FlowConfig) -> Self {
        Self {
            viewport: config.initial_viewport,
            dark_mode: config.dark_mode,
            config,
            screens: Vec::new(),
            edges: Vec::new(),
            selected_tool: Tool::default(),
            selection: None,
            selected_screen_id: None,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    // ========== Read Access ==========

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    pub fn screen(&self, id: &ScreenId) -> Option<&Screen> {
        self.screens.iter().find(|s| &s.id == id)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| &e.id == id)
    }

    /// Edges leaving a screen
    pub fn outgoing_edges(&self, id: &ScreenId) -> Vec<&Edge> {
        self.edges.iter().filter(|e| e.starts_from(id)).collect()
    }

    /// Edges arriving at a screen
    pub fn incoming_edges(&self, id: &ScreenId) -> Vec<&Edge> {
        self.edges.iter().filter(|e| e.ends_at(id)).collect()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn selected_tool(&self) -> Tool {
        self.selected_tool
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn selected_screen_id(&self) -> Option<&ScreenId> {
        self.selected_screen_id.as_ref()
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn screen_count(&self) -> usize {
        self.screens.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ========== Subscriptions ==========

    /// Register a listener called after every state-changing operation
    pub fn subscribe(&mut self, listener: impl FnMut(&FlowEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, kind: EventKind) {
        if self.listeners.is_empty() {
            return;
        }
        let event = FlowEvent::new(kind);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    // ========== Screen Operations ==========

    /// Add a screen built from catalog defaults and select it
    ///
    /// A non-finite position is replaced by the origin.
    pub fn add_screen(&mut self, kind: ScreenKind, position: Position) -> ScreenId {
        let position = if position.is_finite() {
            position
        } else {
            warn_non_finite("add_screen", position.x, position.y);
            Position::default()
        };
        let screen = Screen::from_catalog(kind, position, self.config.default_screen_size);
        let id = screen.id.clone();

        self.screens.push(screen);
        self.selection = Some(Selection::Screen(id.clone()));

        tracing::debug!(target: TARGET, screen_id = %id, kind = %kind, "Added screen");
        self.emit(EventKind::ScreenAdded {
            id: id.clone(),
            kind,
        });

        id
    }

    /// Delete a screen together with every edge touching it
    pub fn delete_screen(&mut self, id: &ScreenId) -> bool {
        let Some(index) = self.screen_index(id) else {
            tracing::trace!(target: TARGET, screen_id = %id, "Delete of unknown screen ignored");
            return false;
        };

        self.screens.remove(index);
        let removed_edges = self.remove_edges_touching(std::slice::from_ref(id));
        self.clear_selection_for_screen(id);

        tracing::debug!(
            target: TARGET,
            screen_id = %id,
            removed_edges = removed_edges.len(),
            "Deleted screen"
        );
        self.emit(EventKind::ScreenDeleted {
            id: id.clone(),
            removed_edges,
        });

        true
    }

    /// Deep-copy a screen, offset it, and select the copy
    pub fn duplicate_screen(&mut self, id: &ScreenId) -> Option<ScreenId> {
        let Some(original) = self.screen(id) else {
            tracing::trace!(target: TARGET, screen_id = %id, "Duplicate of unknown screen ignored");
            return None;
        };

        let copy = original.duplicate(self.config.duplicate_offset);
        let copy_id = copy.id.clone();

        self.screens.push(copy);
        self.selection = Some(Selection::Screen(copy_id.clone()));

        tracing::debug!(target: TARGET, screen_id = %id, copy_id = %copy_id, "Duplicated screen");
        self.emit(EventKind::ScreenDuplicated {
            original: id.clone(),
            copy: copy_id.clone(),
        });

        Some(copy_id)
    }

    /// Merge the given fields into a screen
    pub fn update_screen_data(&mut self, id: &ScreenId, patch: ScreenPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        if let Some(size) = patch.size.filter(|size| !size.is_finite()) {
            warn_non_finite("update_screen_data", size.width, size.height);
            return false;
        }
        let Some(screen) = find_screen_mut(&mut self.screens, id) else {
            tracing::trace!(target: TARGET, screen_id = %id, "Update of unknown screen ignored");
            return false;
        };

        screen.apply_patch(patch);

        tracing::debug!(target: TARGET, screen_id = %id, "Updated screen");
        self.emit(EventKind::ScreenUpdated { id: id.clone() });

        true
    }

    /// Move a single screen on the canvas
    pub fn move_screen(&mut self, id: &ScreenId, position: Position) -> bool {
        if !position.is_finite() {
            warn_non_finite("move_screen", position.x, position.y);
            return false;
        }
        let Some(screen) = find_screen_mut(&mut self.screens, id) else {
            return false;
        };

        screen.position = position;
        self.emit(EventKind::ScreenMoved { id: id.clone() });

        true
    }

    // ========== Component Operations ==========

    /// Append a component built from catalog defaults and grow the screen
    pub fn add_component_to_screen(
        &mut self,
        screen_id: &ScreenId,
        kind: ComponentKind,
        position: Position,
    ) -> Option<ComponentId> {
        if !position.is_finite() {
            warn_non_finite("add_component_to_screen", position.x, position.y);
            return None;
        }
        let Some(screen) = find_screen_mut(&mut self.screens, screen_id) else {
            tracing::trace!(target: TARGET, screen_id = %screen_id, "Component add on unknown screen ignored");
            return None;
        };

        let component = Component::from_catalog(kind, position);
        let component_id = component.id.clone();
        screen.components.push(component);
        screen.size.height = self.config.screen_height_for(screen.components.len());

        tracing::debug!(
            target: TARGET,
            screen_id = %screen_id,
            component_id = %component_id,
            kind = %kind,
            "Added component"
        );
        self.emit(EventKind::ComponentAdded {
            screen_id: screen_id.clone(),
            component_id: component_id.clone(),
            kind,
        });

        Some(component_id)
    }

    /// Remove a component and shrink the screen
    pub fn delete_component_from_screen(
        &mut self,
        screen_id: &ScreenId,
        component_id: &ComponentId,
    ) -> bool {
        let Some(screen) = find_screen_mut(&mut self.screens, screen_id) else {
            return false;
        };
        let Some(index) = screen.component_index(component_id) else {
            tracing::trace!(target: TARGET, component_id = %component_id, "Delete of unknown component ignored");
            return false;
        };

        screen.components.remove(index);
        screen.size.height = self.config.screen_height_for(screen.components.len());

        if self
            .selection
            .as_ref()
            .is_some_and(|s| s.is_component(screen_id, component_id))
        {
            self.selection = None;
        }

        tracing::debug!(
            target: TARGET,
            screen_id = %screen_id,
            component_id = %component_id,
            "Deleted component"
        );
        self.emit(EventKind::ComponentDeleted {
            screen_id: screen_id.clone(),
            component_id: component_id.clone(),
        });

        true
    }

    /// Merge the given fields into a component
    pub fn update_component_in_screen(
        &mut self,
        screen_id: &ScreenId,
        component_id: &ComponentId,
        patch: ComponentPatch,
    ) -> bool {
        if patch.is_empty() {
            return false;
        }
        let Some(component) = find_screen_mut(&mut self.screens, screen_id)
            .and_then(|screen| screen.component_mut(component_id))
        else {
            return false;
        };

        component.apply_patch(patch);

        tracing::debug!(target: TARGET, component_id = %component_id, "Updated component");
        self.emit(EventKind::ComponentUpdated {
            screen_id: screen_id.clone(),
            component_id: component_id.clone(),
        });

        true
    }

    /// Overwrite a component's stored position; order and height are unaffected
    pub fn move_component_in_screen(
        &mut self,
        screen_id: &ScreenId,
        component_id: &ComponentId,
        position: Position,
    ) -> bool {
        if !position.is_finite() {
            warn_non_finite("move_component_in_screen", position.x, position.y);
            return false;
        }
        let Some(component) = find_screen_mut(&mut self.screens, screen_id)
            .and_then(|screen| screen.component_mut(component_id))
        else {
            return false;
        };

        component.position = position;
        self.emit(EventKind::ComponentMoved {
            screen_id: screen_id.clone(),
            component_id: component_id.clone(),
        });

        true
    }

    /// Move the component at `from_index` so it ends up at `to_index`
    ///
    /// An out-of-range `from_index` is ignored and `to_index` is clamped to the
    /// last position. Equal indices leave the sequence untouched.
    pub fn reorder_component_in_screen(
        &mut self,
        screen_id: &ScreenId,
        from_index: usize,
        to_index: usize,
    ) -> bool {
        let Some(screen) = find_screen_mut(&mut self.screens, screen_id) else {
            return false;
        };
        let len = screen.components.len();
        if from_index >= len {
            tracing::trace!(target: TARGET, from_index, len, "Reorder from out-of-range index ignored");
            return false;
        }
        let to_index = to_index.min(len - 1);
        if from_index == to_index {
            return false;
        }

        let moved = screen.components.remove(from_index);
        screen.components.insert(to_index, moved);

        tracing::debug!(target: TARGET, screen_id = %screen_id, from_index, to_index, "Reordered components");
        self.emit(EventKind::ComponentsReordered {
            screen_id: screen_id.clone(),
            from_index,
            to_index,
        });

        true
    }

    /// Swap a component with the one above it; the first one stays put
    pub fn move_component_up(&mut self, screen_id: &ScreenId, index: usize) -> bool {
        if index == 0 {
            return false;
        }
        self.reorder_component_in_screen(screen_id, index, index - 1)
    }

    /// Swap a component with the one below it; the last one stays put
    pub fn move_component_down(&mut self, screen_id: &ScreenId, index: usize) -> bool {
        let Some(screen) = self.screen(screen_id) else {
            return false;
        };
        if index.saturating_add(1) >= screen.components.len() {
            return false;
        }
        self.reorder_component_in_screen(screen_id, index, index + 1)
    }

    // ========== Edge Operations ==========

    /// Connect two screens with default animated styling
    pub fn connect(&mut self, source: &ScreenId, target: &ScreenId) -> Option<EdgeId> {
        self.connect_with(source, target, ConnectOptions::default())
    }

    /// Connect two screens
    ///
    /// Both endpoints must exist. Parallel edges and self-loops are accepted.
    pub fn connect_with(
        &mut self,
        source: &ScreenId,
        target: &ScreenId,
        options: ConnectOptions,
    ) -> Option<EdgeId> {
        if self.screen(source).is_none() || self.screen(target).is_none() {
            tracing::trace!(
                target: TARGET,
                source = %source,
                target_screen = %target,
                "Connect with unknown endpoint ignored"
            );
            return None;
        }

        let edge = Edge::connect(source.clone(), target.clone(), options);
        let id = edge.id.clone();
        self.edges.push(edge);

        tracing::debug!(target: TARGET, edge_id = %id, source = %source, target_screen = %target, "Connected screens");
        self.emit(EventKind::EdgeCreated {
            id: id.clone(),
            source: source.clone(),
            target: target.clone(),
        });

        Some(id)
    }

    // ========== Batched Deltas ==========

    /// Apply a batch of node deltas from the interaction layer
    ///
    /// Removals cascade to edges and selection like [`FlowStore::delete_screen`].
    /// Changes naming unknown screens are skipped.
    pub fn apply_node_changes(&mut self, changes: impl IntoIterator<Item = NodeChange>) -> bool {
        let mut changed: Vec<ScreenId> = Vec::new();
        let mut removed: Vec<ScreenId> = Vec::new();

        for change in changes {
            if let NodeChange::Remove { id } = change {
                if let Some(index) = self.screen_index(&id) {
                    self.screens.remove(index);
                    removed.push(id);
                }
                continue;
            }

            match &change {
                NodeChange::Position { position, .. } if !position.is_finite() => {
                    warn_non_finite("apply_node_changes", position.x, position.y);
                    continue;
                }
                NodeChange::Dimensions { size, .. } if !size.is_finite() => {
                    warn_non_finite("apply_node_changes", size.width, size.height);
                    continue;
                }
                _ => {}
            }
            let Some(screen) = find_screen_mut(&mut self.screens, change.id()) else {
                continue;
            };
            match change {
                NodeChange::Position { position, .. } => screen.position = position,
                NodeChange::Dimensions { size, .. } => screen.size = size,
                NodeChange::Select { selected, .. } => screen.selected = selected,
                NodeChange::Remove { .. } => {}
            }
            if !changed.contains(&screen.id) {
                changed.push(screen.id.clone());
            }
        }

        if changed.is_empty() && removed.is_empty() {
            return false;
        }

        let removed_edges = self.remove_edges_touching(&removed);
        for id in &removed {
            self.clear_selection_for_screen(id);
        }

        for id in removed {
            if !changed.contains(&id) {
                changed.push(id);
            }
        }

        tracing::debug!(
            target: TARGET,
            screens = changed.len(),
            removed_edges = removed_edges.len(),
            "Applied node changes"
        );
        self.emit(EventKind::BatchApplied {
            changed_screens: changed,
            changed_edges: removed_edges,
        });

        true
    }

    /// Apply a batch of edge deltas from the interaction layer
    pub fn apply_edge_changes(&mut self, changes: impl IntoIterator<Item = EdgeChange>) -> bool {
        let mut changed: Vec<EdgeId> = Vec::new();

        for change in changes {
            match change {
                EdgeChange::Select { id, selected } => {
                    if let Some(edge) = self.edges.iter_mut().find(|e| e.id == id) {
                        edge.selected = selected;
                        if !changed.contains(&id) {
                            changed.push(id);
                        }
                    }
                }
                EdgeChange::Remove { id } => {
                    let before = self.edges.len();
                    self.edges.retain(|e| e.id != id);
                    if self.edges.len() != before {
                        changed.push(id);
                    }
                }
            }
        }

        if changed.is_empty() {
            return false;
        }

        tracing::debug!(target: TARGET, edges = changed.len(), "Applied edge changes");
        self.emit(EventKind::BatchApplied {
            changed_screens: Vec::new(),
            changed_edges: changed,
        });

        true
    }

    // ========== View State ==========

    pub fn set_selected_tool(&mut self, tool: Tool) {
        if self.selected_tool == tool {
            return;
        }
        self.selected_tool = tool;
        self.emit(EventKind::ToolChanged { tool });
    }

    /// Select a screen or component; selections naming missing entities are ignored
    pub fn set_selected_node_id(&mut self, selection: Option<Selection>) -> bool {
        if let Some(target) = &selection {
            if !self.resolves(target) {
                tracing::trace!(target: TARGET, selection = %target.key(), "Selection of unknown entity ignored");
                return false;
            }
        }
        if self.selection == selection {
            return false;
        }
        self.selection = selection;
        self.emit_selection();
        true
    }

    /// Choose the screen whose components are being edited
    pub fn set_selected_screen_id(&mut self, screen_id: Option<ScreenId>) -> bool {
        if let Some(id) = &screen_id {
            if self.screen(id).is_none() {
                return false;
            }
        }
        if self.selected_screen_id == screen_id {
            return false;
        }
        self.selected_screen_id = screen_id;
        self.emit_selection();
        true
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        let enabled = self.dark_mode;
        self.emit(EventKind::DarkModeToggled { enabled });
    }

    /// Overwrite the viewport; non-finite values or a non-positive zoom are rejected
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        if !viewport.is_valid() {
            tracing::warn!(
                target: TARGET,
                x = viewport.x,
                y = viewport.y,
                zoom = viewport.zoom,
                "Rejected invalid viewport"
            );
            return false;
        }
        self.viewport = viewport;
        self.emit(EventKind::ViewportChanged { viewport });
        true
    }

    pub fn reset_viewport(&mut self) {
        let viewport = self.config.initial_viewport;
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.emit(EventKind::ViewportChanged { viewport });
    }

    // ========== Whole-Flow Operations ==========

    /// Drop every screen and edge and return to the initial view
    pub fn clear_flow(&mut self) {
        let pristine = self.screens.is_empty()
            && self.edges.is_empty()
            && self.selection.is_none()
            && self.selected_screen_id.is_none()
            && self.viewport == self.config.initial_viewport;
        if pristine {
            return;
        }

        self.screens.clear();
        self.edges.clear();
        self.selection = None;
        self.selected_screen_id = None;
        self.viewport = self.config.initial_viewport;

        tracing::debug!(target: TARGET, "Cleared flow");
        self.emit(EventKind::FlowCleared);
    }

    /// Swap in a decoded graph in one step and clear selection
    pub(crate) fn replace_graph(&mut self, screens: Vec<Screen>, edges: Vec<Edge>, viewport: Viewport) {
        self.screens = screens;
        self.edges = edges;
        self.viewport = viewport;
        self.selection = None;
        self.selected_screen_id = None;

        let (screens, edges) = (self.screens.len(), self.edges.len());
        tracing::debug!(target: TARGET, screens, edges, "Replaced flow");
        self.emit(EventKind::FlowImported { screens, edges });
    }

    // ========== Helpers ==========

    fn screen_index(&self, id: &ScreenId) -> Option<usize> {
        self.screens.iter().position(|s| &s.id == id)
    }

    fn resolves(&self, selection: &Selection) -> bool {
        match selection {
            Selection::Screen(id) => self.screen(id).is_some(),
            Selection::Component {
                screen_id,
                component_id,
            } => self
                .screen(screen_id)
                .is_some_and(|s| s.component(component_id).is_some()),
        }
    }

    fn remove_edges_touching(&mut self, screen_ids: &[ScreenId]) -> Vec<EdgeId> {
        if screen_ids.is_empty() {
            return Vec::new();
        }
        let mut removed = Vec::new();
        self.edges.retain(|edge| {
            let touches = screen_ids.iter().any(|id| edge.involves(id));
            if touches {
                removed.push(edge.id.clone());
            }
            !touches
        });
        removed
    }

    fn clear_selection_for_screen(&mut self, id: &ScreenId) {
        if self.selection.as_ref().is_some_and(|s| s.belongs_to(id)) {
            self.selection = None;
        }
        if self.selected_screen_id.as_ref() == Some(id) {
            self.selected_screen_id = None;
        }
    }

    fn emit_selection(&mut self) {
        let kind = EventKind::SelectionChanged {
            selection: self.selection.clone(),
            screen_id: self.selected_screen_id.clone(),
        };
        self.emit(kind);
    }
}

fn find_screen_mut<'a>(screens: &'a mut [Screen], id: &ScreenId) -> Option<&'a mut Screen> {
    screens.iter_mut().find(|s| &s.id == id)
}

fn warn_non_finite(operation: &'static str, first: f64, second: f64) {
    tracing::warn!(target: TARGET, operation, first, second, "Rejected non-finite geometry");
}

impl Default for FlowStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FlowStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowStore")
            .field("screens", &self.screens)
            .field("edges", &self.edges)
            .field("viewport", &self.viewport)
            .field("selected_tool", &self.selected_tool)
            .field("selection", &self.selection)
            .field("selected_screen_id", &self.selected_screen_id)
            .field("dark_mode", &self.dark_mode)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store_with_screen() -> (FlowStore, ScreenId) {
        let mut store = FlowStore::new();
        let id = store.add_screen(ScreenKind::LoginScreen, Position::new(100.0, 100.0));
        (store, id)
    }

    fn component_ids(store: &FlowStore, id: &ScreenId) -> Vec<ComponentId> {
        store
            .screen(id)
            .unwrap()
            .components
            .iter()
            .map(|c| c.id.clone())
            .collect()
    }

    #[test]
    fn test_store_creation() {
        let store = FlowStore::new();
        assert_eq!(store.screen_count(), 0);
        assert_eq!(store.edge_count(), 0);
        assert_eq!(store.viewport(), Viewport::new(0.0, 0.0, 0.8));
        assert_eq!(store.selected_tool(), Tool::Select);
        assert!(store.selection().is_none());
        assert!(store.is_dark_mode());
    }

    #[test]
    fn test_add_screen() {
        let (store, id) = store_with_screen();

        let screen = store.screen(&id).unwrap();
        assert_eq!(screen.kind, ScreenKind::LoginScreen);
        assert_eq!(screen.label, "Login Screen");
        assert_eq!(screen.position, Position::new(100.0, 100.0));
        assert_eq!(screen.size, Size::new(400.0, 300.0));
        assert!(screen.components.is_empty());
        assert_eq!(store.selection(), Some(&Selection::Screen(id)));
    }

    #[test]
    fn test_delete_screen_cascades() {
        let mut store = FlowStore::new();
        let a = store.add_screen(ScreenKind::LoginScreen, Position::default());
        let b = store.add_screen(ScreenKind::DashboardScreen, Position::default());
        let c = store.add_screen(ScreenKind::SettingsScreen, Position::default());

        store.connect(&a, &b).unwrap();
        store.connect(&b, &c).unwrap();
        let keep = store.connect(&a, &c).unwrap();
        store.connect(&b, &b).unwrap();

        assert!(store.delete_screen(&b));
        assert_eq!(store.screen_count(), 2);
        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.edges()[0].id, keep);
    }

    #[test]
    fn test_delete_unknown_screen_is_noop() {
        let (mut store, id) = store_with_screen();
        let other = store.add_screen(ScreenKind::FormScreen, Position::default());
        store.connect(&id, &other).unwrap();

        let screens = store.screens().to_vec();
        let edges = store.edges().to_vec();

        assert!(!store.delete_screen(&ScreenId::from("screen_missing")));
        assert_eq!(store.screens(), screens.as_slice());
        assert_eq!(store.edges(), edges.as_slice());
    }

    #[test]
    fn test_delete_selected_screen_clears_selection() {
        let (mut store, id) = store_with_screen();
        let component = store
            .add_component_to_screen(&id, ComponentKind::Input, Position::default())
            .unwrap();
        store.set_selected_screen_id(Some(id.clone()));
        store.set_selected_node_id(Some(Selection::Component {
            screen_id: id.clone(),
            component_id: component,
        }));

        store.delete_screen(&id);
        assert!(store.selection().is_none());
        assert!(store.selected_screen_id().is_none());
    }

    #[test]
    fn test_delete_other_screen_keeps_selection() {
        let (mut store, id) = store_with_screen();
        let other = store.add_screen(ScreenKind::FormScreen, Position::default());
        store.set_selected_node_id(Some(Selection::Screen(id.clone())));

        store.delete_screen(&other);
        assert_eq!(store.selection(), Some(&Selection::Screen(id)));
    }

    #[test]
    fn test_duplicate_screen() {
        let (mut store, id) = store_with_screen();
        store.add_component_to_screen(&id, ComponentKind::Button, Position::default());

        let copy = store.duplicate_screen(&id).unwrap();
        assert_ne!(copy, id);
        assert_eq!(store.screen_count(), 2);
        assert_eq!(store.selection(), Some(&Selection::Screen(copy.clone())));

        let original = store.screen(&id).unwrap().clone();
        let duplicate = store.screen(&copy).unwrap();
        assert_eq!(duplicate.position, original.position.offset(50.0, 50.0));
        assert_eq!(duplicate.label, original.label);
        assert_eq!(duplicate.size, original.size);
        assert_eq!(duplicate.components.len(), 1);

        // Editing the copy's component leaves the original alone
        let copied_component = duplicate.components[0].id.clone();
        store.update_component_in_screen(
            &copy,
            &copied_component,
            ComponentPatch {
                label: Some("Changed".to_string()),
                ..ComponentPatch::default()
            },
        );
        assert_eq!(store.screen(&id).unwrap(), &original);
    }

    #[test]
    fn test_duplicate_unknown_screen() {
        let mut store = FlowStore::new();
        assert_eq!(store.duplicate_screen(&ScreenId::from("nope")), None);
        assert_eq!(store.screen_count(), 0);
    }

    #[test]
    fn test_update_screen_data() {
        let (mut store, id) = store_with_screen();

        assert!(store.update_screen_data(
            &id,
            ScreenPatch {
                description: Some(Some("Sign in".to_string())),
                size: Some(Size::new(480.0, 300.0)),
                ..ScreenPatch::label("Sign-in")
            }
        ));

        let screen = store.screen(&id).unwrap();
        assert_eq!(screen.label, "Sign-in");
        assert_eq!(screen.description.as_deref(), Some("Sign in"));
        assert_eq!(screen.size.width, 480.0);

        assert!(!store.update_screen_data(&ScreenId::from("missing"), ScreenPatch::label("x")));
        assert!(!store.update_screen_data(&id, ScreenPatch::default()));
    }

    #[test]
    fn test_component_height_policy() {
        let (mut store, id) = store_with_screen();

        for expected in [300.0, 300.0, 320.0, 360.0] {
            store.add_component_to_screen(&id, ComponentKind::Button, Position::default());
            assert_eq!(store.screen(&id).unwrap().size.height, expected);
        }
        let screen = store.screen(&id).unwrap();
        assert_eq!(screen.components.len(), 4);
        assert_eq!(screen.size.height, 360.0);

        let ids = component_ids(&store, &id);
        store.delete_component_from_screen(&id, &ids[0]);
        store.delete_component_from_screen(&id, &ids[1]);
        assert_eq!(store.screen(&id).unwrap().size.height, 300.0);
    }

    #[test]
    fn test_add_component_defaults() {
        let (mut store, id) = store_with_screen();
        let cid = store
            .add_component_to_screen(&id, ComponentKind::Table, Position::new(5.0, 6.0))
            .unwrap();

        let component = store.screen(&id).unwrap().component(&cid).unwrap();
        assert_eq!(component.kind, ComponentKind::Table);
        assert_eq!(component.label, "Table");
        assert_eq!(component.position, Position::new(5.0, 6.0));
        assert_eq!(component.properties["sortable"], serde_json::json!(true));

        assert_eq!(
            store.add_component_to_screen(&ScreenId::from("missing"), ComponentKind::Text, Position::default()),
            None
        );
    }

    #[test]
    fn test_component_ids_stable_across_delete() {
        let (mut store, id) = store_with_screen();
        for kind in [ComponentKind::Text, ComponentKind::Input, ComponentKind::Button] {
            store.add_component_to_screen(&id, kind, Position::default());
        }
        let ids = component_ids(&store, &id);

        store.delete_component_from_screen(&id, &ids[0]);
        store.update_component_in_screen(&id, &ids[2], ComponentPatch::name("Submit"));

        let screen = store.screen(&id).unwrap();
        assert_eq!(screen.component(&ids[2]).unwrap().display_name(), "Submit");
        assert_eq!(screen.component(&ids[1]).unwrap().name, None);
        assert!(!store.delete_component_from_screen(&id, &ids[0]));
    }

    #[test]
    fn test_delete_selected_component_clears_selection() {
        let (mut store, id) = store_with_screen();
        let cid = store
            .add_component_to_screen(&id, ComponentKind::Card, Position::default())
            .unwrap();
        assert!(store.set_selected_node_id(Some(Selection::Component {
            screen_id: id.clone(),
            component_id: cid.clone(),
        })));

        store.delete_component_from_screen(&id, &cid);
        assert!(store.selection().is_none());
    }

    #[test]
    fn test_move_component() {
        let (mut store, id) = store_with_screen();
        store.add_component_to_screen(&id, ComponentKind::Image, Position::default());
        let cid = store
            .add_component_to_screen(&id, ComponentKind::Text, Position::default())
            .unwrap();
        let height = store.screen(&id).unwrap().size.height;

        assert!(store.move_component_in_screen(&id, &cid, Position::new(40.0, 80.0)));

        let screen = store.screen(&id).unwrap();
        assert_eq!(screen.component(&cid).unwrap().position, Position::new(40.0, 80.0));
        assert_eq!(screen.component_index(&cid), Some(1));
        assert_eq!(screen.size.height, height);
    }

    #[test]
    fn test_reorder() {
        let (mut store, id) = store_with_screen();
        for _ in 0..3 {
            store.add_component_to_screen(&id, ComponentKind::Button, Position::default());
        }
        let ids = component_ids(&store, &id);

        assert!(store.reorder_component_in_screen(&id, 0, 2));
        assert_eq!(
            component_ids(&store, &id),
            vec![ids[1].clone(), ids[2].clone(), ids[0].clone()]
        );

        let before = store.screens().to_vec();
        assert!(!store.reorder_component_in_screen(&id, 1, 1));
        assert!(!store.reorder_component_in_screen(&id, 3, 0));
        assert_eq!(store.screens(), before.as_slice());

        // Clamped destination
        assert!(store.reorder_component_in_screen(&id, 0, 99));
        assert_eq!(
            component_ids(&store, &id),
            vec![ids[2].clone(), ids[0].clone(), ids[1].clone()]
        );
    }

    #[test]
    fn test_move_up_down_bounds() {
        let (mut store, id) = store_with_screen();
        for _ in 0..3 {
            store.add_component_to_screen(&id, ComponentKind::Radio, Position::default());
        }
        let ids = component_ids(&store, &id);

        assert!(!store.move_component_up(&id, 0));
        assert!(!store.move_component_down(&id, 2));
        assert!(!store.move_component_up(&id, usize::MAX));
        assert!(!store.move_component_down(&id, usize::MAX));
        assert_eq!(component_ids(&store, &id), ids);

        assert!(store.move_component_up(&id, 2));
        assert_eq!(
            component_ids(&store, &id),
            vec![ids[0].clone(), ids[2].clone(), ids[1].clone()]
        );
        assert!(store.move_component_down(&id, 0));
        assert_eq!(
            component_ids(&store, &id),
            vec![ids[2].clone(), ids[0].clone(), ids[1].clone()]
        );
    }

    #[test]
    fn test_connect() {
        let mut store = FlowStore::new();
        let a = store.add_screen(ScreenKind::LoginScreen, Position::default());
        let b = store.add_screen(ScreenKind::DashboardScreen, Position::default());

        let first = store.connect(&a, &b).unwrap();
        let second = store.connect(&a, &b).unwrap();
        let looped = store.connect(&a, &a).unwrap();
        assert_ne!(first, second);
        assert_eq!(store.edge_count(), 3);
        assert!(store.edge(&looped).unwrap().is_self_loop());

        let edge = store.edge(&first).unwrap();
        assert_eq!(edge.animated, Some(true));
        assert_eq!(store.outgoing_edges(&a).len(), 3);
        assert_eq!(store.incoming_edges(&b).len(), 2);

        assert_eq!(store.connect(&a, &ScreenId::from("ghost")), None);
        assert_eq!(store.edge_count(), 3);
    }

    #[test]
    fn test_connect_with_options() {
        let mut store = FlowStore::new();
        let a = store.add_screen(ScreenKind::ListScreen, Position::default());
        let b = store.add_screen(ScreenKind::DetailScreen, Position::default());

        let id = store
            .connect_with(
                &a,
                &b,
                ConnectOptions {
                    source_handle: Some("bottom".to_string()),
                    animated: false,
                    ..ConnectOptions::default()
                },
            )
            .unwrap();

        let edge = store.edge(&id).unwrap();
        assert_eq!(edge.animated, Some(false));
        assert_eq!(edge.source_handle.as_deref(), Some("bottom"));
        assert_eq!(edge.target_handle, None);
    }

    #[test]
    fn test_node_change_batch() {
        let mut store = FlowStore::new();
        let a = store.add_screen(ScreenKind::LoginScreen, Position::default());
        let b = store.add_screen(ScreenKind::FormScreen, Position::default());
        let c = store.add_screen(ScreenKind::ListScreen, Position::default());
        store.connect(&a, &b);
        store.connect(&b, &c);
        store.set_selected_node_id(Some(Selection::Screen(b.clone())));

        assert!(store.apply_node_changes(vec![
            NodeChange::Position {
                id: a.clone(),
                position: Position::new(10.0, 10.0),
            },
            NodeChange::Select {
                id: c.clone(),
                selected: true,
            },
            NodeChange::Remove { id: b.clone() },
            NodeChange::Position {
                id: ScreenId::from("ghost"),
                position: Position::default(),
            },
        ]));

        let ids: Vec<_> = store.screens().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec![a.clone(), c.clone()]);
        assert_eq!(store.screen(&a).unwrap().position, Position::new(10.0, 10.0));
        assert!(store.screen(&c).unwrap().selected);
        assert_eq!(store.edge_count(), 0);
        assert!(store.selection().is_none());

        assert!(!store.apply_node_changes(vec![NodeChange::Remove {
            id: ScreenId::from("ghost"),
        }]));
    }

    #[test]
    fn test_edge_change_batch() {
        let mut store = FlowStore::new();
        let a = store.add_screen(ScreenKind::LoginScreen, Position::default());
        let b = store.add_screen(ScreenKind::FormScreen, Position::default());
        let first = store.connect(&a, &b).unwrap();
        let second = store.connect(&b, &a).unwrap();

        assert!(store.apply_edge_changes(vec![
            EdgeChange::Select {
                id: second.clone(),
                selected: true,
            },
            EdgeChange::Remove { id: first },
        ]));
        assert_eq!(store.edge_count(), 1);
        assert!(store.edge(&second).unwrap().selected);

        assert!(!store.apply_edge_changes(vec![EdgeChange::Remove {
            id: EdgeId::from("edge_ghost"),
        }]));
    }

    #[test]
    fn test_tool_and_viewport() {
        let mut store = FlowStore::new();
        for tool in [Tool::Connect, Tool::Pan, Tool::Select, Tool::Connect] {
            store.set_selected_tool(tool);
            assert_eq!(store.selected_tool(), tool);
        }

        assert!(store.set_viewport(Viewport::new(-120.0, 40.0, 1.5)));
        assert_eq!(store.viewport(), Viewport::new(-120.0, 40.0, 1.5));
        assert!(!store.set_viewport(Viewport::new(0.0, 0.0, 0.0)));
        assert_eq!(store.viewport(), Viewport::new(-120.0, 40.0, 1.5));

        store.reset_viewport();
        assert_eq!(store.viewport(), Viewport::new(0.0, 0.0, 0.8));
    }

    #[test]
    fn test_non_finite_geometry_rejected() {
        let (mut store, id) = store_with_screen();
        let component = store
            .add_component_to_screen(&id, ComponentKind::Text, Position::default())
            .unwrap();
        let before = store.screens().to_vec();
        let nan = Position::new(f64::NAN, 10.0);

        assert!(!store.move_screen(&id, nan));
        assert!(!store.move_screen(&id, Position::new(0.0, f64::INFINITY)));
        assert!(!store.move_component_in_screen(&id, &component, nan));
        assert!(store.add_component_to_screen(&id, ComponentKind::Text, nan).is_none());
        assert!(!store.update_screen_data(
            &id,
            ScreenPatch {
                size: Some(Size::new(f64::NAN, 300.0)),
                ..ScreenPatch::default()
            }
        ));
        assert!(!store.apply_node_changes(vec![
            NodeChange::Position {
                id: id.clone(),
                position: nan,
            },
            NodeChange::Dimensions {
                id: id.clone(),
                size: Size::new(400.0, f64::NEG_INFINITY),
            },
        ]));
        assert_eq!(store.screens(), before.as_slice());

        let origin = store.add_screen(ScreenKind::FormScreen, nan);
        assert_eq!(store.screen(&origin).unwrap().position, Position::default());

        let text = store.export_flow().unwrap();
        assert!(FlowStore::new().import_flow(&text));
    }

    #[test]
    fn test_selection_must_resolve() {
        let (mut store, id) = store_with_screen();
        assert!(!store.set_selected_node_id(Some(Selection::Screen(ScreenId::from("missing")))));
        assert!(!store.set_selected_node_id(Some(Selection::Component {
            screen_id: id.clone(),
            component_id: ComponentId::from("component_missing"),
        })));
        assert_eq!(store.selection(), Some(&Selection::Screen(id.clone())));

        assert!(store.set_selected_node_id(None));
        assert!(store.selection().is_none());
        assert!(!store.set_selected_screen_id(Some(ScreenId::from("missing"))));
        assert!(store.set_selected_screen_id(Some(id.clone())));
        assert_eq!(store.selected_screen_id(), Some(&id));
    }

    #[test]
    fn test_dark_mode() {
        let mut store = FlowStore::new();
        store.toggle_dark_mode();
        assert!(!store.is_dark_mode());
        store.toggle_dark_mode();
        assert!(store.is_dark_mode());
    }

    #[test]
    fn test_clear_flow() {
        let (mut store, id) = store_with_screen();
        let other = store.add_screen(ScreenKind::FormScreen, Position::default());
        store.connect(&id, &other);
        store.set_selected_screen_id(Some(id));
        store.set_viewport(Viewport::new(5.0, 5.0, 2.0));
        store.set_selected_tool(Tool::Pan);

        store.clear_flow();
        assert_eq!(store.screen_count(), 0);
        assert_eq!(store.edge_count(), 0);
        assert!(store.selection().is_none());
        assert!(store.selected_screen_id().is_none());
        assert_eq!(store.viewport(), Viewport::new(0.0, 0.0, 0.8));
        assert_eq!(store.selected_tool(), Tool::Pan);
    }

    #[test]
    fn test_subscription() {
        let mut store = FlowStore::new();
        let seen: Rc<RefCell<Vec<EventKind>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let sub = store.subscribe(move |event| sink.borrow_mut().push(event.kind.clone()));

        let id = store.add_screen(ScreenKind::LoginScreen, Position::default());
        store.delete_screen(&ScreenId::from("missing"));
        store.set_selected_tool(Tool::Select);
        store.delete_screen(&id);

        {
            let events = seen.borrow();
            assert_eq!(events.len(), 2);
            assert_matches!(&events[0], EventKind::ScreenAdded { kind: ScreenKind::LoginScreen, .. });
            assert_matches!(&events[1], EventKind::ScreenDeleted { removed_edges, .. } if removed_edges.is_empty());
        }

        // Already empty and at the initial viewport
        store.clear_flow();
        store.reset_viewport();
        assert_eq!(seen.borrow().len(), 2);

        store.set_viewport(Viewport::new(10.0, 0.0, 1.0));
        store.reset_viewport();
        store.reset_viewport();
        {
            let events = seen.borrow();
            assert_eq!(events.len(), 4);
            assert_matches!(&events[3], EventKind::ViewportChanged { viewport } if *viewport == Viewport::new(0.0, 0.0, 0.8));
        }

        store.add_screen(ScreenKind::FormScreen, Position::default());
        store.clear_flow();
        assert_matches!(seen.borrow().last(), Some(EventKind::FlowCleared));
        assert_eq!(seen.borrow().len(), 6);

        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.add_screen(ScreenKind::FormScreen, Position::default());
        assert_eq!(seen.borrow().len(), 6);
    }

    #[test]
    fn test_independent_instances() {
        let mut first = FlowStore::new();
        let second = FlowStore::new();
        first.add_screen(ScreenKind::DashboardScreen, Position::default());
        assert_eq!(first.screen_count(), 1);
        assert_eq!(second.screen_count(), 0);
    }
}
