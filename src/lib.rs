// Flow Designer - Core Library

pub mod catalog;
pub mod changes;
pub mod config;
pub mod documentation;
pub mod edge;
pub mod event;
pub mod geometry;
pub mod id_generator;
pub mod screen;
pub mod serialization;
pub mod store;
pub mod validation;
pub mod view;

// Re-export main types for convenience
pub use catalog::{
    component_defaults, format_node_label, screen_defaults, ComponentDefaults, ComponentKind,
    Properties, ScreenDefaults, ScreenKind, VisualTag,
};
pub use changes::{EdgeChange, NodeChange};
pub use config::FlowConfig;
pub use documentation::{documentation_file_name, NodeDocumentation};
pub use edge::{ConnectOptions, Edge, EdgeStyle};
pub use event::{EventKind, FlowEvent, SubscriptionId};
pub use geometry::{node_center, Position, Size};
pub use id_generator::{generate_id, ComponentId, EdgeId, ScreenId};
pub use screen::{Component, ComponentPatch, Screen, ScreenPatch};
pub use serialization::{export_file_name, FlowDocument, Metadata};
pub use store::FlowStore;
pub use validation::{ValidatedFlow, ValidationIssue, ValidationResult, ValidationSeverity, Validator};
pub use view::{Selection, Tool, Viewport};
