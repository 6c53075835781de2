use crate::catalog::{ComponentKind, Properties, ScreenKind};
use crate::config::FlowConfig;
use crate::edge::{Edge, EdgeStyle};
use crate::geometry::{Position, Size};
use crate::id_generator::{ComponentId, EdgeId, ScreenId};
use crate::screen::{Component, Screen};
use crate::store::FlowStore;
use crate::validation::Validator;
use crate::view::Viewport;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const TARGET: &str = "flow_designer::serialization";

/// Version written into every exported document
pub const FORMAT_VERSION: &str = "1.0";

/// Document metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub version: String,
    pub created_at: DateTime<Utc>,
}

impl Metadata {
    /// Metadata stamped with the current time
    pub fn new() -> Self {
        Self::with_timestamp(Utc::now())
    }

    pub fn with_timestamp(created_at: DateTime<Utc>) -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            created_at,
        }
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Exchanged flow document: screens, edges, viewport and metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDocument {
    pub nodes: Vec<NodeDocument>,
    pub edges: Vec<EdgeDocument>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,

    /// Informational only; unreadable metadata is dropped rather than rejected
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_metadata"
    )]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDocument {
    pub id: ScreenId,

    #[serde(rename = "type")]
    pub kind: ScreenKind,

    #[serde(default)]
    pub position: Position,

    pub data: ScreenDataDocument,

    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenDataDocument {
    #[serde(default)]
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Mirrors the node `type`; the node type wins when they disagree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ScreenKind>,

    #[serde(default)]
    pub components: Vec<ComponentDocument>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_size: Option<Size>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDocument {
    /// Absent in documents written before components had stable ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ComponentId>,

    #[serde(default)]
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub category: ComponentKind,

    #[serde(default)]
    pub properties: Properties,

    #[serde(default)]
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDocument {
    pub id: EdgeId,
    pub source: ScreenId,
    pub target: ScreenId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<EdgeStyle>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn lenient_metadata<'de, D>(deserializer: D) -> std::result::Result<Option<Metadata>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

impl FlowDocument {
    /// Snapshot the graph and viewport of a store
    pub fn from_store(store: &FlowStore, metadata: Metadata) -> Self {
        Self {
            nodes: store.screens().iter().map(NodeDocument::from_screen).collect(),
            edges: store.edges().iter().map(EdgeDocument::from_edge).collect(),
            viewport: Some(store.viewport()),
            metadata: Some(metadata),
        }
    }

    /// Parse, structurally validate and decode a document
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).context("Failed to parse flow document")?;

        let report = Validator::validate_document(&value);
        if report.has_errors() {
            let messages: Vec<&str> = report.errors().iter().map(|i| i.message.as_str()).collect();
            return Err(anyhow!("Invalid flow document: {}", messages.join("; ")));
        }

        serde_json::from_value(value).context("Failed to decode flow document")
    }

    /// Convert into store entities, filling gaps from `config`
    pub(crate) fn into_graph(self, config: &FlowConfig) -> (Vec<Screen>, Vec<Edge>, Viewport) {
        let screens = self
            .nodes
            .into_iter()
            .map(|node| node.into_screen(config))
            .collect();
        let edges = self.edges.into_iter().map(EdgeDocument::into_edge).collect();
        let viewport = self.viewport.unwrap_or(config.import_viewport);

        (screens, edges, viewport)
    }
}

impl NodeDocument {
    fn from_screen(screen: &Screen) -> Self {
        Self {
            id: screen.id.clone(),
            kind: screen.kind,
            position: screen.position,
            data: ScreenDataDocument {
                label: screen.label.clone(),
                description: screen.description.clone(),
                category: Some(screen.kind),
                components: screen
                    .components
                    .iter()
                    .map(ComponentDocument::from_component)
                    .collect(),
                screen_size: Some(screen.size),
            },
            selected: screen.selected,
        }
    }

    fn into_screen(self, config: &FlowConfig) -> Screen {
        let data = self.data;
        let components: Vec<Component> = data
            .components
            .into_iter()
            .map(ComponentDocument::into_component)
            .collect();
        let size = data.screen_size.unwrap_or(Size::new(
            config.default_screen_size.width,
            config.screen_height_for(components.len()),
        ));

        Screen::from_parts(
            self.id,
            self.kind,
            self.position,
            data.label,
            data.description,
            size,
            components,
            self.selected,
        )
    }
}

impl ComponentDocument {
    pub(crate) fn from_component(component: &Component) -> Self {
        Self {
            id: Some(component.id.clone()),
            label: component.label.clone(),
            name: component.name.clone(),
            description: component.description.clone(),
            category: component.kind,
            properties: component.properties.clone(),
            position: component.position,
        }
    }

    fn into_component(self) -> Component {
        Component::from_parts(
            self.id.unwrap_or_else(ComponentId::generate),
            self.category,
            self.label,
            self.name,
            self.description,
            self.properties,
            self.position,
        )
    }
}

impl EdgeDocument {
    fn from_edge(edge: &Edge) -> Self {
        Self {
            id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
            source_handle: edge.source_handle.clone(),
            target_handle: edge.target_handle.clone(),
            animated: edge.animated,
            style: edge.style.clone(),
            selected: edge.selected,
        }
    }

    fn into_edge(self) -> Edge {
        Edge::from_parts(
            self.id,
            self.source,
            self.target,
            self.source_handle,
            self.target_handle,
            self.animated,
            self.style,
            self.selected,
        )
    }
}

impl FlowStore {
    /// Snapshot the current flow as a document stamped with the current time
    pub fn export_document(&self) -> FlowDocument {
        FlowDocument::from_store(self, Metadata::new())
    }

    /// Serialize the current flow as pretty-printed JSON
    pub fn export_flow(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.export_document())
            .context("Failed to serialize flow document")
    }

    /// Replace the graph with a parsed document, or fail leaving the store untouched
    pub fn try_import_flow(&mut self, text: &str) -> Result<()> {
        let document = FlowDocument::parse(text)?;
        let (screens, edges, viewport) = document.into_graph(self.config());
        self.replace_graph(screens, edges, viewport);
        Ok(())
    }

    /// Boolean form of [`FlowStore::try_import_flow`]
    pub fn import_flow(&mut self, text: &str) -> bool {
        match self.try_import_flow(text) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(target: TARGET, error = %format!("{:#}", err), "Rejected flow import");
                false
            }
        }
    }
}

/// Suggested download name for an export made on `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("ai-flow-{}.json", date.format("%Y-%m-%d"))
}
