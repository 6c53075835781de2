use crate::catalog::{ComponentKind, Properties, ScreenKind};
use crate::geometry::Size;
use crate::id_generator::{ComponentId, ScreenId};
use crate::screen::{Component, Screen};
use crate::serialization::ComponentDocument;
use crate::store::FlowStore;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Implementation hand-off for one screen or component
///
/// Exactly one of `screen` and `component` is set; the other serializes as
/// `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDocumentation {
    pub screen: Option<ScreenSummary>,
    pub component: Option<ComponentSummary>,
    pub implementation: ImplementationSpecs,
    pub llm_prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenSummary {
    #[serde(rename = "type")]
    pub kind: ScreenKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub components: Vec<ComponentDocument>,
    pub screen_size: Size,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSummary {
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplementationSpecs {
    pub frontend: LayerSpec,
    pub backend: LayerSpec,
    pub database: LayerSpec,
}

/// Per-layer stub the implementer fills in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub description: String,
    pub notes: String,
}

const FRONTEND_NOTES: &str = "Screen-based frontend implementation with components";
const BACKEND_NOTES: &str = "Backend API endpoints and data flow";
const DATABASE_NOTES: &str = "Database schema and relationships";

const PROMPT_REQUIREMENTS: &str = "Requirements:
1. Follow modern web development best practices
2. Ensure accessibility compliance (WCAG 2.1)
3. Use TypeScript for type safety
4. Include proper error handling
5. Write unit tests for core functionality
6. Add comprehensive documentation

Technical Stack:
- Frontend: React 18+ with TypeScript
- Styling: Tailwind CSS
- State Management: Zustand
- Testing: Jest + React Testing Library";

impl ImplementationSpecs {
    fn new(kind: &str, label: &str, description: Option<&str>) -> Self {
        let layer = |notes: &str| LayerSpec {
            kind: kind.to_string(),
            label: label.to_string(),
            description: description.unwrap_or_default().to_string(),
            notes: notes.to_string(),
        };
        Self {
            frontend: layer(FRONTEND_NOTES),
            backend: layer(BACKEND_NOTES),
            database: layer(DATABASE_NOTES),
        }
    }
}

impl NodeDocumentation {
    pub fn for_screen(screen: &Screen) -> Self {
        let kind = screen.kind.as_str();
        let component_kinds: Vec<&str> =
            screen.components.iter().map(|c| c.kind.as_str()).collect();

        let details = format!(
            "Screen Details:\n- Size: {}×{}\n- Components: {} components inside\n- Component Types: {}",
            screen.size.width,
            screen.size.height,
            screen.components.len(),
            component_kinds.join(", "),
        );
        let llm_prompt = prompt(
            kind,
            "Screen",
            &screen.label,
            screen.description.as_deref(),
            &details,
            ("screen", "Screen layout with all components"),
        );

        Self {
            screen: Some(ScreenSummary {
                kind: screen.kind,
                label: screen.label.clone(),
                description: screen.description.clone(),
                components: screen
                    .components
                    .iter()
                    .map(ComponentDocument::from_component)
                    .collect(),
                screen_size: screen.size,
            }),
            component: None,
            implementation: ImplementationSpecs::new(
                kind,
                &screen.label,
                screen.description.as_deref(),
            ),
            llm_prompt,
        }
    }

    pub fn for_component(component: &Component) -> Self {
        let kind = component.kind.as_str();
        // A string-keyed map always serializes
        let properties =
            serde_json::to_string_pretty(&component.properties).unwrap_or_else(|_| "{}".into());

        let details = format!(
            "Component Details:\n- Position: {}, {}\n- Properties: {}",
            component.position.x, component.position.y, properties,
        );
        let llm_prompt = prompt(
            kind,
            "Component",
            component.display_name(),
            component.description.as_deref(),
            &details,
            ("component", "Component structure and props"),
        );

        Self {
            screen: None,
            component: Some(ComponentSummary {
                kind: component.kind,
                label: component.display_name().to_string(),
                description: component.description.clone(),
                properties: component.properties.clone(),
            }),
            implementation: ImplementationSpecs::new(
                kind,
                component.display_name(),
                component.description.as_deref(),
            ),
            llm_prompt,
        }
    }

    /// Pretty-printed JSON, as written to the documentation file
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize documentation")
    }
}

fn prompt(
    kind: &str,
    noun: &str,
    label: &str,
    description: Option<&str>,
    details: &str,
    (deliverable, layout): (&str, &str),
) -> String {
    let description = description.unwrap_or("No description provided");
    format!(
        "Create a {kind} with the following specifications:\n\n\
         {noun}: {label}\n\
         Description: {description}\n\n\
         Type: {kind}\n\n\n\
         {details}\n\n\n\
         {requirements}\n\n\
         Please provide:\n\
         1. Complete {deliverable} implementation\n\
         2. {layout}\n\
         3. Type definitions\n\
         4. Unit tests\n\
         5. Usage examples\n\
         6. Documentation",
        requirements = PROMPT_REQUIREMENTS,
    )
}

/// Suggested download name for the documentation of a node labelled `label`
///
/// The label is lower-cased and every run of whitespace becomes one `-`.
pub fn documentation_file_name(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut in_whitespace = false;
    for ch in label.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.extend(ch.to_lowercase());
            in_whitespace = false;
        }
    }
    format!("{}-documentation.json", slug)
}

impl FlowStore {
    pub fn screen_documentation(&self, id: &ScreenId) -> Option<NodeDocumentation> {
        self.screen(id).map(NodeDocumentation::for_screen)
    }

    pub fn component_documentation(
        &self,
        screen_id: &ScreenId,
        component_id: &ComponentId,
    ) -> Option<NodeDocumentation> {
        self.screen(screen_id)
            .and_then(|screen| screen.component(component_id))
            .map(NodeDocumentation::for_component)
    }
}
