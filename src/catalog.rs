//! Static per-kind defaults for screens and components.
//!
//! The catalog is a pure lookup: nothing here is mutated at runtime. The store
//! consults it whenever it creates a screen or a component.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

/// Free-form, kind-dependent component properties
pub type Properties = Map<String, Value>;

/// Default maximum length used by [`format_node_label`]
pub const DEFAULT_LABEL_LENGTH: usize = 20;

/// Category of a screen node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenKind {
    LoginScreen,
    DashboardScreen,
    FormScreen,
    ListScreen,
    DetailScreen,
    SettingsScreen,
}

impl ScreenKind {
    pub const ALL: [ScreenKind; 6] = [
        ScreenKind::LoginScreen,
        ScreenKind::DashboardScreen,
        ScreenKind::FormScreen,
        ScreenKind::ListScreen,
        ScreenKind::DetailScreen,
        ScreenKind::SettingsScreen,
    ];

    /// Wire name, e.g. `"login-screen"`
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenKind::LoginScreen => "login-screen",
            ScreenKind::DashboardScreen => "dashboard-screen",
            ScreenKind::FormScreen => "form-screen",
            ScreenKind::ListScreen => "list-screen",
            ScreenKind::DetailScreen => "detail-screen",
            ScreenKind::SettingsScreen => "settings-screen",
        }
    }
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| anyhow!("Unknown screen kind: {}", s))
    }
}

/// Category of a component placed inside a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    // UI elements
    Button,
    Input,
    Text,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Image,
    Card,
    Modal,
    Table,
    List,
    // Logic elements
    ApiCall,
    Logic,
    Database,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 15] = [
        ComponentKind::Button,
        ComponentKind::Input,
        ComponentKind::Text,
        ComponentKind::Textarea,
        ComponentKind::Select,
        ComponentKind::Checkbox,
        ComponentKind::Radio,
        ComponentKind::Image,
        ComponentKind::Card,
        ComponentKind::Modal,
        ComponentKind::Table,
        ComponentKind::List,
        ComponentKind::ApiCall,
        ComponentKind::Logic,
        ComponentKind::Database,
    ];

    /// Wire name, e.g. `"api-call"`
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Button => "button",
            ComponentKind::Input => "input",
            ComponentKind::Text => "text",
            ComponentKind::Textarea => "textarea",
            ComponentKind::Select => "select",
            ComponentKind::Checkbox => "checkbox",
            ComponentKind::Radio => "radio",
            ComponentKind::Image => "image",
            ComponentKind::Card => "card",
            ComponentKind::Modal => "modal",
            ComponentKind::Table => "table",
            ComponentKind::List => "list",
            ComponentKind::ApiCall => "api-call",
            ComponentKind::Logic => "logic",
            ComponentKind::Database => "database",
        }
    }

    /// Logic elements carry behaviour rather than a visible widget
    pub fn is_logic(&self) -> bool {
        matches!(
            self,
            ComponentKind::ApiCall | ComponentKind::Logic | ComponentKind::Database
        )
    }

    pub fn is_ui(&self) -> bool {
        !self.is_logic()
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| anyhow!("Unknown component kind: {}", s))
    }
}

/// Icon name and colour gradient used by renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualTag {
    pub icon: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenDefaults {
    pub label: &'static str,
    pub description: &'static str,
    pub visual: VisualTag,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDefaults {
    pub label: &'static str,
    pub description: &'static str,
    pub visual: VisualTag,
    pub initial_properties: Properties,
}

const fn tag(icon: &'static str, color: &'static str) -> VisualTag {
    VisualTag { icon, color }
}

/// Default label, description and visual tag for a screen kind
pub fn screen_defaults(kind: ScreenKind) -> ScreenDefaults {
    let (label, description, visual) = match kind {
        ScreenKind::LoginScreen => (
            "Login Screen",
            "User authentication interface",
            tag("log-in", "from-indigo-500 to-purple-600"),
        ),
        ScreenKind::DashboardScreen => (
            "Dashboard",
            "Main application dashboard",
            tag("layout-dashboard", "from-blue-500 to-cyan-600"),
        ),
        ScreenKind::FormScreen => (
            "Form Screen",
            "Data input and forms",
            tag("file-text", "from-green-500 to-emerald-600"),
        ),
        ScreenKind::ListScreen => (
            "List Screen",
            "Data listing and tables",
            tag("list", "from-orange-500 to-red-600"),
        ),
        ScreenKind::DetailScreen => (
            "Detail Screen",
            "Item details and information",
            tag("eye", "from-violet-500 to-purple-600"),
        ),
        ScreenKind::SettingsScreen => (
            "Settings Screen",
            "Application configuration",
            tag("settings", "from-gray-500 to-slate-600"),
        ),
    };

    ScreenDefaults {
        label,
        description,
        visual,
    }
}

/// Default metadata and initial property bag for a component kind
pub fn component_defaults(kind: ComponentKind) -> ComponentDefaults {
    let (label, description, visual) = match kind {
        ComponentKind::Button => (
            "Button",
            "Clickable button element",
            tag("mouse-pointer", "from-blue-400 to-blue-600"),
        ),
        ComponentKind::Input => (
            "Input",
            "Text input field",
            tag("type", "from-green-400 to-green-600"),
        ),
        ComponentKind::Text => (
            "Text",
            "Static text element",
            tag("type", "from-gray-400 to-gray-600"),
        ),
        ComponentKind::Textarea => (
            "TextArea",
            "Multi-line text input",
            tag("file-text", "from-green-400 to-emerald-600"),
        ),
        ComponentKind::Select => (
            "Select",
            "Dropdown selection",
            tag("menu", "from-purple-400 to-purple-600"),
        ),
        ComponentKind::Checkbox => (
            "Checkbox",
            "Checkbox input",
            tag("check-square", "from-teal-400 to-teal-600"),
        ),
        ComponentKind::Radio => (
            "Radio",
            "Radio button input",
            tag("circle", "from-cyan-400 to-cyan-600"),
        ),
        ComponentKind::Image => (
            "Image",
            "Image display",
            tag("image", "from-pink-400 to-pink-600"),
        ),
        ComponentKind::Card => (
            "Card",
            "Card container",
            tag("credit-card", "from-indigo-400 to-indigo-600"),
        ),
        ComponentKind::Modal => (
            "Modal",
            "Modal dialog",
            tag("rectangle-horizontal", "from-violet-400 to-violet-600"),
        ),
        ComponentKind::Table => (
            "Table",
            "Data table",
            tag("table", "from-orange-400 to-orange-600"),
        ),
        ComponentKind::List => (
            "List",
            "List of items",
            tag("list", "from-yellow-400 to-yellow-600"),
        ),
        ComponentKind::ApiCall => (
            "API Call",
            "External API integration",
            tag("link", "from-purple-400 to-violet-400"),
        ),
        ComponentKind::Logic => (
            "Logic",
            "Business logic or computation",
            tag("zap", "from-amber-400 to-orange-400"),
        ),
        ComponentKind::Database => (
            "Database",
            "Data storage or retrieval",
            tag("database", "from-red-400 to-pink-400"),
        ),
    };

    ComponentDefaults {
        label,
        description,
        visual,
        initial_properties: initial_properties(kind),
    }
}

fn initial_properties(kind: ComponentKind) -> Properties {
    let value = match kind {
        ComponentKind::Button => json!({
            "text": "Click me",
            "variant": "primary",
            "size": "medium",
            "disabled": false,
        }),
        ComponentKind::Input => json!({
            "type": "text",
            "placeholder": "Enter value...",
            "required": false,
            "disabled": false,
        }),
        ComponentKind::Text => json!({
            "content": "Sample text",
            "fontSize": "14px",
            "fontWeight": "normal",
            "color": "#000000",
        }),
        ComponentKind::Textarea => json!({
            "placeholder": "Enter text...",
            "rows": 3,
            "required": false,
            "disabled": false,
        }),
        ComponentKind::Select => json!({
            "options": ["Option 1", "Option 2", "Option 3"],
            "defaultValue": "",
            "required": false,
            "disabled": false,
        }),
        ComponentKind::Checkbox => json!({
            "label": "Checkbox label",
            "checked": false,
            "disabled": false,
        }),
        ComponentKind::Radio => json!({
            "name": "radioGroup",
            "value": "option1",
            "label": "Radio option",
            "disabled": false,
        }),
        ComponentKind::Image => json!({
            "src": "/placeholder.jpg",
            "alt": "Image description",
            "width": 200,
            "height": 150,
        }),
        ComponentKind::Card => json!({
            "title": "Card Title",
            "content": "Card content",
            "footer": "",
            "padding": "16px",
        }),
        ComponentKind::Modal => json!({
            "title": "Modal Title",
            "content": "Modal content",
            "closable": true,
            "size": "medium",
        }),
        ComponentKind::Table => json!({
            "columns": ["Column 1", "Column 2", "Column 3"],
            "data": [],
            "sortable": true,
            "pagination": false,
        }),
        ComponentKind::List => json!({
            "items": ["Item 1", "Item 2", "Item 3"],
            "ordered": false,
            "selectable": false,
        }),
        ComponentKind::ApiCall => json!({
            "method": "GET",
            "endpoint": "/api/data",
            "headers": {},
            "body": "",
        }),
        ComponentKind::Logic => json!({
            "operation": "filter",
            "condition": "",
            "transformation": "",
        }),
        ComponentKind::Database => json!({
            "operation": "SELECT",
            "table": "users",
            "query": "",
            "fields": [],
        }),
    };

    match value {
        Value::Object(map) => map,
        _ => Properties::new(),
    }
}

/// Shorten a label for display, ending truncated labels with "..."
pub fn format_node_label(label: &str, max_length: usize) -> String {
    if label.chars().count() <= max_length {
        return label.to_string();
    }
    let keep = max_length.saturating_sub(3);
    let mut short: String = label.chars().take(keep).collect();
    short.push_str("...");
    short
}
