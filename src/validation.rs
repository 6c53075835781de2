use crate::store::FlowStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Validation severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ValidationSeverity {
    Info,    // informational
    Warning, // potential issue
    Error,   // blocks import
}

/// Validation issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: ValidationSeverity,
    pub message: String,
    /// Screen/edge ids, or document paths such as `nodes[3]`
    pub affected: Vec<String>,
    pub issue_type: ValidationIssueType,
}

/// Types of validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationIssueType {
    NotAnObject,
    MissingNodes,
    MissingEdges,
    MalformedNode,
    MalformedEdge,
    DanglingEdge,
    DuplicateEdge,
    SelfLoop,
    UnconnectedScreen,
}

/// Complete validation result
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    pub fn add_issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    fn push(
        &mut self,
        severity: ValidationSeverity,
        issue_type: ValidationIssueType,
        message: String,
        affected: Vec<String>,
    ) {
        self.add_issue(ValidationIssue {
            severity,
            message,
            affected,
            issue_type,
        });
    }

    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.severity == ValidationSeverity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.severity == ValidationSeverity::Warning)
    }

    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.with_severity(ValidationSeverity::Error)
    }

    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.with_severity(ValidationSeverity::Warning)
    }

    pub fn info(&self) -> Vec<&ValidationIssue> {
        self.with_severity(ValidationSeverity::Info)
    }

    fn with_severity(&self, severity: ValidationSeverity) -> Vec<&ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == severity).collect()
    }

    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }
}

/// Shallow checks for documents and graph health reports for stores
pub struct Validator;

impl Validator {
    /// Structural check of a raw document
    ///
    /// Only presence is checked: `nodes` and `edges` arrays, and a truthy
    /// id/type/data on nodes and id/source/target on edges. Property bags are
    /// not checked against their component kind.
    pub fn validate_document(document: &Value) -> ValidationResult {
        let mut result = ValidationResult::new();

        let Some(root) = document.as_object() else {
            result.push(
                ValidationSeverity::Error,
                ValidationIssueType::NotAnObject,
                "Flow document must be a JSON object".to_string(),
                vec![],
            );
            return result;
        };

        match root.get("nodes").and_then(Value::as_array) {
            Some(nodes) => {
                for (index, node) in nodes.iter().enumerate() {
                    Self::check_entry(
                        &mut result,
                        "nodes",
                        index,
                        node,
                        &["id", "type", "data"],
                        ValidationIssueType::MalformedNode,
                    );
                }
            }
            None => result.push(
                ValidationSeverity::Error,
                ValidationIssueType::MissingNodes,
                "Flow document has no `nodes` array".to_string(),
                vec![],
            ),
        }

        match root.get("edges").and_then(Value::as_array) {
            Some(edges) => {
                for (index, edge) in edges.iter().enumerate() {
                    Self::check_entry(
                        &mut result,
                        "edges",
                        index,
                        edge,
                        &["id", "source", "target"],
                        ValidationIssueType::MalformedEdge,
                    );
                }
            }
            None => result.push(
                ValidationSeverity::Error,
                ValidationIssueType::MissingEdges,
                "Flow document has no `edges` array".to_string(),
                vec![],
            ),
        }

        result
    }

    fn check_entry(
        result: &mut ValidationResult,
        section: &str,
        index: usize,
        entry: &Value,
        required: &[&str],
        issue_type: ValidationIssueType,
    ) {
        let path = format!("{}[{}]", section, index);

        let Some(object) = entry.as_object() else {
            result.push(
                ValidationSeverity::Error,
                issue_type,
                format!("{} is not an object", path),
                vec![path],
            );
            return;
        };

        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|field| !is_truthy(object.get(*field)))
            .collect();
        if !missing.is_empty() {
            result.push(
                ValidationSeverity::Error,
                issue_type,
                format!("{} is missing {}", path, missing.join(", ")),
                vec![path],
            );
        }
    }

    /// Graph health report for a store; reporting only, nothing is repaired
    pub fn validate(store: &FlowStore) -> ValidationResult {
        let mut result = ValidationResult::new();

        for edge in store.edges() {
            let missing: Vec<String> = [&edge.source, &edge.target]
                .into_iter()
                .filter(|id| store.screen(id).is_none())
                .map(|id| id.to_string())
                .collect();
            if !missing.is_empty() {
                let mut affected = vec![edge.id.to_string()];
                affected.extend(missing.iter().cloned());
                result.push(
                    ValidationSeverity::Error,
                    ValidationIssueType::DanglingEdge,
                    format!("Edge {} points at missing screen(s): {}", edge.id, missing.join(", ")),
                    affected,
                );
            }

            if edge.is_self_loop() {
                result.push(
                    ValidationSeverity::Info,
                    ValidationIssueType::SelfLoop,
                    format!("Edge {} navigates from screen {} to itself", edge.id, edge.source),
                    vec![edge.id.to_string(), edge.source.to_string()],
                );
            }
        }

        // Parallel edges, reported once per extra edge
        let mut seen: HashMap<(&str, &str), &str> = HashMap::new();
        for edge in store.edges() {
            let key = (edge.source.as_str(), edge.target.as_str());
            match seen.get(&key) {
                Some(first) => result.push(
                    ValidationSeverity::Warning,
                    ValidationIssueType::DuplicateEdge,
                    format!(
                        "Edge {} duplicates edge {} ({} -> {})",
                        edge.id, first, edge.source, edge.target
                    ),
                    vec![edge.id.to_string(), first.to_string()],
                ),
                None => {
                    seen.insert(key, edge.id.as_str());
                }
            }
        }

        if store.screen_count() > 1 {
            for screen in store.screens() {
                if !store.edges().iter().any(|e| e.involves(&screen.id)) {
                    result.push(
                        ValidationSeverity::Info,
                        ValidationIssueType::UnconnectedScreen,
                        format!("Screen '{}' has no navigation in or out", screen.label),
                        vec![screen.id.to_string()],
                    );
                }
            }
        }

        result
    }
}

/// JavaScript-style truthiness of an optional JSON value
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Extension trait for FlowStore to add validation
pub trait ValidatedFlow {
    fn validate(&self) -> ValidationResult;

    /// Highest severity reported against each affected id
    fn entities_with_issues(&self, result: &ValidationResult) -> HashMap<String, ValidationSeverity>;
}

impl ValidatedFlow for FlowStore {
    fn validate(&self) -> ValidationResult {
        Validator::validate(self)
    }

    fn entities_with_issues(&self, result: &ValidationResult) -> HashMap<String, ValidationSeverity> {
        let mut entities = HashMap::new();

        for issue in &result.issues {
            for id in &issue.affected {
                entities
                    .entry(id.clone())
                    .and_modify(|severity| {
                        if issue.severity > *severity {
                            *severity = issue.severity;
                        }
                    })
                    .or_insert(issue.severity);
            }
        }

        entities
    }
}
