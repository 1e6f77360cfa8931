use serde_json::Value;

use crate::foundation::ident::{IDENT_PREFIX, sanitize};
use crate::graph::model::{ComponentPropertyTable, FlowNode, PropertyMap};

/// Working copy of a node after label defaulting and sanitization.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNode {
    /// Node id from the graph.
    pub id: String,
    /// Node type tag from the graph.
    pub node_type: String,
    /// Sanitized label, a valid identifier in both target languages.
    pub label: String,
    /// The label before sanitization (or the default label), for comments.
    pub display_label: String,
    /// Inline data with `label` replaced by the sanitized form.
    pub data: PropertyMap,
}

/// Default label for a node without one.
pub fn default_label(node_id: &str) -> String {
    format!("{IDENT_PREFIX}{node_id}")
}

/// Resolve `node` against the external property table.
///
/// The caller's node is not modified. Returns the working copy and the node's entry in
/// `table`, or an empty map when it has none or the entry is not an object (see
/// [`property_entry_kind`]).
pub fn resolve(node: &FlowNode, table: &ComponentPropertyTable) -> (ResolvedNode, PropertyMap) {
    let display_label = match node.label() {
        Some(label) => label.to_string(),
        None => default_label(&node.id),
    };
    let label = sanitize(&display_label);

    let mut data = node.data.clone();
    data.insert("label".to_string(), Value::String(label.clone()));

    let props = table
        .get(&node.id)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    (
        ResolvedNode {
            id: node.id.clone(),
            node_type: node.node_type.clone(),
            label,
            display_label,
            data,
        },
        props,
    )
}

/// JSON kind of `node_id`'s table entry when it is present but neither an object nor `null`.
pub fn property_entry_kind(node_id: &str, table: &ComponentPropertyTable) -> Option<&'static str> {
    match table.get(node_id)? {
        Value::Null | Value::Object(_) => None,
        Value::Bool(_) => Some("a boolean"),
        Value::Number(_) => Some("a number"),
        Value::String(_) => Some("a string"),
        Value::Array(_) => Some("an array"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/resolve.rs"]
mod tests;
