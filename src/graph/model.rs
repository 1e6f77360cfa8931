use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{StimflowError, StimflowResult};
use crate::schema::validate::{validate_graph, validate_payload};

/// Type-specific configuration for one node.
pub type PropertyMap = Map<String, Value>;

/// Per-node configuration supplied separately from the graph, keyed by node id.
///
/// Entries are kept as raw JSON: an entry that is not an object is a problem of that one node,
/// reported when the node is compiled, and entries for ids not in the graph are never read.
pub type ComponentPropertyTable = BTreeMap<String, Value>;

/// One element of the experiment graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    /// Identifier, unique within its graph.
    pub id: String,
    /// Tag selecting the component generator.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Inline node data; `label` is the only key the compiler itself reads.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: PropertyMap,
}

impl FlowNode {
    /// Node with empty inline data.
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            data: PropertyMap::new(),
        }
    }

    /// Builder-style setter for `data.label`.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.data
            .insert("label".to_string(), Value::String(label.into()));
        self
    }

    /// `data.label` when it is present and a string.
    pub fn label(&self) -> Option<&str> {
        self.data.get("label").and_then(Value::as_str)
    }
}

/// The node-based experiment description produced by the visual editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    /// Nodes in editor order; this is also the emission order.
    pub nodes: Vec<FlowNode>,
    /// Connections between nodes. Carried through untouched and never interpreted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub edges: Vec<Value>,
}

impl FlowGraph {
    /// Graph holding `nodes` and no edges.
    pub fn new(nodes: Vec<FlowNode>) -> Self {
        Self {
            nodes,
            edges: Vec::new(),
        }
    }

    /// Validate the structure of a raw graph object and convert it.
    pub fn from_value(value: &Value) -> StimflowResult<Self> {
        validate_graph(value).map_err(|e| StimflowError::malformed(e.to_string()))?;
        Self::deserialize(value).map_err(|e| StimflowError::malformed(e.to_string()))
    }
}

/// The stored experiment document: graph plus the external property table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentPayload {
    /// The editor graph.
    pub react_flow: FlowGraph,
    /// Per-node properties edited in the properties panel.
    #[serde(default, deserialize_with = "null_as_default")]
    pub component_props: ComponentPropertyTable,
}

impl ExperimentPayload {
    /// Validate the structure of a raw document and convert it.
    pub fn from_value(value: &Value) -> StimflowResult<Self> {
        validate_payload(value).map_err(|e| StimflowError::malformed(e.to_string()))?;
        Self::deserialize(value).map_err(|e| StimflowError::malformed(e.to_string()))
    }

    /// Parse and validate a document from JSON text.
    pub fn from_json_str(s: &str) -> StimflowResult<Self> {
        let value: Value = serde_json::from_str(s)
            .map_err(|e| StimflowError::malformed(format!("parse payload JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// Parse and validate a document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> StimflowResult<Self> {
        let value: Value = serde_json::from_reader(r)
            .map_err(|e| StimflowError::malformed(format!("parse payload JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// Parse and validate a document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> StimflowResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StimflowError::Other(anyhow::anyhow!("open payload '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "../../tests/unit/graph/model.rs"]
mod tests;
