use serde_json::{Map, Value};
use std::fmt;

/// Location inside the submitted document, shown as `$.react_flow.nodes[2].id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct JsonPath(String);

impl JsonPath {
    fn field(&self, name: &str) -> Self {
        Self(format!("{}.{name}", self.0))
    }

    fn index(&self, i: usize) -> Self {
        Self(format!("{}[{i}]", self.0))
    }

    fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// One shape problem and where it was found.
#[derive(Debug, Clone)]
pub(crate) struct Problem {
    pub(crate) at: JsonPath,
    pub(crate) message: &'static str,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.at.is_root() {
            f.write_str(self.message)
        } else {
            write!(f, "{}: {}", self.at, self.message)
        }
    }
}

/// Every problem found in one document, in document order. Displays one per line.
#[derive(Debug, Clone)]
pub(crate) struct ShapeReport {
    pub(crate) problems: Vec<Problem>,
}

impl fmt::Display for ShapeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = self.problems.iter();
        if let Some(first) = lines.next() {
            write!(f, "{first}")?;
        }
        for p in lines {
            write!(f, "\n{p}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ShapeReport {}

/// Validate a stored experiment document: `{ react_flow: {...}, component_props?: {...} }`.
///
/// `component_props` only has to be an object (or `null`). Its entries are looked at per node
/// during compilation, so an odd entry costs that node and nothing else.
pub(crate) fn validate_payload(value: &Value) -> Result<(), ShapeReport> {
    let mut walk = Walk::default();
    let root = JsonPath::default();

    match value.as_object() {
        None => walk.flag(&root, "payload must be a JSON object"),
        Some(doc) => {
            let graph_at = root.field("react_flow");
            match doc.get("react_flow") {
                None => walk.flag(&graph_at, "missing graph"),
                Some(graph) => walk.graph(graph, &graph_at),
            }
            if let Some(table) = doc.get("component_props")
                && !table.is_object()
                && !table.is_null()
            {
                walk.flag(&root.field("component_props"), "must be an object");
            }
        }
    }

    walk.finish()
}

/// Validate a bare graph object: `{ nodes: [...], edges?: [...] }`.
pub(crate) fn validate_graph(value: &Value) -> Result<(), ShapeReport> {
    let mut walk = Walk::default();
    walk.graph(value, &JsonPath::default());
    walk.finish()
}

#[derive(Default)]
struct Walk {
    problems: Vec<Problem>,
}

impl Walk {
    fn flag(&mut self, at: &JsonPath, message: &'static str) {
        self.problems.push(Problem {
            at: at.clone(),
            message,
        });
    }

    fn finish(self) -> Result<(), ShapeReport> {
        if self.problems.is_empty() {
            Ok(())
        } else {
            Err(ShapeReport {
                problems: self.problems,
            })
        }
    }

    fn graph(&mut self, value: &Value, at: &JsonPath) {
        let Some(graph) = value.as_object() else {
            self.flag(at, "graph must be an object");
            return;
        };

        let nodes_at = at.field("nodes");
        match graph.get("nodes") {
            None => self.flag(&nodes_at, "missing node list"),
            Some(Value::Array(nodes)) => {
                for (i, node) in nodes.iter().enumerate() {
                    self.node(node, &nodes_at.index(i));
                }
            }
            Some(_) => self.flag(&nodes_at, "node list must be an array"),
        }

        // Edges are carried but never interpreted; only the container shape matters.
        if let Some(edges) = graph.get("edges")
            && !edges.is_array()
            && !edges.is_null()
        {
            self.flag(&at.field("edges"), "edges must be an array");
        }
    }

    fn node(&mut self, value: &Value, at: &JsonPath) {
        let Some(node) = value.as_object() else {
            self.flag(at, "node must be an object");
            return;
        };

        self.text(node, "id", true, at);
        self.text(node, "type", false, at);

        if let Some(data) = node.get("data")
            && !data.is_object()
            && !data.is_null()
        {
            self.flag(&at.field("data"), "data must be an object");
        }
    }

    fn text(&mut self, node: &Map<String, Value>, key: &str, non_empty: bool, at: &JsonPath) {
        let problem = match node.get(key) {
            None => "missing",
            Some(Value::String(s)) if non_empty && s.is_empty() => "must be non-empty",
            Some(Value::String(_)) => return,
            Some(_) => "must be a string",
        };
        self.flag(&at.field(key), problem);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
