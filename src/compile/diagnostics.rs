use serde::Serialize;
use std::fmt;

/// Non-fatal finding recorded while compiling one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Id of the node the finding is about.
    pub node_id: String,
    /// That node's type tag.
    pub node_type: String,
    /// What happened.
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

/// Classification of a [`Diagnostic`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// No generator is registered for the node's type; the node was omitted.
    UnsupportedNodeType,
    /// The generator failed; the node was omitted.
    NodeRenderFailure {
        /// Rendered [`crate::NodeError`] message.
        cause: String,
    },
    /// A name the node binds equals one bound by an earlier node. Both fragments were emitted.
    IdentifierCollision {
        /// The shared identifier.
        identifier: String,
        /// Id of the first node that used it.
        first_node_id: String,
    },
    /// A name the node binds is a keyword of the target language or is already bound by the
    /// assembly template. The fragment was emitted.
    ReservedIdentifier {
        /// The reserved name.
        identifier: String,
    },
}

impl Diagnostic {
    /// Whether the node was left out of the output.
    pub fn omits_node(&self) -> bool {
        matches!(
            self.kind,
            DiagnosticKind::UnsupportedNodeType | DiagnosticKind::NodeRenderFailure { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node '{}' ({}): ", self.node_id, self.node_type)?;
        match &self.kind {
            DiagnosticKind::UnsupportedNodeType => f.write_str("unsupported node type, skipped"),
            DiagnosticKind::NodeRenderFailure { cause } => write!(f, "render failed, skipped: {cause}"),
            DiagnosticKind::IdentifierCollision {
                identifier,
                first_node_id,
            } => write!(
                f,
                "identifier '{identifier}' is also used by node '{first_node_id}'"
            ),
            DiagnosticKind::ReservedIdentifier { identifier } => {
                write!(f, "identifier '{identifier}' is reserved in the target language")
            }
        }
    }
}
