/// Convenience result type used across stimflow.
pub type StimflowResult<T> = Result<T, StimflowError>;

/// Top-level error taxonomy for whole-compile failures.
///
/// Per-node problems never surface here; they are recorded as
/// [`crate::Diagnostic`] values on the compile report instead.
#[derive(thiserror::Error, Debug)]
pub enum StimflowError {
    /// The target's assembly template is not registered; nothing can be emitted.
    #[error("missing assembly template '{name}'")]
    MissingAssemblyTemplate {
        /// Logical name that was looked up.
        name: String,
    },

    /// The graph payload does not have the expected structure.
    #[error("malformed graph: {0}")]
    MalformedGraph(String),

    /// The graph exceeds the configured node bound.
    #[error("graph has {count} nodes, limit is {max}")]
    TooManyNodes {
        /// Number of nodes in the submitted graph.
        count: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Template loading or assembly rendering failed.
    #[error("template error: {0}")]
    Template(String),

    /// Configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Telemetry channel lifecycle or transport failure.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StimflowError {
    /// Build a [`StimflowError::MalformedGraph`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedGraph(msg.into())
    }

    /// Build a [`StimflowError::Template`] value.
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Build a [`StimflowError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`StimflowError::Telemetry`] value.
    pub fn telemetry(msg: impl Into<String>) -> Self {
        Self::Telemetry(msg.into())
    }

    /// Whether the routing layer should report this as a server-side compile failure.
    ///
    /// Every variant is fatal for the compile call; configuration and telemetry errors never
    /// originate from a compile and are not compile failures.
    pub fn is_compile_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingAssemblyTemplate { .. }
                | Self::MalformedGraph(_)
                | Self::TooManyNodes { .. }
                | Self::Template(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
