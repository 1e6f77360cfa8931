use super::props::invalid;
use super::{ComponentGenerator, NodeError, PropertyView, base_context};
use crate::graph::resolve::ResolvedNode;
use crate::target::Target;
use crate::templates::registry::RenderContext;

/// Text stimulus shown for a fixed duration.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextGenerator;

impl ComponentGenerator for TextGenerator {
    fn type_name(&self) -> &str {
        "text"
    }

    fn context(
        &self,
        node: &ResolvedNode,
        props: &PropertyView<'_>,
        target: Target,
    ) -> Result<RenderContext, NodeError> {
        let text = props.string_or("text", "Hello World")?;
        let duration = props.non_negative_or("duration", 1.0)?;
        let x = props.number_or("x", 0.0)?;
        let y = props.number_or("y", 0.0)?;
        let height = props.number_or("height", 0.05)?;
        if height <= 0.0 {
            return Err(invalid("height", "must be > 0"));
        }
        let color = props.string_or("color", "white")?;

        Ok(base_context(node, target)
            .with("text", target.str_literal(&text))
            .with("duration", target.number_literal(duration))
            .with("x", target.number_literal(x))
            .with("y", target.number_literal(y))
            .with("height", target.number_literal(height))
            .with("color", target.str_literal(&color)))
    }
}
