use crate::foundation::error::{StimflowError, StimflowResult};
use crate::templates::registry::{RenderContext, TemplateRegistry};

/// Separator placed between component fragments in the assembled program.
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// Source text produced for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFragment {
    /// Node the fragment was rendered for.
    pub node_id: String,
    /// Rendered source text.
    pub code: String,
}

/// Render the assembly template with `fragments` in order.
///
/// The template sees `expName` (the name as a target string literal) and `components`.
pub fn compose(
    templates: &TemplateRegistry,
    experiment_name: &str,
    fragments: &[GeneratedFragment],
) -> StimflowResult<String> {
    let assembly = templates.assembly()?;
    let components = fragments
        .iter()
        .map(|f| f.code.trim_end_matches('\n'))
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR);

    let ctx = RenderContext::new()
        .with("expName", templates.target().str_literal(experiment_name))
        .with("components", components);
    assembly
        .render(&ctx)
        .map_err(|e| StimflowError::template(e.to_string()))
}

#[cfg(test)]
#[path = "../../tests/unit/compile/assemble.rs"]
mod tests;
