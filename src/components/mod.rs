//! Component generators: one per node type, dispatched through [`GeneratorRegistry`].
//!
//! A generator turns a resolved node plus its properties into a [`RenderContext`]; the default
//! [`ComponentGenerator::render`] then fills the type's template for the registry's target.
//! Adding a node type means registering another generator; neither dispatch nor assembly
//! change.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::foundation::ident::comment_safe;
use crate::graph::model::PropertyMap;
use crate::graph::resolve::ResolvedNode;
use crate::target::Target;
use crate::templates::registry::{RenderContext, TemplateRegistry, TemplateRenderError};

pub(crate) mod gpio;
pub(crate) mod image;
pub(crate) mod keyboard;
pub(crate) mod props;
pub(crate) mod text;

pub use props::PropertyView;

/// Why a single node could not be rendered. Never fatal for the compile.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum NodeError {
    /// The type is recognized but its template is not registered for the target.
    #[error("no template '{name}'")]
    MissingTemplate {
        /// Logical template name that was looked up.
        name: String,
    },

    /// The template could not be filled.
    #[error(transparent)]
    Render(#[from] TemplateRenderError),

    /// The node's property table entry is not a JSON object.
    #[error("component properties must be an object, got {found}")]
    PropertiesNotObject {
        /// JSON kind of the entry.
        found: &'static str,
    },

    /// A property has the wrong type or an out-of-range value.
    #[error("property '{key}': {reason}")]
    InvalidProperty {
        /// Property key.
        key: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Renders source fragments for one node type.
pub trait ComponentGenerator: Send + Sync {
    /// Exact node `type` string this generator handles.
    fn type_name(&self) -> &str;

    /// Placeholder values for this node's template.
    fn context(
        &self,
        node: &ResolvedNode,
        props: &PropertyView<'_>,
        target: Target,
    ) -> Result<RenderContext, NodeError>;

    /// Top-level names the fragment binds for a node whose identifier is `label`.
    fn bound_names(&self, label: &str) -> Vec<String> {
        vec![label.to_string()]
    }

    /// Render the node's fragment with the registry's template for this type.
    fn render(
        &self,
        node: &ResolvedNode,
        props: &PropertyMap,
        templates: &TemplateRegistry,
    ) -> Result<String, NodeError> {
        let target = templates.target();
        let name = target.component_template(self.type_name());
        let template = templates
            .get(&name)
            .ok_or(NodeError::MissingTemplate { name })?;
        let view = PropertyView::new(props, &node.data);
        let ctx = self.context(node, &view, target)?;
        Ok(template.render(&ctx)?)
    }
}

/// Placeholders every component template may use.
///
/// - `label`: sanitized identifier
/// - `name`: the identifier as a string literal
/// - `display_label`, `node_type`, `node_id`: comment-safe raw text
pub fn base_context(node: &ResolvedNode, target: Target) -> RenderContext {
    RenderContext::new()
        .with("label", node.label.as_str())
        .with("name", target.str_literal(&node.label))
        .with("display_label", comment_safe(&node.display_label))
        .with("node_type", comment_safe(&node.node_type))
        .with("node_id", comment_safe(&node.id))
}

/// Registration table mapping node type strings to generators.
#[derive(Clone, Default)]
pub struct GeneratorRegistry {
    generators: BTreeMap<String, Arc<dyn ComponentGenerator>>,
}

impl GeneratorRegistry {
    /// Registry with no generators.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the built-in `text`, `image`, `keyboard` and `gpio` generators.
    pub fn builtin() -> Self {
        let mut reg = Self::empty();
        reg.register(text::TextGenerator);
        reg.register(image::ImageGenerator);
        reg.register(keyboard::KeyboardGenerator);
        reg.register(gpio::GpioGenerator);
        reg
    }

    /// Add `generator`, replacing any generator already registered for its type.
    pub fn register(&mut self, generator: impl ComponentGenerator + 'static) -> &mut Self {
        self.register_arc(Arc::new(generator))
    }

    /// [`GeneratorRegistry::register`] for an already shared generator.
    pub fn register_arc(&mut self, generator: Arc<dyn ComponentGenerator>) -> &mut Self {
        self.generators
            .insert(generator.type_name().to_string(), generator);
        self
    }

    /// Generator for the exact type string `node_type`.
    pub fn get(&self, node_type: &str) -> Option<&dyn ComponentGenerator> {
        self.generators.get(node_type).map(|g| g.as_ref())
    }

    /// Registered type names in sorted order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("types", &self.generators.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/components/registry.rs"]
mod tests;
