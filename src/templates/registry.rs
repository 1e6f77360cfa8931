use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::foundation::error::{StimflowError, StimflowResult};
use crate::target::Target;

/// File suffix marking template files inside a template directory.
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Placeholder values for one template render.
///
/// Values are inserted verbatim; callers are responsible for turning data into target-language
/// literals first (see [`Target::literal`]).
#[derive(Clone, Debug, Default)]
pub struct RenderContext {
    vars: HashMap<String, String>,
}

impl RenderContext {
    /// Empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Builder-style [`RenderContext::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Current value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

/// Failure to render one template.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("template '{template}': {message}")]
pub struct TemplateRenderError {
    /// Logical template name.
    pub template: String,
    /// Underlying formatter message.
    pub message: String,
}

/// A named code template using `{placeholder}` substitution with `{{`/`}}` escapes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    name: String,
    source: String,
}

impl Template {
    /// Template `name` with the given source text.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Logical name, e.g. `components/text.py`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitute every placeholder from `ctx`. A placeholder with no value is an error.
    pub fn render(&self, ctx: &RenderContext) -> Result<String, TemplateRenderError> {
        strfmt::strfmt(&self.source, &ctx.vars).map_err(|e| TemplateRenderError {
            template: self.name.clone(),
            message: e.to_string(),
        })
    }
}

/// Immutable set of named templates for one [`Target`].
///
/// Built once (from the embedded set, a directory, or in memory) and then only read, so a single
/// registry can be shared across threads behind an `Arc`.
#[derive(Clone, Debug)]
pub struct TemplateRegistry {
    target: Target,
    templates: BTreeMap<String, Template>,
}

impl TemplateRegistry {
    /// The template set compiled into the crate for `target`.
    pub fn builtin(target: Target) -> Self {
        Self::from_templates(target, super::builtin::sources(target).iter().copied())
    }

    /// Registry holding exactly the given `(name, source)` pairs.
    pub fn from_templates<N, S>(target: Target, templates: impl IntoIterator<Item = (N, S)>) -> Self
    where
        N: Into<String>,
        S: Into<String>,
    {
        let templates = templates
            .into_iter()
            .map(|(name, source)| {
                let name = name.into();
                (name.clone(), Template::new(name, source))
            })
            .collect();
        Self { target, templates }
    }

    /// Load every `*.tmpl` file below `dir`.
    ///
    /// The logical name is the path relative to `dir`, `/`-separated, without the `.tmpl`
    /// suffix: `components/text.py.tmpl` becomes `components/text.py`.
    pub fn from_dir(dir: impl AsRef<Path>, target: Target) -> StimflowResult<Self> {
        let mut out = Self {
            target,
            templates: BTreeMap::new(),
        };
        out.load_dir(dir.as_ref())?;
        Ok(out)
    }

    /// The embedded set for `target`, with any templates found in `dir` replacing or extending it.
    pub fn builtin_with_overrides(dir: impl AsRef<Path>, target: Target) -> StimflowResult<Self> {
        let mut out = Self::builtin(target);
        out.load_dir(dir.as_ref())?;
        Ok(out)
    }

    fn load_dir(&mut self, root: &Path) -> StimflowResult<()> {
        let mut files = Vec::new();
        collect_template_files(root, root, &mut files)?;
        for (name, path) in files {
            let source = fs::read_to_string(&path).map_err(|e| {
                StimflowError::template(format!("read template '{}': {e}", path.display()))
            })?;
            tracing::debug!(template = %name, path = %path.display(), "loaded template");
            self.templates
                .insert(name.clone(), Template::new(name, source));
        }
        Ok(())
    }

    /// Target this registry emits for.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Template registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Registered logical names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether no templates are registered.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The assembly template for this registry's target.
    pub fn assembly(&self) -> StimflowResult<&Template> {
        let name = self.target.assembly_template();
        self.templates
            .get(&name)
            .ok_or(StimflowError::MissingAssemblyTemplate { name })
    }
}

fn collect_template_files(
    root: &Path,
    dir: &Path,
    out: &mut Vec<(String, std::path::PathBuf)>,
) -> StimflowResult<()> {
    let entries = fs::read_dir(dir).map_err(|e| {
        StimflowError::template(format!("read template dir '{}': {e}", dir.display()))
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            StimflowError::template(format!("read template dir '{}': {e}", dir.display()))
        })?;
        paths.push(entry.path());
    }
    // Directory iteration order is platform dependent.
    paths.sort();

    for path in paths {
        if path.is_dir() {
            collect_template_files(root, &path, out)?;
            continue;
        }
        let Ok(rel) = path.strip_prefix(root) else {
            continue;
        };
        let rel = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if let Some(name) = rel.strip_suffix(TEMPLATE_SUFFIX) {
            out.push((name.to_string(), path));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/templates/registry.rs"]
mod tests;
