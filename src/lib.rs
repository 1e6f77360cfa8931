//! stimflow compiles node-graph experiment descriptions into runnable source programs.
//!
//! A visual editor stores an experiment as a graph of typed nodes (`text`, `image`, `keyboard`,
//! `gpio`, ...) plus a per-node property table. The [`Compiler`] turns that into:
//!
//! - a desktop program ([`Target::Desktop`], PsychoPy-style Python)
//! - a browser program ([`Target::Browser`], PsychoJS-style JavaScript)
//!
//! Each node type has a [`ComponentGenerator`] registered in a [`GeneratorRegistry`]; each target
//! has a [`TemplateRegistry`] of code templates. Nodes that cannot be rendered are reported as
//! [`Diagnostic`]s and left out; only whole-compile problems surface as [`StimflowError`].
//!
//! The [`telemetry`] module carries the device messaging channel used alongside compiled
//! experiments.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub(crate) mod compile;
pub(crate) mod components;
pub(crate) mod graph;
pub(crate) mod schema;
pub(crate) mod target;
pub(crate) mod templates;

/// Layered configuration (defaults, TOML file, environment).
pub mod config;
/// Tracing subscriber setup for binaries.
pub mod logging;
/// Device telemetry channel.
pub mod telemetry;

pub use crate::foundation::error::{StimflowError, StimflowResult};
pub use crate::foundation::ident::{IDENT_PREFIX, comment_safe, is_identifier, sanitize};

pub use crate::compile::assemble::{FRAGMENT_SEPARATOR, GeneratedFragment, compose};
pub use crate::compile::compiler::{CompileReport, CompiledOutput, Compiler, compile_targets};
pub use crate::compile::diagnostics::{Diagnostic, DiagnosticKind};
pub use crate::compile::fingerprint::SourceFingerprint;
pub use crate::components::gpio::{GpioGenerator, MAX_GPIO_PIN};
pub use crate::components::image::ImageGenerator;
pub use crate::components::keyboard::KeyboardGenerator;
pub use crate::components::text::TextGenerator;
pub use crate::components::{
    ComponentGenerator, GeneratorRegistry, NodeError, PropertyView, base_context,
};
pub use crate::config::{CompilerConfig, LogFormat, LoggingConfig, StimflowConfig};
pub use crate::graph::model::{
    ComponentPropertyTable, ExperimentPayload, FlowGraph, FlowNode, PropertyMap,
};
pub use crate::graph::resolve::{ResolvedNode, default_label, resolve};
pub use crate::target::Target;
pub use crate::templates::registry::{
    RenderContext, TEMPLATE_SUFFIX, Template, TemplateRegistry, TemplateRenderError,
};
