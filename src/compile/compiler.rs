use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::compile::assemble::{GeneratedFragment, compose};
use crate::compile::diagnostics::{Diagnostic, DiagnosticKind};
use crate::compile::fingerprint::{SourceFingerprint, fingerprint_source};
use crate::components::{GeneratorRegistry, NodeError};
use crate::config::{CompilerConfig, DEFAULT_MAX_NODES};
use crate::foundation::error::{StimflowError, StimflowResult};
use crate::graph::model::{ComponentPropertyTable, ExperimentPayload, FlowGraph, FlowNode};
use crate::graph::resolve::{property_entry_kind, resolve};
use crate::target::Target;
use crate::templates::registry::TemplateRegistry;

/// Final program text for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledOutput {
    /// Name the program was compiled under.
    pub experiment_name: String,
    /// Target language.
    pub target: Target,
    /// Complete source text.
    pub source_text: String,
    /// Hash of `source_text`.
    pub fingerprint: SourceFingerprint,
}

/// Everything one compile produced.
#[derive(Debug, Clone)]
pub struct CompileReport {
    /// The assembled program.
    pub output: CompiledOutput,
    /// Per-node findings, in node order.
    pub diagnostics: Vec<Diagnostic>,
    /// Fragments that made it into the program, in node order.
    pub fragments: Vec<GeneratedFragment>,
}

impl CompileReport {
    /// The assembled source text.
    pub fn source_text(&self) -> &str {
        &self.output.source_text
    }

    /// Whether every node was emitted without findings.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of nodes left out of the program.
    pub fn omitted(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.omits_node()).count()
    }
}

/// Compiles experiment graphs into source for one target.
///
/// Registries are shared and never mutated, so a `Compiler` can be cloned cheaply and used from
/// any number of threads at once.
#[derive(Clone, Debug)]
pub struct Compiler {
    templates: Arc<TemplateRegistry>,
    generators: Arc<GeneratorRegistry>,
    max_nodes: usize,
}

impl Compiler {
    /// Compiler with the embedded templates and built-in generators for `target`.
    pub fn new(target: Target) -> Self {
        Self::with_registries(
            Arc::new(TemplateRegistry::builtin(target)),
            Arc::new(GeneratorRegistry::builtin()),
        )
    }

    /// Compiler over caller-supplied registries. The target is the template registry's.
    pub fn with_registries(
        templates: Arc<TemplateRegistry>,
        generators: Arc<GeneratorRegistry>,
    ) -> Self {
        Self {
            templates,
            generators,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }

    /// Builder-style node bound.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Compiler for `target` honoring `config`.
    ///
    /// With `template_dir` set, templates under `<template_dir>/<target>/` replace or extend the
    /// embedded ones; a missing subdirectory leaves the embedded set as is.
    pub fn from_config(config: &CompilerConfig, target: Target) -> StimflowResult<Self> {
        let templates = match &config.template_dir {
            Some(dir) => {
                let dir = dir.join(target.name());
                if dir.is_dir() {
                    TemplateRegistry::builtin_with_overrides(&dir, target)?
                } else {
                    tracing::debug!(dir = %dir.display(), "no template overrides for target");
                    TemplateRegistry::builtin(target)
                }
            }
            None => TemplateRegistry::builtin(target),
        };
        Ok(
            Self::with_registries(Arc::new(templates), Arc::new(GeneratorRegistry::builtin()))
                .with_max_nodes(config.max_nodes),
        )
    }

    /// Target this compiler emits for.
    pub fn target(&self) -> Target {
        self.templates.target()
    }

    /// Template registry in use.
    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    /// Generator registry in use.
    pub fn generators(&self) -> &GeneratorRegistry {
        &self.generators
    }

    /// Configured node bound.
    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Compile a raw graph object to source text, discarding diagnostics.
    pub fn compile(
        &self,
        experiment_name: &str,
        graph: &Value,
        props: &ComponentPropertyTable,
    ) -> StimflowResult<String> {
        Ok(self
            .compile_report(experiment_name, graph, props)?
            .output
            .source_text)
    }

    /// Compile a raw graph object, keeping per-node diagnostics.
    pub fn compile_report(
        &self,
        experiment_name: &str,
        graph: &Value,
        props: &ComponentPropertyTable,
    ) -> StimflowResult<CompileReport> {
        self.templates.assembly()?;
        let graph = FlowGraph::from_value(graph)?;
        self.compile_graph(experiment_name, &graph, props)
    }

    /// Compile a stored experiment document.
    pub fn compile_payload(
        &self,
        experiment_name: &str,
        payload: &ExperimentPayload,
    ) -> StimflowResult<CompileReport> {
        self.compile_graph(experiment_name, &payload.react_flow, &payload.component_props)
    }

    /// Compile an already typed graph.
    ///
    /// Nodes are visited once, in order. Unknown types, non-object property entries and failing
    /// generators are recorded as diagnostics and the node is left out. Identifiers that clash
    /// with an earlier node or with a name the target reserves are reported but still emitted.
    /// Only a missing or unrenderable assembly template and an oversized graph fail the call.
    #[tracing::instrument(
        skip(self, graph, props),
        fields(target = %self.target(), nodes = graph.nodes.len())
    )]
    pub fn compile_graph(
        &self,
        experiment_name: &str,
        graph: &FlowGraph,
        props: &ComponentPropertyTable,
    ) -> StimflowResult<CompileReport> {
        self.templates.assembly()?;
        if graph.nodes.len() > self.max_nodes {
            return Err(StimflowError::TooManyNodes {
                count: graph.nodes.len(),
                max: self.max_nodes,
            });
        }

        let mut fragments = Vec::with_capacity(graph.nodes.len());
        let mut diagnostics = Vec::new();
        let mut identifiers: HashMap<String, String> = HashMap::new();

        for node in &graph.nodes {
            let Some(generator) = self.generators.get(&node.node_type) else {
                tracing::debug!(node_id = %node.id, node_type = %node.node_type, "unsupported node type, skipped");
                diagnostics.push(diagnostic(node, DiagnosticKind::UnsupportedNodeType));
                continue;
            };

            let rendered = match property_entry_kind(&node.id, props) {
                Some(found) => Err(NodeError::PropertiesNotObject { found }),
                None => {
                    let (resolved, node_props) = resolve(node, props);
                    generator
                        .render(&resolved, &node_props, &self.templates)
                        .map(|code| (resolved, code))
                }
            };
            let (resolved, code) = match rendered {
                Ok(ok) => ok,
                Err(err) => {
                    tracing::warn!(node_id = %node.id, node_type = %node.node_type, error = %err, "node render failed, skipped");
                    diagnostics.push(diagnostic(
                        node,
                        DiagnosticKind::NodeRenderFailure {
                            cause: err.to_string(),
                        },
                    ));
                    continue;
                }
            };

            let names = generator.bound_names(&resolved.label);
            for name in &names {
                if self.target().is_reserved(name) {
                    tracing::warn!(node_id = %node.id, identifier = %name, "identifier is reserved in target");
                    diagnostics.push(diagnostic(
                        node,
                        DiagnosticKind::ReservedIdentifier {
                            identifier: name.clone(),
                        },
                    ));
                }
                if let Some(first) = identifiers.get(name) {
                    tracing::warn!(node_id = %node.id, identifier = %name, first_node_id = %first, "identifier collision");
                    diagnostics.push(diagnostic(
                        node,
                        DiagnosticKind::IdentifierCollision {
                            identifier: name.clone(),
                            first_node_id: first.clone(),
                        },
                    ));
                }
            }
            for name in names {
                identifiers.entry(name).or_insert_with(|| node.id.clone());
            }

            fragments.push(GeneratedFragment {
                node_id: node.id.clone(),
                code,
            });
        }

        let source_text = compose(&self.templates, experiment_name, &fragments)?;
        tracing::debug!(
            fragments = fragments.len(),
            diagnostics = diagnostics.len(),
            bytes = source_text.len(),
            "compiled"
        );

        Ok(CompileReport {
            output: CompiledOutput {
                experiment_name: experiment_name.to_string(),
                target: self.target(),
                fingerprint: fingerprint_source(self.target(), &source_text),
                source_text,
            },
            diagnostics,
            fragments,
        })
    }
}

fn diagnostic(node: &FlowNode, kind: DiagnosticKind) -> Diagnostic {
    Diagnostic {
        node_id: node.id.clone(),
        node_type: node.node_type.clone(),
        kind,
    }
}

/// Compile `payload` with every compiler in parallel. Results are in `compilers` order.
pub fn compile_targets(
    compilers: &[Compiler],
    experiment_name: &str,
    payload: &ExperimentPayload,
) -> Vec<StimflowResult<CompileReport>> {
    compilers
        .par_iter()
        .map(|c| c.compile_payload(experiment_name, payload))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
