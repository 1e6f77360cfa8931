//! Graph to source compilation: per-node rendering with failure isolation, then assembly.

pub(crate) mod assemble;
pub(crate) mod compiler;
pub(crate) mod diagnostics;
pub(crate) mod fingerprint;
