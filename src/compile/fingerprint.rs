use serde::Serialize;
use std::fmt;
use xxhash_rust::xxh3::Xxh3;

use crate::target::Target;

const XXH3_SEED: u64 = 0x5f1c_0a7e_d3b2_9e41;

/// Stable content hash of generated source, used to tell whether a stored program changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SourceFingerprint(pub u64);

impl fmt::Display for SourceFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Fingerprint `source` as emitted for `target`.
pub(crate) fn fingerprint_source(target: Target, source: &str) -> SourceFingerprint {
    let mut h = Xxh3::with_seed(XXH3_SEED);
    h.update(target.name().as_bytes());
    h.update(&[0]);
    h.update(&(source.len() as u64).to_le_bytes());
    h.update(source.as_bytes());
    SourceFingerprint(h.digest())
}
