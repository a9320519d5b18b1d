//! Placeholder naming and parameter bindings.

use hqlkit_proto::{ParameterBinding, Value};
use rand::RngCore;
use std::collections::HashSet;

/// Fewest random bytes used for a placeholder suffix.
pub const MIN_SUFFIX_BYTES: usize = 4;

/// Most random bytes used for a placeholder suffix.
pub const MAX_SUFFIX_BYTES: usize = 32;

/// Generates unique placeholder names and records what they bind.
///
/// Names are `<stem>_<hex>`; a name that was already handed out in this query
/// is regenerated.
#[derive(Debug)]
pub struct Parameters {
    suffix_bytes: usize,
    used: HashSet<String>,
    bindings: Vec<ParameterBinding>,
}

impl Parameters {
    /// Create a generator using `suffix_bytes` random bytes per suffix,
    /// clamped to `MIN_SUFFIX_BYTES..=MAX_SUFFIX_BYTES`.
    pub fn new(suffix_bytes: usize) -> Self {
        Self {
            suffix_bytes: suffix_bytes.clamp(MIN_SUFFIX_BYTES, MAX_SUFFIX_BYTES),
            used: HashSet::new(),
            bindings: Vec::new(),
        }
    }

    /// A fresh placeholder name for `stem`, without the leading `:`.
    pub fn fresh_name(&mut self, stem: &str) -> String {
        let mut bytes = vec![0u8; self.suffix_bytes];
        loop {
            rand::thread_rng().fill_bytes(&mut bytes);
            let name = format!("{stem}_{}", hex::encode(&bytes));
            if self.used.insert(name.clone()) {
                return name;
            }
        }
    }

    /// Bind `values` to a fresh placeholder and return its name.
    pub fn bind(&mut self, stem: &str, values: Vec<Value>) -> String {
        let name = self.fresh_name(stem);
        self.bindings.push(ParameterBinding {
            name: name.clone(),
            values,
        });
        name
    }

    /// Bindings in the order they were made.
    pub fn bindings(&self) -> &[ParameterBinding] {
        &self.bindings
    }

    /// Consume the generator, returning its bindings.
    pub fn into_bindings(self) -> Vec<ParameterBinding> {
        self.bindings
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::new(8)
    }
}
