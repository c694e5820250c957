use std::collections::HashMap;
use std::hash::Hash;

/// Entries whose magnitude decays below this are flushed from the store.
const TRACE_FLOOR: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceKind {
    /// Visited entries are incremented by one.
    Accumulating,
    /// Visited entries are reset to one.
    Replacing,
}

/// Sparse eligibility trace keyed by arbitrary feature identifiers.
///
/// Only nonzero entries are stored, so the per-step decay touches the
/// recently visited features rather than the full weight vector.
#[derive(Clone, Debug)]
pub struct Trace<K> {
    kind: TraceKind,
    active: HashMap<K, f64>,
}

impl<K: Eq + Hash> Trace<K> {
    pub fn new(kind: TraceKind) -> Trace<K> {
        Trace {
            kind,
            active: HashMap::new(),
        }
    }

    pub fn replacing() -> Trace<K> { Trace::new(TraceKind::Replacing) }

    pub fn accumulating() -> Trace<K> { Trace::new(TraceKind::Accumulating) }

    /// Scale every entry by `rate`, flushing entries that fall below the
    /// retention floor.
    pub fn decay(&mut self, rate: f64) {
        self.active.retain(|_, e| {
            *e *= rate;

            e.abs() >= TRACE_FLOOR
        });
    }

    /// Mark `key` as visited.
    pub fn visit(&mut self, key: K) {
        let entry = self.active.entry(key).or_insert(0.0);

        match self.kind {
            TraceKind::Accumulating => *entry += 1.0,
            TraceKind::Replacing => *entry = 1.0,
        }
    }

    pub fn reset(&mut self) { self.active.clear(); }

    pub fn get(&self, key: &K) -> f64 { self.active.get(key).copied().unwrap_or(0.0) }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &f64)> { self.active.iter() }

    pub fn len(&self) -> usize { self.active.len() }

    pub fn is_empty(&self) -> bool { self.active.is_empty() }
}
