//! Per-line flow values, independent of how they were produced.

use crate::{LineKey, Megawatts};
use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Mapping from line identity to flow (MW).
///
/// Iteration follows line identity order, so two assignments built from the
/// same network compare and serialize identically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowAssignment {
    flows: BTreeMap<LineKey, Megawatts>,
}

impl FlowAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the flow of a line
    pub fn insert(&mut self, key: LineKey, flow: Megawatts) {
        self.flows.insert(key, flow);
    }

    pub fn get(&self, from: &str, to: &str) -> Option<Megawatts> {
        self.get_key(&LineKey::new(from, to))
    }

    pub fn get_key(&self, key: &LineKey) -> Option<Megawatts> {
        self.flows.get(key).copied()
    }

    pub fn contains(&self, key: &LineKey) -> bool {
        self.flows.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LineKey, Megawatts)> {
        self.flows.iter().map(|(key, flow)| (key, *flow))
    }

    pub fn keys(&self) -> impl Iterator<Item = &LineKey> {
        self.flows.keys()
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Sum of all flows (MW)
    pub fn total_mw(&self) -> Megawatts {
        self.flows.values().sum()
    }
}

impl FromIterator<(LineKey, Megawatts)> for FlowAssignment {
    fn from_iter<I: IntoIterator<Item = (LineKey, Megawatts)>>(iter: I) -> Self {
        Self {
            flows: iter.into_iter().collect(),
        }
    }
}

#[derive(serde::Serialize)]
struct FlowEntry<'a> {
    from: &'a str,
    to: &'a str,
    flow_mw: f64,
}

// Struct keys can't be JSON object keys, so the map goes out as a list.
impl Serialize for FlowAssignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.flows.iter().map(|(key, flow)| FlowEntry {
            from: key.from.as_str(),
            to: key.to.as_str(),
            flow_mw: flow.value(),
        }))
    }
}
