// ids.rs — Stable ID assignment for pings and metrics
//
// IDs are embedded into generated code and joined against downstream
// lookup tables keyed by the same values, so two independent generator
// invocations over the same tree must produce identical IDs. Centralized
// builds use a dense counter; local builds derive IDs from a SHA-1 of the
// metric identifier so builds with no shared registry still agree.
//
// Preconditions: tree built by the external parser (§ objects).
// Postconditions: every mapping is total over its input tree; ID 0 is
//                 never assigned.
// Failure modes: lookup misses surface as `IdError` (caller misuse).
// Side effects: none.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use sha1::{Digest, Sha1};

use crate::objects::{Metric, ObjectTree};
use crate::options::Options;

/// Size of the decentralized metric ID space; hashed IDs live in
/// `[1, 2^25)`.
pub const METRIC_ID_SPACE: u32 = 1 << 25;

// ── Errors ──────────────────────────────────────────────────────────────────

/// Lookup failure against a precomputed ID mapping.
///
/// These are programming-error class: they mean the mapping was built from
/// a different tree than the one being queried, and should halt generation
/// rather than be retried or masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    UnknownPing { name: String },
    UnknownMetric { category: String, name: String },
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdError::UnknownPing { name } => {
                write!(f, "no ID assigned for ping '{}'", name)
            }
            IdError::UnknownMetric { category, name } => {
                write!(f, "no ID assigned for metric '{}.{}'", category, name)
            }
        }
    }
}

impl std::error::Error for IdError {}

// ── Ping IDs ────────────────────────────────────────────────────────────────

/// Mapping from ping name to its ID: contiguous from 1, in tree order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingIds {
    map: IndexMap<String, u32>,
}

impl PingIds {
    /// Assign an ID to every ping in the tree, or `None` when the tree has
    /// no "pings" group at all. Callers must check for the group before
    /// use; a declared-but-empty group still yields an (empty) mapping.
    ///
    /// IDs are 1, 2, 3, … in the order ping names appear in the tree — no
    /// sorting, no gaps, no reuse. ID 0 is reserved. Cross-invocation
    /// stability is only as good as the input order the caller supplies.
    pub fn assign(objs: &ObjectTree) -> Option<Self> {
        let pings = objs.pings()?;
        let mut map = IndexMap::with_capacity(pings.len());
        for (index, name) in pings.keys().enumerate() {
            map.insert(name.clone(), index as u32 + 1);
        }
        Some(Self { map })
    }

    pub fn get(&self, name: &str) -> Result<u32, IdError> {
        self.map.get(name).copied().ok_or_else(|| IdError::UnknownPing {
            name: name.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Pings in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.map.iter().map(|(name, id)| (name.as_str(), *id))
    }
}

// ── Metric IDs ──────────────────────────────────────────────────────────────

/// Mapping from (category, name) to metric ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricIds {
    map: IndexMap<(String, String), u32>,
}

impl MetricIds {
    /// Assign an ID to every metric in the tree. The reserved "pings" and
    /// "tags" groups are never metrics and are skipped.
    ///
    /// Centralized builds (`is_local_build == false`) count up from 1 in
    /// category-then-declaration order; this needs a single authoritative
    /// pass over the schema. Local builds hash each metric identifier into
    /// `[0, 2^25)` and linearly probe past claimed slots, so independent
    /// builds converge without coordination. In both modes every ID is
    /// nonzero and unique.
    ///
    /// Local-mode contract: probe outcomes depend on which identifier
    /// claims a contested slot first, so cross-build agreement requires
    /// callers to present metrics in a canonical (e.g. sorted) order.
    pub fn assign(objs: &ObjectTree, options: &Options) -> Self {
        let mut map = IndexMap::with_capacity(objs.metric_count());
        if options.is_local_build {
            // Seeding with 0 keeps it permanently reserved: a probe can
            // never land on it.
            let mut claimed: HashSet<u32> = HashSet::from([0]);
            for (category, metrics) in objs.metric_categories() {
                for metric in metrics.values() {
                    let id = claim_slot(candidate_id(&metric.identifier()), &mut claimed);
                    map.insert((category.to_string(), metric.name.clone()), id);
                }
            }
        } else {
            let mut next = 1u32;
            for (category, metrics) in objs.metric_categories() {
                for name in metrics.keys() {
                    map.insert((category.to_string(), name.clone()), next);
                    next += 1;
                }
            }
        }
        Self { map }
    }

    pub fn get(&self, metric: &Metric) -> Result<u32, IdError> {
        self.map
            .get(&(metric.category.clone(), metric.name.clone()))
            .copied()
            .ok_or_else(|| IdError::UnknownMetric {
                category: metric.category.clone(),
                name: metric.name.clone(),
            })
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Metrics in assignment order, as ((category, name), id).
    pub fn iter(&self) -> impl Iterator<Item = (&(String, String), u32)> {
        self.map.iter().map(|(key, id)| (key, *id))
    }
}

/// Candidate ID for an identifier: its SHA-1 digest read as a big-endian
/// integer, reduced modulo 2^25 — i.e. the low 25 bits of the digest.
fn candidate_id(identifier: &str) -> u32 {
    let digest = Sha1::digest(identifier.as_bytes());
    let tail = u32::from_be_bytes([digest[16], digest[17], digest[18], digest[19]]);
    tail & (METRIC_ID_SPACE - 1)
}

/// Claim the first free slot at or after `candidate`, wrapping modulo 2^25.
fn claim_slot(candidate: u32, claimed: &mut HashSet<u32>) -> u32 {
    let mut id = candidate;
    while claimed.contains(&id) {
        id = (id + 1) % METRIC_ID_SPACE;
    }
    // The probe wraps but must never emit a value outside the ID space.
    assert!(id < METRIC_ID_SPACE, "metric ID {id} escaped the ID space");
    claimed.insert(id);
    id
}
