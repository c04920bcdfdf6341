// type_index.rs — Metric type and category discovery
//
// Single pass over the tree: allocate type IDs in first-seen order, derive
// each type's constructor argument list from the catalog, and collect the
// category names. Allocation order and presentation order deliberately
// differ — numeric IDs keep first-seen order while iteration is
// lexicographic — and both must be byte-reproducible, because generated
// files are diffed against committed copies in CI.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::catalog;
use crate::objects::ObjectTree;

/// Numeric ID and ordered constructor argument list for one metric type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    pub id: u32,
    pub args: Vec<&'static str>,
}

/// Metadata for every metric type and category present in a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeIndex {
    types: BTreeMap<String, TypeInfo>,
    categories: Vec<String>,
}

impl TypeIndex {
    /// Build the index. The reserved "pings" and "tags" groups are
    /// stripped first. Type IDs are 1, 2, 3, … in the order type tags are
    /// first seen; `types()` then iterates sorted by tag, and
    /// `categories()` is sorted alphabetically.
    pub fn build(objs: &ObjectTree) -> Self {
        // Phase 1: allocation, insertion-ordered.
        let mut seen: IndexMap<String, TypeInfo> = IndexMap::new();
        let mut categories = Vec::new();
        for (category, metrics) in objs.metric_categories() {
            categories.push(category.to_string());
            for metric in metrics.values() {
                if seen.contains_key(&metric.type_tag) {
                    continue;
                }
                let id = seen.len() as u32 + 1;
                let supported = catalog::extra_args_for(&metric.type_tag);
                let mut args: Vec<&'static str> = catalog::COMMON_ARGS.to_vec();
                // Catalog order wins, whatever order the capability table
                // lists its arguments in.
                for &arg in catalog::EXTRA_ARGS {
                    if supported.contains(&arg) {
                        args.push(arg);
                    }
                }
                seen.insert(metric.type_tag.clone(), TypeInfo { id, args });
            }
        }

        // Phase 2: presentation, lexicographic.
        let types: BTreeMap<String, TypeInfo> = seen.into_iter().collect();
        categories.sort();
        Self { types, categories }
    }

    pub fn get(&self, type_tag: &str) -> Option<&TypeInfo> {
        self.types.get(type_tag)
    }

    /// Types sorted by tag.
    pub fn types(&self) -> impl Iterator<Item = (&str, &TypeInfo)> {
        self.types.iter().map(|(tag, info)| (tag.as_str(), info))
    }

    /// Distinct category names, sorted.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Compact canonical JSON (sorted type keys, no whitespace), suitable
    /// for generated-file stability checks.
    pub fn canonical_json(&self) -> String {
        serde_json::to_string(self).expect("type index serialization is infallible")
    }

    /// Hex-encoded SHA-256 of `canonical_json()`. Two invocations over the
    /// same tree produce the same fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_json().as_bytes());
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}
