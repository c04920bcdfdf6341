// objects.rs — Parsed entity tree for the metrics schema
//
// Data model consumed by the ID assigners and the type indexer. The tree
// is produced by the external schema parser; this module defines its shape
// and the builder surface the parser fills. Group and entity iteration
// order is parser insertion order. Key uniqueness is the parser's
// contract; re-inserting an existing key replaces the record in place.

use indexmap::IndexMap;

// ── Entity records ──────────────────────────────────────────────────────────

/// A single metric declaration, identified by (category, name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub category: String,
    pub name: String,
    /// Discriminator naming the metric type this declaration instantiates
    /// (e.g. `"counter"`, `"custom_distribution"`).
    pub type_tag: String,
}

impl Metric {
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        type_tag: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            type_tag: type_tag.into(),
        }
    }

    /// Stable string key, unique across the whole tree. This is the hash
    /// input for decentralized ID assignment, so its format must never
    /// change: `"category.name"`, or `"name"` alone when the category is
    /// empty.
    pub fn identifier(&self) -> String {
        if self.category.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.category, self.name)
        }
    }
}

/// A named, independently-scheduled bundle of metric data submitted as a
/// unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ping {
    pub name: String,
    pub include_client_id: bool,
    pub send_if_empty: bool,
    /// Allowed submission reasons, sorted by the parser.
    pub reason_codes: Vec<String>,
}

impl Ping {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            include_client_id: true,
            send_if_empty: false,
            reason_codes: Vec::new(),
        }
    }
}

/// An annotation metrics can reference for filtering. Tags never receive
/// IDs; their group exists in the tree only to be stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub description: String,
}

// ── Groups ──────────────────────────────────────────────────────────────────

/// Group kind reserved for pings.
pub const PINGS_GROUP: &str = "pings";
/// Group kind reserved for tags.
pub const TAGS_GROUP: &str = "tags";

/// One top-level group: the reserved "pings"/"tags" groups, or a metric
/// category keyed by its name.
#[derive(Debug, Clone)]
pub enum Group {
    Pings(IndexMap<String, Ping>),
    Tags(IndexMap<String, Tag>),
    Metrics(IndexMap<String, Metric>),
}

// ── Object tree ─────────────────────────────────────────────────────────────

/// The full parsed tree: group kind → entities, both insertion-ordered.
///
/// Iteration order is whatever the parser produced. Consumers must treat it
/// as unordered input and not rely on it for determinism beyond what they
/// explicitly sort.
#[derive(Debug, Clone, Default)]
pub struct ObjectTree {
    groups: IndexMap<String, Group>,
}

impl ObjectTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a ping, creating the "pings" group on first use.
    pub fn add_ping(&mut self, ping: Ping) {
        let group = self
            .groups
            .entry(PINGS_GROUP.to_string())
            .or_insert_with(|| Group::Pings(IndexMap::new()));
        match group {
            Group::Pings(pings) => {
                pings.insert(ping.name.clone(), ping);
            }
            _ => debug_assert!(false, "\"pings\" group holds a non-ping variant"),
        }
    }

    /// Insert a tag, creating the "tags" group on first use.
    pub fn add_tag(&mut self, tag: Tag) {
        let group = self
            .groups
            .entry(TAGS_GROUP.to_string())
            .or_insert_with(|| Group::Tags(IndexMap::new()));
        match group {
            Group::Tags(tags) => {
                tags.insert(tag.name.clone(), tag);
            }
            _ => debug_assert!(false, "\"tags\" group holds a non-tag variant"),
        }
    }

    /// Insert a metric under its category group, created on first use.
    /// Category names colliding with the reserved group kinds are a parser
    /// contract violation.
    pub fn add_metric(&mut self, metric: Metric) {
        debug_assert!(
            metric.category != PINGS_GROUP && metric.category != TAGS_GROUP,
            "metric category collides with a reserved group kind"
        );
        let group = self
            .groups
            .entry(metric.category.clone())
            .or_insert_with(|| Group::Metrics(IndexMap::new()));
        match group {
            Group::Metrics(metrics) => {
                metrics.insert(metric.name.clone(), metric);
            }
            _ => debug_assert!(false, "category group holds a non-metric variant"),
        }
    }

    /// The "pings" group, or `None` when the schema declared no pings.
    /// An empty group (declared but with every ping removed) is still
    /// `Some`.
    pub fn pings(&self) -> Option<&IndexMap<String, Ping>> {
        match self.groups.get(PINGS_GROUP) {
            Some(Group::Pings(pings)) => Some(pings),
            _ => None,
        }
    }

    /// Metric categories in insertion order, with the reserved "pings" and
    /// "tags" groups stripped.
    pub fn metric_categories(&self) -> impl Iterator<Item = (&str, &IndexMap<String, Metric>)> {
        self.groups.iter().filter_map(|(kind, group)| match group {
            Group::Metrics(metrics) => Some((kind.as_str(), metrics)),
            Group::Pings(_) | Group::Tags(_) => None,
        })
    }

    /// Total number of metrics across every category.
    pub fn metric_count(&self) -> usize {
        self.metric_categories().map(|(_, m)| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
