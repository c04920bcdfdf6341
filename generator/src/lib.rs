// metricgen — ID assignment core for the telemetry schema code generator
//
// Pure, deterministic computations over a parsed schema tree: ping IDs,
// metric IDs (centralized or hash-derived), and metric type metadata.
// Schema parsing and template rendering live in the surrounding generator.

pub mod catalog;
pub mod ids;
pub mod objects;
pub mod options;
pub mod type_index;
