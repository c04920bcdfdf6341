// catalog.rs — Constructor argument catalog
//
// Fixed registry of metric constructor arguments. Generated bindings call
// type constructors positionally, so the order declared here is load-
// bearing: a type with several optional arguments must receive them in
// exactly this order or values bind to the wrong parameter.

/// Constructor arguments common to every metric type, in canonical order.
pub const COMMON_ARGS: &[&str] = &["category", "name", "send_in_pings", "lifetime", "disabled"];

/// Every optional extra constructor argument, in canonical order. A type's
/// argument list appends the subset it supports in *this* order, never the
/// capability table's order.
pub const EXTRA_ARGS: &[&str] = &[
    "time_unit",
    "memory_unit",
    "allowed_extra_keys",
    "range_max",
    "bucket_count",
    "histogram_type",
    "ordered_labels",
];

/// Which optional arguments each known metric type supports. Unknown type
/// tags support none. Computed once here rather than probed per-metric at
/// runtime.
pub fn extra_args_for(type_tag: &str) -> &'static [&'static str] {
    match type_tag {
        "timespan" | "datetime" | "timing_distribution" => &["time_unit"],
        "memory_distribution" => &["memory_unit"],
        "custom_distribution" => &["range_max", "bucket_count"],
        "event" => &["allowed_extra_keys"],
        "labeled_boolean" | "labeled_counter" | "labeled_string" => &["ordered_labels"],
        _ => &[],
    }
}
