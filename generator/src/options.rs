// options.rs — Generator configuration
//
// Options arrive from the driving build system as a JSON blob; only the
// keys recognized here affect ID assignment.

use serde::{Deserialize, Serialize};

/// Configuration for the ID assignment core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Selects decentralized metric ID assignment: IDs derived by hashing
    /// the metric identifier, so independent builds converge on the same
    /// IDs without a shared authoritative counter.
    pub is_local_build: bool,
}

impl Options {
    /// Options for a decentralized (local) build.
    pub fn local() -> Self {
        Self {
            is_local_build: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_centralized() {
        assert!(!Options::default().is_local_build);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let opts: Options =
            serde_json::from_str(r#"{"is_local_build": true, "allow_reserved": false}"#)
                .expect("options should deserialize");
        assert!(opts.is_local_build);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let opts: Options = serde_json::from_str("{}").expect("options should deserialize");
        assert_eq!(opts, Options::default());
    }
}
