use serde::{Deserialize, Serialize};

/// Options affecting a reconstruction run
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructOptions {
    pub verbose: bool,            // record debug diagnostics
    pub quiet: bool,              // record nothing at all
    pub warnings_as_errors: bool, // promote warnings to errors
    pub follow_callees: bool,     // walk free-function callees into the call graph
}

impl ReconstructOptions {
    pub fn verbose() -> Self {
        ReconstructOptions {
            verbose: true,
            ..Default::default()
        }
    }

    pub fn quiet() -> Self {
        ReconstructOptions {
            quiet: true,
            ..Default::default()
        }
    }
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        ReconstructOptions {
            verbose: false,
            quiet: false,
            warnings_as_errors: false,
            follow_callees: true,
        }
    }
}
