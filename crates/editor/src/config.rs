use serde::{Deserialize, Serialize};

/// Tunable editor timings, in host ticks. The defaults are the empirically
/// tuned values the engine ships with; hosts override them per platform.
/// Zero means "use the default".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EditorConfig {
    /// Minimum interval between two breadcrumb (ancestor path) writes.
    #[serde(default)]
    pub node_change_threshold: u64,
    /// Interval between content-ready polls during initialization.
    #[serde(default)]
    pub ready_poll_interval: u64,
    /// Number of content-ready polls before silently giving up.
    #[serde(default)]
    pub ready_poll_retries: u32,
}

impl EditorConfig {
    pub(crate) fn with_defaults(mut self) -> Self {
        if self.node_change_threshold == 0 {
            self.node_change_threshold = 3;
        }
        if self.ready_poll_interval == 0 {
            self.ready_poll_interval = 20;
        }
        if self.ready_poll_retries == 0 {
            self.ready_poll_retries = 250;
        }
        self
    }
}
