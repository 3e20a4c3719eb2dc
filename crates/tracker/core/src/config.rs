/// Tracker configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackerConfig {
    /// Text the host shows for the round marker. The wire codec identifies the
    /// marker by this label.
    pub round_marker_label: String,

    /// Round number written into the marker when combat starts.
    pub first_round: u32,

    /// Remaining duration at which a timed effect expires.
    pub expiry_threshold: u32,

    /// Upper bound on the number of entries in one sequence.
    pub max_entries: usize,
}

impl TrackerConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ROUND_MARKER_LABEL: &'static str = "==== Start of Round ====";
    pub const DEFAULT_FIRST_ROUND: u32 = 1;
    pub const DEFAULT_EXPIRY_THRESHOLD: u32 = 0;
    pub const DEFAULT_MAX_ENTRIES: usize = 256;

    pub fn new() -> Self {
        Self {
            round_marker_label: Self::DEFAULT_ROUND_MARKER_LABEL.to_string(),
            first_round: Self::DEFAULT_FIRST_ROUND,
            expiry_threshold: Self::DEFAULT_EXPIRY_THRESHOLD,
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        }
    }

    pub fn with_round_marker_label(mut self, label: impl Into<String>) -> Self {
        self.round_marker_label = label.into();
        self
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new()
    }
}
