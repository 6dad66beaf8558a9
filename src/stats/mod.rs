//! Sweep statistics
//!
//! Pure derivations over the final topic set and archive. No state, no
//! failure modes.

/// Online/offline topic counts with their percentage share.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepStats {
    /// Topics in the archive
    pub offline_count: usize,
    /// Topics that survived the sweep untouched
    pub online_count: usize,
    /// Share of archived topics, rounded to two decimals
    pub offline_percentage: f64,
    /// Share of untouched topics, rounded to two decimals
    pub online_percentage: f64,
}

impl SweepStats {
    /// Derive statistics from the final state: the archive size and the
    /// total number of loaded topics.
    pub fn calculate(total_topics: usize, archived: usize) -> Self {
        let offline_count = archived;
        let online_count = total_topics.saturating_sub(archived);
        Self::from_counts(offline_count, online_count)
    }

    /// Build statistics from raw counts.
    ///
    /// The denominator floors at 1 so that zero topics yield 0% / 0%
    /// instead of a division by zero.
    pub fn from_counts(offline_count: usize, online_count: usize) -> Self {
        let denominator = (offline_count + online_count).max(1) as f64;
        Self {
            offline_count,
            online_count,
            offline_percentage: round_two_decimals(offline_count as f64 * 100.0 / denominator),
            online_percentage: round_two_decimals(online_count as f64 * 100.0 / denominator),
        }
    }

    /// Render the offline pair as `"<count> (<pct>%)"`.
    pub fn offline_summary(&self) -> String {
        format!("{} ({:.2}%)", self.offline_count, self.offline_percentage)
    }

    /// Render the online pair as `"<count> (<pct>%)"`.
    pub fn online_summary(&self) -> String {
        format!("{} ({:.2}%)", self.online_count, self.online_percentage)
    }
}

fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
