use serde::{Deserialize, Serialize};

use crate::format_seconds;

/// Session statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(missing_docs)] // rationale: these are the same fields as in Transmission RPC
pub struct Stats {
    pub active_torrent_count: u32,

    pub paused_torrent_count: u32,

    pub torrent_count: u32,

    pub download_speed: u64,

    pub upload_speed: u64,

    pub current_stats: StatsDetails,

    pub cumulative_stats: StatsDetails,
}

impl Stats {
    /// How long the daemon has been running in its current session, e.g. `2h13m0s`.
    pub fn current_active_time(&self) -> String {
        format_seconds(self.current_stats.seconds_active)
    }

    /// How long the daemon has been running across all sessions.
    pub fn cumulative_active_time(&self) -> String {
        format_seconds(self.cumulative_stats.seconds_active)
    }
}

/// Detailed statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct StatsDetails {
    pub downloaded_bytes: u64,

    pub files_added: u64,

    pub seconds_active: u64,

    pub session_count: u64,

    pub uploaded_bytes: u64,
}
