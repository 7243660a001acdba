//! Type conversions from wire responses to `transmission_rpc_types`.

use transmission_rpc_types::Stats;

use crate::command::SessionStatsResponse;

impl From<SessionStatsResponse> for Stats {
    fn from(value: SessionStatsResponse) -> Self {
        Self {
            active_torrent_count: value.active_torrent_count,
            paused_torrent_count: value.paused_torrent_count,
            torrent_count: value.torrent_count,
            download_speed: value.download_speed,
            upload_speed: value.upload_speed,
            current_stats: value.current_stats,
            cumulative_stats: value.cumulative_stats,
        }
    }
}
