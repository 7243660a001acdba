//! Shared test utilities and fixtures.

use serde_json::{Value, json};
use transmission_rpc_types::{Status, StatsDetails, Torrent};

use crate::command::SessionStatsResponse;

pub(crate) fn make_test_torrent(id: i64, name: &str, hash: &str) -> Torrent {
    Torrent {
        id,
        name: name.to_string(),
        hash_string: hash.to_string(),
        status: Status::Downloading,
        added_date: 1_700_000_000 + id,
        download_dir: "/downloads".to_string(),
        left_until_done: 500,
        size_when_done: 1000,
        percent_done: 0.5,
        eta: 120,
        total_size: 1000,
        ..Default::default()
    }
}

pub(crate) fn make_test_stats() -> SessionStatsResponse {
    SessionStatsResponse {
        active_torrent_count: 1,
        cumulative_stats: StatsDetails {
            downloaded_bytes: 1000,
            files_added: 5,
            seconds_active: 3600,
            session_count: 10,
            uploaded_bytes: 500,
        },
        current_stats: StatsDetails {
            downloaded_bytes: 100,
            files_added: 1,
            seconds_active: 600,
            session_count: 1,
            uploaded_bytes: 50,
        },
        download_speed: 1000,
        paused_torrent_count: 0,
        torrent_count: 1,
        upload_speed: 500,
    }
}

/// A successful answer carrying `arguments`, as the daemon would send it.
pub(crate) fn rpc_body(arguments: Value) -> Vec<u8> {
    serde_json::to_vec(&json!({"arguments": arguments, "result": "success"}))
        .expect("fixture serializes")
}

/// The torrent-get answer for `torrents`.
pub(crate) fn torrents_body(torrents: &[Torrent]) -> Vec<u8> {
    rpc_body(json!({"torrents": torrents}))
}

/// Decodes a request body the client handed to the transport.
pub(crate) fn sent(body: &[u8]) -> Value {
    serde_json::from_slice(body).expect("client sent JSON")
}
