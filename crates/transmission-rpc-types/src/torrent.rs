//! Torrent snapshots as returned by `torrent-get` and `torrent-add`.

use serde::{Deserialize, Serialize};

use crate::{Status, format_seconds};

/// Shown instead of a number when a ratio or ETA cannot be computed.
const INFINITY: &str = "∞";

/// Torrent information.
///
/// A snapshot of one torrent at the moment of the fetch. Fields the daemon leaves out
/// decode to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct Torrent {
    pub id: i64,

    pub name: String,

    pub hash_string: String,

    pub status: Status,

    /// Unix timestamp, `0` if unknown.
    pub added_date: i64,

    /// Unix timestamp, `0` if never started.
    pub start_date: i64,

    /// Unix timestamp, `0` if not done yet.
    pub done_date: i64,

    pub left_until_done: u64,

    pub size_when_done: u64,

    pub have_valid: u64,

    pub have_unchecked: u64,

    pub is_finished: bool,

    /// Fraction in `[0, 1]`.
    pub percent_done: f64,

    /// Seconds remaining; negative when unknown or unbounded.
    pub eta: i64,

    pub rate_download: u64,

    pub rate_upload: u64,

    pub download_dir: String,

    pub downloaded_ever: u64,

    /// Negative when the ratio cannot be computed.
    pub upload_ratio: f64,

    pub uploaded_ever: u64,

    pub seed_ratio_mode: i64,

    pub error: i64,

    pub error_string: String,

    pub files: Vec<File>,

    pub peers: Vec<Peer>,

    pub trackers: Vec<Tracker>,

    pub tracker_stats: Vec<TrackerStat>,

    pub total_size: u64,

    pub seconds_downloading: u64,

    pub seconds_seeding: u64,
}

impl Torrent {
    /// Total size of the torrent in bytes.
    pub fn size(&self) -> u64 {
        self.total_size
    }

    /// Completion as a percentage in `[0, 100]`.
    pub fn percent(&self) -> f64 {
        self.percent_done * 100.0
    }

    /// The upload ratio with three decimals, or `∞` when the daemon reports a negative ratio.
    pub fn ratio(&self) -> String {
        if self.upload_ratio < 0.0 {
            return INFINITY.to_string();
        }
        format!("{:.3}", self.upload_ratio)
    }

    /// Time left until the download finishes, or `∞` when unknown.
    pub fn eta_display(&self) -> String {
        if self.eta < 0 {
            return INFINITY.to_string();
        }
        format_seconds(self.eta.unsigned_abs())
    }

    /// Announce URLs of all trackers, one per line.
    pub fn trackers_display(&self) -> String {
        self.trackers
            .iter()
            .map(|tracker| format!("{}\n", tracker.announce))
            .collect()
    }

    /// Verified plus unchecked bytes.
    pub fn have(&self) -> u64 {
        self.have_valid + self.have_unchecked
    }

    /// Whether every wanted byte has been downloaded.
    pub fn is_completed(&self) -> bool {
        self.percent_done == 1.0
    }
}

/// Hash strings of the given torrents, suitable for the `ids` argument of bulk actions.
pub fn torrent_ids(torrents: &[Torrent]) -> Vec<String> {
    torrents.iter().map(|t| t.hash_string.clone()).collect()
}

/// A file inside a torrent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct File {
    pub bytes_completed: u64,

    pub length: u64,

    pub name: String,
}

/// A peer connected for a torrent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct Peer {
    pub address: String,

    pub client_name: String,

    pub port: u16,

    pub rate_to_peer: u64,

    pub rate_to_client: u64,

    pub progress: f64,

    pub flag_str: String,

    pub is_encrypted: bool,

    #[serde(rename = "isUTP")]
    pub is_utp: bool,

    pub is_uploading_to: bool,

    pub is_incoming: bool,

    pub is_downloading_from: bool,

    pub peer_is_interested: bool,

    pub peer_is_choked: bool,

    pub client_is_interested: bool,

    pub client_is_choked: bool,
}

/// A tracker configured for a torrent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct Tracker {
    pub announce: String,

    pub id: u64,

    pub scrape: String,

    pub tier: u32,
}

/// Announce and scrape statistics for one tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct TrackerStat {
    pub announce: String,

    pub announce_state: i64,

    pub download_count: i64,

    pub has_announced: bool,

    pub has_scraped: bool,

    pub host: String,

    pub id: u64,

    pub is_backup: bool,

    pub last_announce_peer_count: i64,

    pub last_announce_result: String,

    pub last_announce_start_time: i64,

    pub last_announce_succeeded: bool,

    pub last_announce_time: i64,

    pub last_announce_timed_out: bool,

    pub last_scrape_result: String,

    pub last_scrape_start_time: i64,

    pub last_scrape_succeeded: bool,

    pub last_scrape_time: i64,

    pub last_scrape_timed_out: bool,

    pub leecher_count: i64,

    pub next_announce_time: i64,

    pub next_scrape_time: i64,

    pub scrape: String,

    pub scrape_state: i64,

    pub seeder_count: i64,

    pub tier: u32,
}

/// Descriptor of a torrent returned by `torrent-add`, either freshly added or a duplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct TorrentAdded {
    pub hash_string: String,

    pub id: i64,

    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_infinite_when_negative() {
        let torrent = Torrent {
            upload_ratio: -1.0,
            ..Default::default()
        };
        assert_eq!(torrent.ratio(), "∞");

        let torrent = Torrent {
            upload_ratio: 1.23456,
            ..Default::default()
        };
        assert_eq!(torrent.ratio(), "1.235");
    }

    #[test]
    fn eta_display() {
        let unknown = Torrent {
            eta: -1,
            ..Default::default()
        };
        assert_eq!(unknown.eta_display(), "∞");

        let soon = Torrent {
            eta: 3725,
            ..Default::default()
        };
        assert_eq!(soon.eta_display(), "1h2m5s");
    }

    #[test]
    fn completion_and_have() {
        let torrent = Torrent {
            percent_done: 1.0,
            have_valid: 700,
            have_unchecked: 300,
            ..Default::default()
        };
        assert!(torrent.is_completed());
        assert_eq!(torrent.have(), 1000);
        assert_eq!(torrent.percent(), 100.0);

        let partial = Torrent {
            percent_done: 0.25,
            ..Default::default()
        };
        assert!(!partial.is_completed());
    }

    #[test]
    fn trackers_are_listed_one_per_line() {
        let torrent = Torrent {
            trackers: vec![
                Tracker {
                    announce: "udp://a.example:80".into(),
                    ..Default::default()
                },
                Tracker {
                    announce: "http://b.example/announce".into(),
                    tier: 1,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(
            torrent.trackers_display(),
            "udp://a.example:80\nhttp://b.example/announce\n"
        );
    }

    #[test]
    fn ids_are_hash_strings() {
        let torrents = vec![
            Torrent {
                id: 1,
                hash_string: "aa".into(),
                ..Default::default()
            },
            Torrent {
                id: 2,
                hash_string: "bb".into(),
                ..Default::default()
            },
        ];
        assert_eq!(torrent_ids(&torrents), vec!["aa", "bb"]);
    }

    #[test]
    fn decodes_daemon_json() {
        let json = r#"{
            "id": 7,
            "name": "ubuntu.iso",
            "hashString": "deadbeef",
            "status": 6,
            "percentDone": 1,
            "uploadRatio": -1,
            "eta": -1,
            "files": [{"bytesCompleted": 10, "length": 10, "name": "ubuntu.iso"}],
            "peers": [{"address": "10.0.0.2", "clientName": "qBittorrent", "port": 51413, "isUTP": true}],
            "trackerStats": [{"host": "tracker.example", "lastScrapeTimedOut": false, "seederCount": 12}]
        }"#;

        let torrent: Torrent = serde_json::from_str(json).unwrap();
        assert_eq!(torrent.id, 7);
        assert_eq!(torrent.hash_string, "deadbeef");
        assert_eq!(torrent.status, Status::Seeding);
        assert!(torrent.is_completed());
        assert_eq!(torrent.ratio(), "∞");
        assert_eq!(torrent.files[0].length, 10);
        assert!(torrent.peers[0].is_utp);
        assert_eq!(torrent.peers[0].client_name, "qBittorrent");
        assert_eq!(torrent.tracker_stats[0].seeder_count, 12);
        assert_eq!(torrent.download_dir, "");
    }
}
