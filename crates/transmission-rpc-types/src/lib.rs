//! # Transmission RPC Types
//!
//! Domain types shared by the Transmission RPC client and its callers: torrent and session
//! snapshots, the sort modes applied to torrent listings, the error taxonomy and the
//! [`TorrentController`] trait.

use std::path::PathBuf;

use thiserror::Error;

mod sorting;
mod stats;
mod status;
mod torrent;

pub use sorting::{ParseSortingError, Sorting};
pub use stats::{Stats, StatsDetails};
pub use status::Status;
pub use torrent::{File, Peer, Torrent, TorrentAdded, Tracker, TrackerStat, torrent_ids};

/// Error type for Transmission RPC operations.
#[derive(Error, Debug)]
pub enum TransmissionError {
    /// Network-related errors (connection failures, timeouts, etc.)
    #[error("network error: {0}")]
    Network(String),

    /// The daemon rejected the configured credentials.
    #[error("authentication required")]
    Unauthorized,

    /// The daemon answered with a non-success HTTP status.
    #[error("unexpected HTTP status {status}")]
    Http {
        /// The HTTP status code.
        status: u16,
    },

    /// A 409 response did not carry a replacement session id.
    #[error("daemon answered 409 without a session id")]
    MissingSessionId,

    /// The daemon processed the request but reported a failure in `result`.
    #[error("server error: {0}")]
    ServerError(String),

    /// A request could not be encoded or a response could not be decoded.
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of the underlying encode/decode failure.
        message: String,
        /// The raw response body, when the failure happened while decoding.
        payload: Option<String>,
    },

    /// An id-scoped lookup returned no torrent.
    #[error("no torrent with id {0}")]
    NotFound(String),

    /// File system errors (file not found, permission denied, etc.)
    #[error("file system error: {0}")]
    FileSystem(String),

    /// Other unexpected errors
    #[error("unexpected error: {0}")]
    Other(String),
}

impl TransmissionError {
    /// Whether the error originated in the HTTP transport, including an exhausted
    /// session-id handshake.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Unauthorized | Self::Http { .. } | Self::MissingSessionId
        )
    }

    /// The raw response body attached to a decode failure.
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::Serialization { payload, .. } => payload.as_deref(),
            _ => None,
        }
    }
}

/// Where the daemon should take a new torrent from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddSource {
    /// A remote URL, a magnet link, or a path on the daemon's own file system.
    Url(String),
    /// A `.torrent` file on the local file system; its contents are uploaded.
    File(PathBuf),
    /// The raw bytes of a `.torrent` file.
    Bytes(Vec<u8>),
}

/// TorrentController defines the operations a Transmission-compatible daemon client offers.
#[allow(async_fn_in_trait)]
pub trait TorrentController {
    /// List all torrents, ordered by the client's current [`Sorting`].
    async fn list(&self) -> Result<Vec<Torrent>, TransmissionError>;
    /// Fetch a single torrent by numeric id or hash string.
    async fn get(&self, id: &str) -> Result<Torrent, TransmissionError>;
    /// Add a torrent. If the daemon already knows it, the existing torrent is returned.
    async fn add(
        &self,
        source: AddSource,
        download_dir: Option<&str>,
    ) -> Result<TorrentAdded, TransmissionError>;
    /// Start torrents by id. Returns the daemon's result string.
    async fn start(&self, ids: Vec<String>) -> Result<String, TransmissionError>;
    /// Stop torrents by id. Returns the daemon's result string.
    async fn stop(&self, ids: Vec<String>) -> Result<String, TransmissionError>;
    /// Queue torrents for verification. Returns the daemon's result string.
    async fn verify(&self, ids: Vec<String>) -> Result<String, TransmissionError>;
    /// Start every torrent the daemon knows about.
    async fn start_all(&self) -> Result<(), TransmissionError>;
    /// Stop every torrent the daemon knows about.
    async fn stop_all(&self) -> Result<(), TransmissionError>;
    /// Verify every torrent the daemon knows about.
    async fn verify_all(&self) -> Result<(), TransmissionError>;
    /// Remove a torrent, optionally deleting its downloaded data. Returns the torrent's name.
    async fn remove(&self, id: &str, delete_local_data: bool)
    -> Result<String, TransmissionError>;
    /// Get session statistics.
    async fn stats(&self) -> Result<Stats, TransmissionError>;
}

/// Renders whole seconds the way the daemon's web UI does: `45s`, `2m5s`, `1h0m0s`.
pub(crate) fn format_seconds(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}h{minutes}m{secs}s")
    } else if minutes > 0 {
        format!("{minutes}m{secs}s")
    } else {
        format!("{secs}s")
    }
}
