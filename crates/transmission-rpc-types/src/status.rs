use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a torrent as reported by the daemon's integer `status` code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Status {
    /// Not running.
    #[default]
    Stopped,
    /// Queued for a local data check.
    CheckPending,
    /// Checking local data.
    Checking,
    /// Queued for download.
    DownloadPending,
    /// Downloading.
    Downloading,
    /// Queued for seeding.
    SeedPending,
    /// Seeding.
    Seeding,
    /// A code this client does not know.
    Unknown(i64),
}

impl Status {
    /// True for every state in which the daemon is working on the torrent.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            Self::Checking
                | Self::DownloadPending
                | Self::Downloading
                | Self::SeedPending
                | Self::Seeding
        )
    }
}

impl From<i64> for Status {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Stopped,
            1 => Self::CheckPending,
            2 => Self::Checking,
            3 => Self::DownloadPending,
            4 => Self::Downloading,
            5 => Self::SeedPending,
            6 => Self::Seeding,
            other => Self::Unknown(other),
        }
    }
}

impl From<Status> for i64 {
    fn from(status: Status) -> Self {
        match status {
            Status::Stopped => 0,
            Status::CheckPending => 1,
            Status::Checking => 2,
            Status::DownloadPending => 3,
            Status::Downloading => 4,
            Status::SeedPending => 5,
            Status::Seeding => 6,
            Status::Unknown(code) => code,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Stopped => "Stopped",
            Self::CheckPending => "Check waiting",
            Self::Checking => "Checking",
            Self::DownloadPending => "Download waiting",
            Self::Downloading => "Downloading",
            Self::SeedPending => "Seed waiting",
            Self::Seeding => "Seeding",
            Self::Unknown(_) => "unknown",
        };
        f.write_str(label)
    }
}
