//! Orderings applied to torrent listings.

use std::{cmp::Ordering, fmt, str::FromStr};

use thiserror::Error;

use crate::Torrent;

/// How a torrent listing is ordered. Each key comes in an ascending and a reverse flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Sorting {
    /// The daemon's own order.
    #[default]
    Id,
    RevId,
    Name,
    RevName,
    /// By the date the torrent was added.
    Age,
    RevAge,
    Size,
    RevSize,
    Progress,
    RevProgress,
    DownSpeed,
    RevDownSpeed,
    UpSpeed,
    RevUpSpeed,
    Downloaded,
    RevDownloaded,
    Uploaded,
    RevUploaded,
    Ratio,
    RevRatio,
}

impl Sorting {
    /// Every sort mode, ascending before reverse.
    pub const ALL: [Sorting; 20] = [
        Sorting::Id,
        Sorting::RevId,
        Sorting::Name,
        Sorting::RevName,
        Sorting::Age,
        Sorting::RevAge,
        Sorting::Size,
        Sorting::RevSize,
        Sorting::Progress,
        Sorting::RevProgress,
        Sorting::DownSpeed,
        Sorting::RevDownSpeed,
        Sorting::UpSpeed,
        Sorting::RevUpSpeed,
        Sorting::Downloaded,
        Sorting::RevDownloaded,
        Sorting::Uploaded,
        Sorting::RevUploaded,
        Sorting::Ratio,
        Sorting::RevRatio,
    ];

    /// Whether this mode orders from the largest key down.
    pub fn is_reverse(self) -> bool {
        matches!(
            self,
            Self::RevId
                | Self::RevName
                | Self::RevAge
                | Self::RevSize
                | Self::RevProgress
                | Self::RevDownSpeed
                | Self::RevUpSpeed
                | Self::RevDownloaded
                | Self::RevUploaded
                | Self::RevRatio
        )
    }

    /// The mode with the same key and the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Id => Self::RevId,
            Self::RevId => Self::Id,
            Self::Name => Self::RevName,
            Self::RevName => Self::Name,
            Self::Age => Self::RevAge,
            Self::RevAge => Self::Age,
            Self::Size => Self::RevSize,
            Self::RevSize => Self::Size,
            Self::Progress => Self::RevProgress,
            Self::RevProgress => Self::Progress,
            Self::DownSpeed => Self::RevDownSpeed,
            Self::RevDownSpeed => Self::DownSpeed,
            Self::UpSpeed => Self::RevUpSpeed,
            Self::RevUpSpeed => Self::UpSpeed,
            Self::Downloaded => Self::RevDownloaded,
            Self::RevDownloaded => Self::Downloaded,
            Self::Uploaded => Self::RevUploaded,
            Self::RevUploaded => Self::Uploaded,
            Self::Ratio => Self::RevRatio,
            Self::RevRatio => Self::Ratio,
        }
    }

    /// Compares two torrents by this mode's key, ignoring direction.
    fn compare_key(self, a: &Torrent, b: &Torrent) -> Ordering {
        match self {
            Self::Id | Self::RevId => a.id.cmp(&b.id),
            Self::Name | Self::RevName => a.name.cmp(&b.name),
            Self::Age | Self::RevAge => a.added_date.cmp(&b.added_date),
            Self::Size | Self::RevSize => a.total_size.cmp(&b.total_size),
            Self::Progress | Self::RevProgress => a.percent_done.total_cmp(&b.percent_done),
            Self::DownSpeed | Self::RevDownSpeed => a.rate_download.cmp(&b.rate_download),
            Self::UpSpeed | Self::RevUpSpeed => a.rate_upload.cmp(&b.rate_upload),
            Self::Downloaded | Self::RevDownloaded => a.downloaded_ever.cmp(&b.downloaded_ever),
            Self::Uploaded | Self::RevUploaded => a.uploaded_ever.cmp(&b.uploaded_ever),
            Self::Ratio | Self::RevRatio => a.upload_ratio.total_cmp(&b.upload_ratio),
        }
    }

    /// Sorts `torrents` in place. Ties keep their relative order.
    pub fn apply(self, torrents: &mut [Torrent]) {
        if self.is_reverse() {
            torrents.sort_by(|a, b| self.compare_key(b, a));
        } else {
            torrents.sort_by(|a, b| self.compare_key(a, b));
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::RevId => "rev-id",
            Self::Name => "name",
            Self::RevName => "rev-name",
            Self::Age => "age",
            Self::RevAge => "rev-age",
            Self::Size => "size",
            Self::RevSize => "rev-size",
            Self::Progress => "progress",
            Self::RevProgress => "rev-progress",
            Self::DownSpeed => "down-speed",
            Self::RevDownSpeed => "rev-down-speed",
            Self::UpSpeed => "up-speed",
            Self::RevUpSpeed => "rev-up-speed",
            Self::Downloaded => "downloaded",
            Self::RevDownloaded => "rev-downloaded",
            Self::Uploaded => "uploaded",
            Self::RevUploaded => "rev-uploaded",
            Self::Ratio => "ratio",
            Self::RevRatio => "rev-ratio",
        }
    }
}

impl fmt::Display for Sorting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known sort mode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sort mode: {0}")]
pub struct ParseSortingError(String);

impl FromStr for Sorting {
    type Err = ParseSortingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ParseSortingError(s.to_string()))
    }
}
