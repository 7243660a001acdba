//! The RPC envelope: one request variant per method, and a response generic over the
//! method's arguments.
//!
//! On the wire every call is `{"method": ..., "arguments": {...}}` and every answer is
//! `{"arguments": {...}, "result": "success"}`. Fields left at their default value are not
//! sent.

use std::{fs, path::Path};

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use transmission_rpc_types::{AddSource, StatsDetails, Torrent, TorrentAdded, TransmissionError};

/// The `result` value of a successful call.
pub const RESULT_SUCCESS: &str = "success";

/// Torrent attributes requested by every `torrent-get`.
pub const TORRENT_FIELDS: [&str; 30] = [
    "id",
    "name",
    "hashString",
    "status",
    "addedDate",
    "startDate",
    "doneDate",
    "leftUntilDone",
    "sizeWhenDone",
    "haveValid",
    "haveUnchecked",
    "isFinished",
    "percentDone",
    "eta",
    "rateDownload",
    "rateUpload",
    "downloadDir",
    "downloadedEver",
    "uploadRatio",
    "uploadedEver",
    "seedRatioMode",
    "error",
    "errorString",
    "files",
    "peers",
    "trackers",
    "trackerStats",
    "totalSize",
    "secondsDownloading",
    "secondsSeeding",
];

/// An RPC call. The variant selects `method`, its payload becomes `arguments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "arguments")]
pub enum Request {
    /// `torrent-get`
    #[serde(rename = "torrent-get")]
    TorrentGet(TorrentGetArgs),
    /// `torrent-add`
    #[serde(rename = "torrent-add")]
    TorrentAdd(TorrentAddArgs),
    /// `torrent-remove`
    #[serde(rename = "torrent-remove")]
    TorrentRemove(TorrentRemoveArgs),
    /// `torrent-start`
    #[serde(rename = "torrent-start")]
    TorrentStart(IdsArgs),
    /// `torrent-stop`
    #[serde(rename = "torrent-stop")]
    TorrentStop(IdsArgs),
    /// `torrent-verify`
    #[serde(rename = "torrent-verify")]
    TorrentVerify(IdsArgs),
    /// `session-stats`
    #[serde(rename = "session-stats")]
    SessionStats,
    /// `session-get`
    #[serde(rename = "session-get")]
    SessionGet,
}

impl Request {
    /// `torrent-get` for every torrent.
    pub fn torrent_get() -> Self {
        Self::TorrentGet(TorrentGetArgs::default())
    }

    /// `torrent-get` restricted to the given ids or hash strings.
    pub fn torrent_get_ids(ids: Vec<String>) -> Self {
        Self::TorrentGet(TorrentGetArgs {
            ids,
            ..Default::default()
        })
    }

    /// `torrent-add` from the given source. Local files are read and uploaded.
    pub fn torrent_add(source: &AddSource) -> Result<Self, TransmissionError> {
        Ok(Self::TorrentAdd(TorrentAddArgs::from_source(source)?))
    }

    /// `torrent-remove` for a single torrent.
    pub fn torrent_remove(id: impl Into<String>, delete_local_data: bool) -> Self {
        Self::TorrentRemove(TorrentRemoveArgs {
            ids: vec![id.into()],
            delete_local_data,
        })
    }

    /// A start/stop/verify call for the given ids.
    pub fn action(action: TorrentAction, ids: Vec<String>) -> Self {
        let args = IdsArgs { ids };
        match action {
            TorrentAction::Start => Self::TorrentStart(args),
            TorrentAction::Stop => Self::TorrentStop(args),
            TorrentAction::Verify => Self::TorrentVerify(args),
        }
    }

    /// The wire name of this call's method.
    pub fn method(&self) -> &'static str {
        match self {
            Self::TorrentGet(_) => "torrent-get",
            Self::TorrentAdd(_) => "torrent-add",
            Self::TorrentRemove(_) => "torrent-remove",
            Self::TorrentStart(_) => "torrent-start",
            Self::TorrentStop(_) => "torrent-stop",
            Self::TorrentVerify(_) => "torrent-verify",
            Self::SessionStats => "session-stats",
            Self::SessionGet => "session-get",
        }
    }
}

/// Methods that act on a set of torrents and only report a result string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TorrentAction {
    /// `torrent-start`
    Start,
    /// `torrent-stop`
    Stop,
    /// `torrent-verify`
    Verify,
}

/// Arguments of `torrent-get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorrentGetArgs {
    /// Attributes to return for each torrent.
    pub fields: Vec<String>,
    /// Torrents to return; all of them when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
}

impl Default for TorrentGetArgs {
    fn default() -> Self {
        Self {
            fields: TORRENT_FIELDS.iter().map(|f| f.to_string()).collect(),
            ids: Vec::new(),
        }
    }
}

/// Arguments of `torrent-add`. Exactly one of `filename` and `metainfo` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TorrentAddArgs {
    /// URL, magnet link or daemon-side path of the torrent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Base64 encoded contents of a `.torrent` file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metainfo: Option<String>,
    /// Where the daemon stores the downloaded data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<String>,
}

impl TorrentAddArgs {
    /// Builds the arguments for `source`, reading and encoding local files.
    pub fn from_source(source: &AddSource) -> Result<Self, TransmissionError> {
        let args = match source {
            AddSource::Url(url) => Self {
                filename: Some(url.clone()),
                ..Default::default()
            },
            AddSource::File(path) => Self {
                metainfo: Some(encode_file(path)?),
                ..Default::default()
            },
            AddSource::Bytes(bytes) => Self {
                metainfo: Some(STANDARD.encode(bytes)),
                ..Default::default()
            },
        };
        Ok(args)
    }

    /// Sets the directory the daemon downloads into.
    pub fn with_download_dir(mut self, dir: impl Into<String>) -> Self {
        self.download_dir = Some(dir.into());
        self
    }
}

fn encode_file(path: &Path) -> Result<String, TransmissionError> {
    let data = fs::read(path)
        .map_err(|e| TransmissionError::FileSystem(format!("{}: {e}", path.display())))?;
    Ok(STANDARD.encode(data))
}

/// Arguments of `torrent-remove`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TorrentRemoveArgs {
    /// Torrents to remove.
    pub ids: Vec<String>,
    /// Also delete the downloaded data.
    #[serde(skip_serializing_if = "is_false")]
    pub delete_local_data: bool,
}

/// Arguments of the start/stop/verify methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdsArgs {
    /// Torrents to act on. The daemon applies the call to every torrent when this is empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A decoded RPC answer. `A` is the method-specific shape of `arguments`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "A: Serialize",
    deserialize = "A: Deserialize<'de> + Default"
))]
pub struct Response<A> {
    /// Method-specific results.
    #[serde(default)]
    pub arguments: A,
    /// `success`, or a description of what went wrong.
    #[serde(default)]
    pub result: String,
}

impl<A> Response<A> {
    /// Whether the daemon reported success.
    pub fn is_success(&self) -> bool {
        self.result == RESULT_SUCCESS
    }

    /// The arguments of a successful answer, or [`TransmissionError::ServerError`] carrying
    /// the daemon's `result`.
    pub fn into_arguments(self) -> Result<A, TransmissionError> {
        if self.is_success() {
            Ok(self.arguments)
        } else {
            Err(TransmissionError::ServerError(self.result))
        }
    }
}

/// `arguments` of a `torrent-get` answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorrentGetResponse {
    /// The requested torrents.
    pub torrents: Vec<Torrent>,
}

/// `arguments` of a `torrent-add` answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TorrentAddResponse {
    /// Set when the torrent was new.
    pub torrent_added: Option<TorrentAdded>,
    /// Set when the daemon already had the torrent.
    pub torrent_duplicate: Option<TorrentAdded>,
}

impl TorrentAddResponse {
    /// The torrent the daemon ended up with. A duplicate with a hash wins over an added entry.
    pub fn into_added(self) -> Option<TorrentAdded> {
        match self.torrent_duplicate {
            Some(duplicate) if !duplicate.hash_string.is_empty() => Some(duplicate),
            _ => self.torrent_added,
        }
    }
}

/// `arguments` of a `session-stats` answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct SessionStatsResponse {
    pub active_torrent_count: u32,

    #[serde(rename = "cumulative-stats")]
    pub cumulative_stats: StatsDetails,

    #[serde(rename = "current-stats")]
    pub current_stats: StatsDetails,

    pub download_speed: u64,

    pub paused_torrent_count: u32,

    pub torrent_count: u32,

    pub upload_speed: u64,
}

/// `arguments` of a `session-get` answer. Only the fields this client reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionGetResponse {
    /// Daemon version, e.g. `4.0.5 (a6fe2a64aa)`.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn to_value(request: &Request) -> Value {
        serde_json::to_value(request).unwrap()
    }

    #[test]
    fn torrent_get_carries_fixed_fields() {
        let value = to_value(&Request::torrent_get());
        assert_eq!(value["method"], "torrent-get");
        assert_eq!(value["arguments"]["fields"], json!(TORRENT_FIELDS));
        assert!(value["arguments"].get("ids").is_none());
        assert!(value.get("result").is_none());
    }

    #[test]
    fn torrent_get_by_id() {
        let value = to_value(&Request::torrent_get_ids(vec!["abc123".into()]));
        assert_eq!(value["arguments"]["ids"], json!(["abc123"]));
    }

    #[test]
    fn remove_omits_false_delete_flag() {
        assert_eq!(
            to_value(&Request::torrent_remove("abc", false)),
            json!({"method": "torrent-remove", "arguments": {"ids": ["abc"]}})
        );
        assert_eq!(
            to_value(&Request::torrent_remove("abc", true)),
            json!({
                "method": "torrent-remove",
                "arguments": {"ids": ["abc"], "delete-local-data": true}
            })
        );
    }

    #[test]
    fn actions_map_to_methods() {
        let ids = vec!["h1".to_string(), "h2".to_string()];
        for (action, method) in [
            (TorrentAction::Start, "torrent-start"),
            (TorrentAction::Stop, "torrent-stop"),
            (TorrentAction::Verify, "torrent-verify"),
        ] {
            let request = Request::action(action, ids.clone());
            assert_eq!(request.method(), method);
            assert_eq!(
                to_value(&request),
                json!({"method": method, "arguments": {"ids": ["h1", "h2"]}})
            );
        }
    }

    #[test]
    fn session_calls_have_no_arguments() {
        assert_eq!(
            to_value(&Request::SessionStats),
            json!({"method": "session-stats"})
        );
        assert_eq!(to_value(&Request::SessionGet), json!({"method": "session-get"}));
    }

    #[test]
    fn add_by_url_sets_filename_only() {
        let request = Request::torrent_add(&AddSource::Url("magnet:?xt=urn:btih:abc".into()))
            .unwrap();
        assert_eq!(
            to_value(&request),
            json!({"method": "torrent-add", "arguments": {"filename": "magnet:?xt=urn:btih:abc"}})
        );
    }

    #[test]
    fn add_by_bytes_is_base64() {
        let args = TorrentAddArgs::from_source(&AddSource::Bytes(b"d4:infodee".to_vec()))
            .unwrap()
            .with_download_dir("/data");
        assert_eq!(args.metainfo.as_deref(), Some("ZDQ6aW5mb2RlZQ=="));
        assert_eq!(args.filename, None);

        let value = to_value(&Request::TorrentAdd(args));
        assert_eq!(value["arguments"]["download-dir"], "/data");
    }

    #[test]
    fn add_by_file_reads_and_encodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.torrent");
        fs::write(&path, b"d4:infodee").unwrap();

        let args = TorrentAddArgs::from_source(&AddSource::File(path)).unwrap();
        assert_eq!(args.metainfo.as_deref(), Some("ZDQ6aW5mb2RlZQ=="));
    }

    #[test]
    fn add_by_missing_file_is_a_file_system_error() {
        let err = TorrentAddArgs::from_source(&AddSource::File("/nonexistent/x.torrent".into()))
            .unwrap_err();
        match err {
            TransmissionError::FileSystem(msg) => assert!(msg.contains("/nonexistent/x.torrent")),
            other => panic!("Expected FileSystem error, got {other:?}"),
        }
    }

    #[test]
    fn requests_survive_encoding() {
        let requests = [
            Request::torrent_get_ids(vec!["1".into(), "deadbeef".into()]),
            Request::TorrentAdd(
                TorrentAddArgs::from_source(&AddSource::Url("http://x/t.torrent".into()))
                    .unwrap()
                    .with_download_dir("/dl"),
            ),
            Request::torrent_remove("9", true),
            Request::action(TorrentAction::Verify, vec![]),
            Request::SessionStats,
        ];

        for request in requests {
            let bytes = serde_json::to_vec(&request).unwrap();
            let decoded: Request = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(decoded, request);
        }
    }

    #[test]
    fn response_defaults_missing_arguments() {
        let response: Response<TorrentGetResponse> =
            serde_json::from_str(r#"{"result": "success"}"#).unwrap();
        assert!(response.is_success());
        assert!(response.arguments.torrents.is_empty());
    }

    #[test]
    fn failed_result_becomes_server_error() {
        let response: Response<TorrentGetResponse> =
            serde_json::from_str(r#"{"arguments": {}, "result": "invalid or corrupt torrent file"}"#)
                .unwrap();
        match response.into_arguments() {
            Err(TransmissionError::ServerError(msg)) => {
                assert_eq!(msg, "invalid or corrupt torrent file")
            }
            other => panic!("Expected ServerError, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_wins_over_added() {
        let response: TorrentAddResponse = serde_json::from_value(json!({
            "torrent-added": {"hashString": "new", "id": 5, "name": "fresh"},
            "torrent-duplicate": {"hashString": "old", "id": 2, "name": "existing"}
        }))
        .unwrap();
        let added = response.into_added().unwrap();
        assert_eq!(added.hash_string, "old");
        assert_eq!(added.id, 2);
    }

    #[test]
    fn duplicate_without_hash_is_ignored() {
        let response: TorrentAddResponse = serde_json::from_value(json!({
            "torrent-added": {"hashString": "new", "id": 5, "name": "fresh"},
            "torrent-duplicate": {"hashString": "", "id": 0, "name": ""}
        }))
        .unwrap();
        assert_eq!(response.into_added().unwrap().name, "fresh");
        assert_eq!(TorrentAddResponse::default().into_added(), None);
    }

    #[test]
    fn session_stats_decode_wire_names() {
        let response: Response<SessionStatsResponse> = serde_json::from_value(json!({
            "arguments": {
                "activeTorrentCount": 2,
                "pausedTorrentCount": 1,
                "torrentCount": 3,
                "downloadSpeed": 1000,
                "uploadSpeed": 500,
                "cumulative-stats": {"downloadedBytes": 9000, "sessionCount": 4},
                "current-stats": {"downloadedBytes": 100, "secondsActive": 60}
            },
            "result": "success"
        }))
        .unwrap();
        let stats = response.into_arguments().unwrap();
        assert_eq!(stats.active_torrent_count, 2);
        assert_eq!(stats.cumulative_stats.session_count, 4);
        assert_eq!(stats.current_stats.seconds_active, 60);
    }
}
