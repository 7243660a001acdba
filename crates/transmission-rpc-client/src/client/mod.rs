//! Transmission RPC client implementation.

use std::sync::{PoisonError, RwLock};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use transmission_rpc_types::{
    AddSource, Sorting, Stats, Torrent, TorrentAdded, TorrentController, TransmissionError,
    torrent_ids,
};

use crate::command::{
    Request, Response, SessionGetResponse, SessionStatsResponse, TorrentAction, TorrentAddArgs,
    TorrentAddResponse, TorrentGetResponse,
};
use crate::config::ClientConfig;
use crate::transport::{HttpTransport, Transport};


/// TransmissionClient talks to a Transmission daemon over its JSON-RPC interface.
#[allow(missing_debug_implementations)]
pub struct TransmissionClient<T: Transport = HttpTransport> {
    transport: T,
    sorting: RwLock<Sorting>,
}

impl TransmissionClient {
    /// Create a new TransmissionClient.
    ///
    /// This method is async as the connection is checked with a `session-get` call, which
    /// also performs the session-id handshake.
    pub async fn try_new(config: ClientConfig) -> Result<Self, TransmissionError> {
        debug!("Connecting to Transmission RPC at {}", config.url);
        let client = Self::with_transport(HttpTransport::new(&config)?);

        let version = client.version().await?;
        debug!("Connected to Transmission daemon {version}");
        Ok(client)
    }
}

impl<T: Transport> TransmissionClient<T> {
    /// Create a TransmissionClient on top of any [`Transport`]. No request is sent.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            sorting: RwLock::new(Sorting::default()),
        }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Selects the ordering applied by [`TorrentController::list`].
    pub fn set_sort(&self, sorting: Sorting) {
        *self.sorting.write().unwrap_or_else(PoisonError::into_inner) = sorting;
    }

    /// The ordering currently applied by [`TorrentController::list`].
    pub fn sort(&self) -> Sorting {
        *self.sorting.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sends `request` and decodes the answer with `A` as the shape of its arguments.
    ///
    /// A body that does not decode is returned inside the error for diagnosis, since the
    /// daemon reports some failures with a differently shaped payload.
    pub async fn execute<A>(&self, request: &Request) -> Result<Response<A>, TransmissionError>
    where
        A: DeserializeOwned + Default,
    {
        let body = serde_json::to_vec(request).map_err(|e| TransmissionError::Serialization {
            message: e.to_string(),
            payload: None,
        })?;

        let output = self.transport.post(&body).await?;

        serde_json::from_slice(&output).map_err(|e| {
            let payload = String::from_utf8_lossy(&output).into_owned();
            debug!("Undecodable {} response: {payload}", request.method());
            TransmissionError::Serialization {
                message: e.to_string(),
                payload: Some(payload),
            }
        })
    }

    /// Sends a prepared `torrent-add` and returns the torrent the daemon ended up with.
    pub async fn execute_add(
        &self,
        args: TorrentAddArgs,
    ) -> Result<TorrentAdded, TransmissionError> {
        let response: Response<TorrentAddResponse> =
            self.execute(&Request::TorrentAdd(args)).await?;

        response
            .into_arguments()?
            .into_added()
            .ok_or_else(|| TransmissionError::ServerError("No torrent returned".into()))
    }

    /// Lists all torrents in the given order, ignoring the client's selected sort mode.
    pub async fn get_torrents_sorted(
        &self,
        sorting: Sorting,
    ) -> Result<Vec<Torrent>, TransmissionError> {
        let response: Response<TorrentGetResponse> =
            self.execute(&Request::torrent_get()).await?;
        let mut torrents = response.into_arguments()?.torrents;

        // The daemon already answers in ascending id order.
        if sorting != Sorting::Id {
            sorting.apply(&mut torrents);
        }
        Ok(torrents)
    }

    /// The daemon's version string.
    pub async fn version(&self) -> Result<String, TransmissionError> {
        let response: Response<SessionGetResponse> = self.execute(&Request::SessionGet).await?;
        Ok(response.into_arguments()?.version)
    }

    async fn send_action(
        &self,
        action: TorrentAction,
        ids: Vec<String>,
    ) -> Result<String, TransmissionError> {
        let response: Response<Value> = self.execute(&Request::action(action, ids)).await?;
        Ok(response.result)
    }

    async fn send_action_all(&self, action: TorrentAction) -> Result<(), TransmissionError> {
        let torrents = self.get_torrents_sorted(Sorting::Id).await?;
        if torrents.is_empty() {
            debug!("No torrents to {action:?}");
            return Ok(());
        }

        let result = self.send_action(action, torrent_ids(&torrents)).await?;
        debug!("{action:?} on {} torrents: {result}", torrents.len());
        Ok(())
    }
}

impl<T: Transport> TorrentController for TransmissionClient<T> {
    async fn list(&self) -> Result<Vec<Torrent>, TransmissionError> {
        let sorting = self.sort();
        debug!("Listing torrents sorted by {sorting}");
        let torrents = self.get_torrents_sorted(sorting).await?;
        debug!("Listed {} torrents", torrents.len());

        Ok(torrents)
    }

    async fn get(&self, id: &str) -> Result<Torrent, TransmissionError> {
        debug!("Getting torrent {id}");
        let response: Response<TorrentGetResponse> = self
            .execute(&Request::torrent_get_ids(vec![id.to_string()]))
            .await?;

        response
            .into_arguments()?
            .torrents
            .into_iter()
            .next()
            .ok_or_else(|| TransmissionError::NotFound(id.to_string()))
    }

    async fn add(
        &self,
        source: AddSource,
        download_dir: Option<&str>,
    ) -> Result<TorrentAdded, TransmissionError> {
        debug!("Adding torrent from {source:?}");
        let mut args = TorrentAddArgs::from_source(&source)?;
        if let Some(dir) = download_dir {
            args = args.with_download_dir(dir);
        }

        let added = self.execute_add(args).await?;
        debug!("Added {added:?}");
        Ok(added)
    }

    async fn start(&self, ids: Vec<String>) -> Result<String, TransmissionError> {
        debug!("Starting torrents {ids:?}");
        self.send_action(TorrentAction::Start, ids).await
    }

    async fn stop(&self, ids: Vec<String>) -> Result<String, TransmissionError> {
        debug!("Stopping torrents {ids:?}");
        self.send_action(TorrentAction::Stop, ids).await
    }

    async fn verify(&self, ids: Vec<String>) -> Result<String, TransmissionError> {
        debug!("Verifying torrents {ids:?}");
        self.send_action(TorrentAction::Verify, ids).await
    }

    async fn start_all(&self) -> Result<(), TransmissionError> {
        self.send_action_all(TorrentAction::Start).await
    }

    async fn stop_all(&self) -> Result<(), TransmissionError> {
        self.send_action_all(TorrentAction::Stop).await
    }

    async fn verify_all(&self) -> Result<(), TransmissionError> {
        self.send_action_all(TorrentAction::Verify).await
    }

    async fn remove(
        &self,
        id: &str,
        delete_local_data: bool,
    ) -> Result<String, TransmissionError> {
        // torrent-remove does not echo anything back, so look the name up first.
        let torrent = self.get(id).await?;

        debug!("Removing torrent {id}, delete_local_data={delete_local_data}");
        let response: Response<Value> = self
            .execute(&Request::torrent_remove(id, delete_local_data))
            .await?;
        response.into_arguments()?;
        debug!("Removed {}", torrent.name);

        Ok(torrent.name)
    }

    async fn stats(&self) -> Result<Stats, TransmissionError> {
        debug!("Getting session statistics");
        let response: Response<SessionStatsResponse> =
            self.execute(&Request::SessionStats).await?;
        let stats: Stats = response.into_arguments()?.into();
        debug!("Session statistics: {stats:?}");

        Ok(stats)
    }
}
