//! HTTP transport and the daemon's session-id handshake.
//!
//! The daemon rejects a request whose `X-Transmission-Session-Id` header is missing or stale
//! with `409 Conflict`, handing out the current id in the same header. [`HttpTransport`]
//! stores that id and replays the request once.

use reqwest::{StatusCode, header::CONTENT_TYPE};
use tokio::sync::Mutex;
use tracing::debug;
use transmission_rpc_types::TransmissionError;
use url::Url;

use crate::config::ClientConfig;

/// Header carrying the session id in both directions.
pub const SESSION_ID_HEADER: &str = "X-Transmission-Session-Id";

/// Sends a raw RPC body to the daemon and returns the raw answer.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// POSTs `body` and returns the response body of a successful exchange.
    async fn post(&self, body: &[u8]) -> Result<Vec<u8>, TransmissionError>;
}

/// [`Transport`] over reqwest with basic auth and the session-id handshake.
pub struct HttpTransport {
    http: reqwest::Client,
    url: Url,
    username: Option<String>,
    password: Option<String>,
    /// `None` until the daemon hands out an id. Held across a whole exchange so that
    /// concurrent calls never retry with an id another call has already replaced.
    session_id: Mutex<Option<String>>,
}

impl HttpTransport {
    /// Create a transport for `config`, building a reqwest client with its timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, TransmissionError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| TransmissionError::Other(format!("failed to build HTTP client: {e}")))?;

        Self::with_http_client(config, http)
    }

    /// Create a transport that sends through a caller-supplied reqwest client. Timeouts,
    /// proxies and TLS settings of `http` apply unchanged; `config.timeout` is ignored.
    pub fn with_http_client(
        config: &ClientConfig,
        http: reqwest::Client,
    ) -> Result<Self, TransmissionError> {
        Ok(Self {
            http,
            url: config.parse_url()?,
            username: config.username.clone(),
            password: config.password.clone(),
            session_id: Mutex::new(None),
        })
    }

    /// The session id currently held, if the handshake has happened.
    pub async fn session_id(&self) -> Option<String> {
        self.session_id.lock().await.clone()
    }

    async fn send(
        &self,
        body: &[u8],
        session_id: Option<&str>,
    ) -> Result<reqwest::Response, TransmissionError> {
        let mut request = self
            .http
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_vec());
        if let Some(id) = session_id {
            request = request.header(SESSION_ID_HEADER, id);
        }
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }

        request
            .send()
            .await
            .map_err(|e| TransmissionError::Network(e.to_string()))
    }
}

impl Transport for HttpTransport {
    async fn post(&self, body: &[u8]) -> Result<Vec<u8>, TransmissionError> {
        let mut session_id = self.session_id.lock().await;

        let mut response = self.send(body, session_id.as_deref()).await?;
        if response.status() == StatusCode::CONFLICT {
            let renewed = response
                .headers()
                .get(SESSION_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
                .ok_or(TransmissionError::MissingSessionId)?;
            debug!("Daemon issued a new session id, retrying");
            *session_id = Some(renewed);

            response = self.send(body, session_id.as_deref()).await?;
        }

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(TransmissionError::Unauthorized);
        }
        if !status.is_success() {
            debug!("RPC request failed with HTTP {status}");
            return Err(TransmissionError::Http {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransmissionError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("url", &self.url.as_str())
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<set>"))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_password() {
        let config = ClientConfig::default().with_credentials("admin", "hunter2");
        let transport = HttpTransport::new(&config).unwrap();
        let printed = format!("{transport:?}");

        assert!(printed.contains("localhost:9091"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn invalid_url_is_rejected() {
        let err = HttpTransport::new(&ClientConfig::new("::not a url::")).unwrap_err();
        assert!(matches!(err, TransmissionError::Other(msg) if msg.contains("Invalid RPC URL")));
    }

    #[tokio::test]
    async fn starts_without_session_id() {
        let transport = HttpTransport::new(&ClientConfig::default()).unwrap();
        assert_eq!(transport.session_id().await, None);
    }
}
