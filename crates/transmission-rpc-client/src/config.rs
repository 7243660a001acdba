//! Connection settings for [`crate::TransmissionClient`].

use std::{fmt, time::Duration};

use transmission_rpc_types::TransmissionError;
use url::Url;

/// RPC endpoint of a daemon running with default settings.
pub const DEFAULT_RPC_URL: &str = "http://localhost:9091/transmission/rpc";

/// Where and how to reach the daemon.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// The RPC endpoint.
    pub url: String,
    /// Basic-auth user name. No `Authorization` header is sent when unset.
    pub username: Option<String>,
    /// Basic-auth password.
    pub password: Option<String>,
    /// Per-request timeout handed to the HTTP client. No timeout when unset.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
            username: None,
            password: None,
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Returns a configuration for `url` without credentials or timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the basic-auth credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(crate) fn parse_url(&self) -> Result<Url, TransmissionError> {
        Url::parse(&self.url)
            .map_err(|e| TransmissionError::Other(format!("Invalid RPC URL: {}", e)))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print credentials.
        write!(
            f,
            "ClientConfig(url=\"{}\", username={:?}, password=<{}>, timeout={:?})",
            self.url,
            self.username,
            if self.password.is_some() { "set" } else { "unset" },
            self.timeout,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_password() {
        let config = ClientConfig::new("http://nas:9091/transmission/rpc")
            .with_credentials("admin", "hunter2")
            .with_timeout(Duration::from_secs(5));
        let printed = format!("{config:?}");

        assert!(printed.contains("admin"));
        assert!(printed.contains("password=<set>"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn default_points_at_local_daemon() {
        let config = ClientConfig::default();
        assert_eq!(config.url, DEFAULT_RPC_URL);
        assert!(config.parse_url().is_ok());
    }

    #[test]
    fn invalid_url_is_rejected() {
        match ClientConfig::new("not-a-valid-url").parse_url() {
            Err(TransmissionError::Other(msg)) => assert!(msg.contains("Invalid RPC URL")),
            other => panic!("Expected Other error, got {other:?}"),
        }
    }
}
