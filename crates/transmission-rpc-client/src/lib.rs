//! # Transmission RPC client
//!
//! usage:
//!
//! ```rust,ignore
//! use transmission_rpc_client::{ClientConfig, TransmissionClient};
//! use transmission_rpc_types::{AddSource, Sorting, TorrentController};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("http://nas:9091/transmission/rpc")
//!         .with_credentials("admin", "secret");
//!     let client = TransmissionClient::try_new(config).await?;
//!
//!     let added = client
//!         .add(AddSource::File("path/to/file.torrent".into()), Some("/data"))
//!         .await?;
//!     println!("Added torrent: {:?}", added);
//!
//!     client.set_sort(Sorting::RevProgress);
//!     for torrent in client.list().await? {
//!         println!("{:>6.1}% {}", torrent.percent(), torrent.name);
//!     }
//!     Ok(())
//! }
//! ```
//!

mod client;
pub mod command;
mod config;
mod conversions;
pub mod transport;

#[cfg(test)]
mod testutil;

pub use client::TransmissionClient;
pub use command::{Request, Response};
pub use config::{ClientConfig, DEFAULT_RPC_URL};
pub use transport::{HttpTransport, SESSION_ID_HEADER, Transport};

// Used by the integration tests only.
#[cfg(test)]
use httpmock as _;
#[cfg(test)]
use libc as _;
#[cfg(test)]
use tracing_subscriber as _;
