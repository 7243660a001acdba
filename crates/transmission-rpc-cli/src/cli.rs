use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};
use transmission_rpc_client::{ClientConfig, DEFAULT_RPC_URL};
use transmission_rpc_types::{AddSource, Sorting};

/// Top-level CLI struct for the binary.
#[derive(Debug, Parser)]
#[command(name = "trctl", version, about, long_about = None)]
pub(crate) struct Cli {
    /// RPC endpoint of the daemon.
    #[arg(long, global = true, env = "TRANSMISSION_RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub url: String,

    /// Basic-auth user name.
    #[arg(long, global = true, env = "TRANSMISSION_USERNAME")]
    pub username: Option<String>,

    /// Basic-auth password.
    #[arg(long, global = true, env = "TRANSMISSION_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true, env = "TRANSMISSION_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Connection settings from the global options.
    pub(crate) fn config(&self) -> ClientConfig {
        ClientConfig {
            url: self.url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List all torrents.
    List(ListArgs),
    /// Show one torrent by id or hash.
    Get {
        /// Numeric id or hash string.
        id: String,
    },
    /// Add a torrent from a URL, magnet link or local file.
    Add(AddArgs),
    /// Start torrents.
    Start(IdsArgs),
    /// Stop torrents.
    Stop(IdsArgs),
    /// Verify local data of torrents.
    Verify(IdsArgs),
    /// Remove a torrent.
    Remove {
        /// Numeric id or hash string.
        id: String,

        /// Also delete the downloaded data.
        #[arg(long, default_value_t = false)]
        delete_data: bool,
    },
    /// Show session statistics.
    Stats,
    /// Show the daemon version.
    Version,
}

#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    /// Order of the listing, e.g. `name`, `rev-progress`.
    #[arg(long, default_value_t = Sorting::Id)]
    pub sort: Sorting,
}

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// URL, magnet link, or with `--file` a local `.torrent` path.
    pub source: String,

    /// Upload `source` as a local `.torrent` file.
    #[arg(long, default_value_t = false)]
    pub file: bool,

    /// Where the daemon stores the data.
    #[arg(long)]
    pub download_dir: Option<String>,
}

impl AddArgs {
    pub(crate) fn source(&self) -> AddSource {
        if self.file {
            AddSource::File(PathBuf::from(&self.source))
        } else {
            AddSource::Url(self.source.clone())
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct IdsArgs {
    /// Numeric ids or hash strings.
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub ids: Vec<String>,

    /// Act on every torrent.
    #[arg(long, default_value_t = false)]
    pub all: bool,
}
