//! # trctl
//!
//! Command-line client for a Transmission daemon.
//!
//! ## Usage
//!
//! ```sh,ignore
//! TRANSMISSION_RPC_URL=http://nas:9091/transmission/rpc trctl list --sort rev-progress
//! trctl add --file ./debian.torrent --download-dir /data
//! trctl stop --all
//! ```

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use transmission_rpc_client::{
    TransmissionClient,
    command::{RESULT_SUCCESS, TorrentAction},
};
use transmission_rpc_types::{TorrentController, TransmissionError};

use crate::cli::{Cli, Command, IdsArgs};

mod cli;
mod output;

/// Initializes the tracing subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs a start/stop/verify on the given ids or on every torrent.
async fn run_action(
    client: &TransmissionClient,
    action: TorrentAction,
    args: IdsArgs,
) -> Result<String, TransmissionError> {
    if args.all {
        match action {
            TorrentAction::Start => client.start_all().await?,
            TorrentAction::Stop => client.stop_all().await?,
            TorrentAction::Verify => client.verify_all().await?,
        }
        return Ok(RESULT_SUCCESS.to_string());
    }

    match action {
        TorrentAction::Start => client.start(args.ids).await,
        TorrentAction::Stop => client.stop(args.ids).await,
        TorrentAction::Verify => client.verify(args.ids).await,
    }
}

async fn run(cli: Cli) -> Result<(), TransmissionError> {
    let config = cli.config();
    debug!("Using {config:?}");
    let client = TransmissionClient::try_new(config).await?;

    match cli.command {
        Command::List(args) => {
            client.set_sort(args.sort);
            let torrents = client.list().await?;
            print!("{}", output::torrent_table(&torrents));
        }
        Command::Get { id } => {
            let torrent = client.get(&id).await?;
            print!("{}", output::torrent_details(&torrent));
        }
        Command::Add(args) => {
            let added = client
                .add(args.source(), args.download_dir.as_deref())
                .await?;
            println!("Added {} (id {}, {})", added.name, added.id, added.hash_string);
        }
        Command::Start(args) => {
            println!("{}", run_action(&client, TorrentAction::Start, args).await?);
        }
        Command::Stop(args) => {
            println!("{}", run_action(&client, TorrentAction::Stop, args).await?);
        }
        Command::Verify(args) => {
            println!("{}", run_action(&client, TorrentAction::Verify, args).await?);
        }
        Command::Remove { id, delete_data } => {
            let name = client.remove(&id, delete_data).await?;
            println!("Removed {name}");
        }
        Command::Stats => print!("{}", output::stats_summary(&client.stats().await?)),
        Command::Version => println!("{}", client.version().await?),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    run(cli).await?;

    Ok(())
}
