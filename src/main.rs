#![forbid(unsafe_code)]

mod catalog;
mod chart;
mod columns;
mod dispatch;
mod error;
mod params;
mod provider;
mod server;
mod table;
mod years;

use anyhow::Result;
use clap::Parser;
use log::info;
use provider::{NFLVERSE_BASE_URL, NflverseProvider};
use server::SharedProvider;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(version, about = "Web explorer for historical NFL statistics")]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Base URL the published dataset assets are fetched from.
    #[arg(long, default_value = NFLVERSE_BASE_URL)]
    asset_base_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let provider: SharedProvider = Arc::new(NflverseProvider::new(cli.asset_base_url));
    let app = server::router(provider);

    let listener = TcpListener::bind(cli.bind).await?;
    info!("Listening on http://{}", cli.bind);
    axum::serve(listener, app).await?;
    Ok(())
}
