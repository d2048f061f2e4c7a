use args::Args;
use clap::Parser;
use config::Config;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;

mod args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    telemetry::init(&args.log_filter);

    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        log::warn!("no config file at {}, using defaults", args.config.display());
        Config::default()
    };

    if let Some(data_dir) = &args.data_dir {
        config.data.data_dir = data_dir.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let listen_address: SocketAddr = ([0, 0, 0, 0], config.server.port).into();
    let shutdown_signal = CancellationToken::new();

    let shutdown_for_signal = shutdown_signal.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        shutdown_for_signal.cancel();
    });

    server::serve(server::ServeConfig {
        listen_address,
        config,
        shutdown_signal,
        log_filter: args.log_filter,
        version: env!("CARGO_PKG_VERSION").to_string(),
        bound_addr_sender: None,
    })
    .await
}
