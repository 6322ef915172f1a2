use anyhow::{Context, Result};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

/// Port and place autocomplete service.
#[derive(Parser)]
#[command(name = "server", version)]
struct Args {
    /// Dataset file: a JSON array, or one object per line (.jsonl / .ndjson)
    #[arg(long, default_value = "./ports.json")]
    data: PathBuf,
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,
    #[arg(long, default_value_t = 3001)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let Args { data, host, port } = Args::parse();

    let app = server::build_app(&data)
        .with_context(|| format!("loading dataset {}", data.display()))?;
    let addr = SocketAddr::new(host, port);
    let listener = TcpListener::bind(addr).await.with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, data = %data.display(), "suggest api listening");
    axum::serve(listener, app).await?;
    Ok(())
}
