use clap::Parser;
use tracing_subscriber::EnvFilter;
use triad::{ServerArgs, TriadServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = ServerArgs::parse();
    let server = TriadServer::builder()
        .bind(&args.bind_addr())
        .room_config(args.room_config())
        .build()
        .await?;

    server.run().await?;
    Ok(())
}
