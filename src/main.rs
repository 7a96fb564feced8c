use clap::Parser;
use std::sync::Arc;

use storefront::api::{self, AppState};
use storefront::config::Config;
use storefront::retail::SearchClient;

#[derive(Parser, Debug)]
#[command(name = "storefront", about = "HTTP gateway for retail product search")]
struct Cli {
    /// Listen address, overriding BIND_ADDR.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }

    let bind_addr = config.bind_addr.clone();
    let client = SearchClient::new(config.endpoint.as_str(), config.auth_token.clone());
    let router = api::create_router(Arc::new(AppState { client, config }));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;

    Ok(())
}
