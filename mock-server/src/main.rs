use std::env;

use tokio::net::TcpListener;
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();
    let level = match env::var("LOG_LEVEL") {
        Ok(value) => value.parse::<Level>()?,
        Err(_) => Level::INFO,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_level(true)
        .compact()
        .init();

    let port = env::var("PORT").unwrap_or_else(|_| "5173".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "mock api listening, base url http://{addr}/api");
    mock_api::run(listener).await?;
    Ok(())
}
