use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use educonnect::api::router;
use educonnect::state::AppState;
use educonnect::storage::FileDocumentStore;
use educonnect::tracker::Tracker;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "educonnect=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_path = std::env::var("EDUCONNECT_DATA")
        .unwrap_or_else(|_| "educonnect_dados_v1.json".to_string());

    let document = FileDocumentStore::new(&data_path);
    let tracker = Tracker::open(Box::new(document));
    let state = AppState::new(tracker);

    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
