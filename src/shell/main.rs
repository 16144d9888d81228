use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use timeclock::shell::config::AppConfig;
use timeclock::shell::http::router;
use timeclock::shell::state::AppState;
use timeclock::shared::infrastructure::change_outbox::in_memory::InMemoryChangeOutbox;
use timeclock::shared::infrastructure::entry_store::in_memory::InMemoryEntryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();

    // In-memory deps for now
    let store = Arc::new(InMemoryEntryStore::with_op_timeout_ms(
        config.store_timeout_ms,
    ));
    let outbox = Arc::new(InMemoryChangeOutbox::new());
    let state = AppState::with_infrastructure(store, outbox);

    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.bind_addr();
    tracing::info!("timeclock listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
