//! Pantry Engine - Main entry point.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::routing::get;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pantry_engine::api;
use pantry_engine::infrastructure::{
    clock::SystemClock,
    firestore::FirestoreItemStore,
    memory_store::InMemoryItemStore,
    ports::{ClockPort, ItemStore},
    settings::{EngineSettings, StoreBackend},
};
use pantry_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be started from `crates/engine`).
    let env_files = load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pantry_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Pantry Engine");
    for path in &env_files {
        tracing::debug!(path = %path.display(), "Loaded env file");
    }

    let settings = EngineSettings::from_env()?;

    let store: Arc<dyn ItemStore> = match &settings.backend {
        StoreBackend::Memory => {
            tracing::warn!(
                collection = %settings.collection,
                "Using in-memory item store, nothing will be persisted"
            );
            Arc::new(InMemoryItemStore::new())
        }
        StoreBackend::Firestore(config) => {
            tracing::info!(
                project_id = %config.project_id,
                database = %config.database,
                collection = %config.collection,
                "Using Firestore item store"
            );
            Arc::new(FirestoreItemStore::new(config)?)
        }
    };
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

    let app = Arc::new(App::new(store, clock));

    // An unreachable store at startup is not fatal; clients can retry refresh.
    match app.use_cases.inventory.refresh().await {
        Ok(list) => tracing::info!(items = list.len(), "Loaded inventory"),
        Err(e) => tracing::warn!(error = %e, "Initial inventory load failed"),
    }

    let mut router = api::http::routes()
        .route("/ws", get(api::websocket::ws_handler))
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = api::cors_layer(settings.cors_allowed_origins.as_deref()) {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = settings.bind_address().parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// `.env.local` overrides `.env`; neither overrides the real environment.
fn load_dotenv_from_repo_root() -> Vec<PathBuf> {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    [".env.local", ".env"]
        .map(|f| repo_root.join(f))
        .into_iter()
        .filter(|path| dotenvy::from_path(path).is_ok())
        .collect()
}
