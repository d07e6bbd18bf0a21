use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use novel_character_analyzer::{
    config::Config,
    api::routes::create_router,
    store::{MemoryStore, NovelStore, SupabaseStore},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "novel_character_analyzer=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;

    let store: Arc<dyn NovelStore> = match &config.supabase {
        Some(supabase) => {
            tracing::info!(url = %supabase.url, "Recording novels in Supabase");
            Arc::new(SupabaseStore::new(supabase)?)
        }
        None => {
            tracing::warn!("SUPABASE_URL or SUPABASE_ANON_KEY not set; novels are kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    // Create application state
    let app_state = AppState::new(config, store);

    // Build the router with routes
    let app = create_router(app_state);

    // Create the listener
    let listener = TcpListener::bind(server_addr).await?;

    // Start the server
    tracing::info!(%server_addr, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
