pub mod config;
pub mod deps;
pub mod error;
pub mod routes;
pub mod state;

pub use config::Config;
pub use deps::CrateManifest;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;

use anyhow::Context;

/// Bind and run the dashboard server until the process exits.
pub async fn serve(state: AppState, bind: &str) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;

    tracing::info!(addr = %listener.local_addr()?, "devlens dashboard listening");
    axum::serve(listener, app).await?;
    Ok(())
}
