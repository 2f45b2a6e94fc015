use anyhow::Result;
use devlens_server::{serve, AppState, Config};
use tracing_subscriber::EnvFilter;

pub fn handle(config: Config, bind: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("devlens=info,tower_http=info")),
        )
        .init();

    let state = AppState::from_config(&config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(state, bind))
}
