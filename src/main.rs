use parking_lot::Mutex;
use prompt_lab::{
    api::{HttpPromptService, PromptService},
    config::LabConfig,
    lab::{self, Laboratory},
    render::{ArboardClipboard, ClipboardWriter},
    routes::{router, AppState},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = LabConfig::from_env();
    tracing::info!(api_base = %config.api_base, "Using prompt service");

    let service: Arc<dyn PromptService> = Arc::new(HttpPromptService::new(config.api_base.clone()));
    let clipboard: Box<dyn ClipboardWriter> = Box::new(ArboardClipboard);
    let state = AppState {
        lab: Laboratory::shared(),
        service,
        clipboard: Arc::new(Mutex::new(clipboard)),
        asset_base: Arc::from(config.asset_base.as_str()),
    };

    // Reference data loads in the background; the lab reports `loading` until it lands.
    {
        let (lab, service) = (state.lab.clone(), state.service.clone());
        tokio::spawn(async move { lab::load(&lab, service.as_ref()).await });
    }

    let app = router(state);
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!(%addr, "Starting prompt lab");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;
    Ok(())
}
