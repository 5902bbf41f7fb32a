use doc_extractor::{config::Config, routes::create_router, utils::init_logger, AppState};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);
    info!(
        tesseract = %config.ocr.tesseract_cmd,
        pdftoppm = %config.ocr.pdftoppm_cmd,
        "OCR tools configured"
    );

    // Create shared state
    let state = AppState::new(config.clone());

    // Create router
    let app = create_router(state);

    // Start server
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
