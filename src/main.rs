use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use story_service::{
    api::routes::create_router,
    backend::{spawn_session_probe, BackendClient},
    config::Config,
    loader::StoryLoader,
    logging::init_logging,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_logging();

    let loader = StoryLoader::new(&config.story_base_url);
    info!(url = loader.url(), "story source");

    // Config::load has read .env, so the shared client sees it
    let backend = BackendClient::shared();
    spawn_session_probe(Arc::clone(&backend));

    let app_state = AppState {
        loader: Arc::new(loader),
        backend,
    };
    let app = create_router(app_state);

    let listener = TcpListener::bind(config.server_addr).await?;
    info!(addr = %config.server_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
