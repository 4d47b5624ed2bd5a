use std::sync::Arc;

use card_optimizer::{
    api::{create_router, AppState},
    config::Config,
    services::catalog::JsonFileCardSource,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("card_optimizer=info,tower_http=info")
            }),
        )
        .init();

    let config = Config::from_env()?;

    let card_source = JsonFileCardSource::new(&config.cards_path);
    tracing::info!(path = %card_source.path().display(), "Serving card catalog");

    let state = AppState::new(Arc::new(card_source), config.engine_settings());
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
