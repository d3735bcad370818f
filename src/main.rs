use dca_calculator::{build_state, config::Config, init_tracing, routes::app_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();

    let state = build_state(&config)?;
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    tracing::info!("Listening on port {}", config.port);
    axum::serve(listener, app).await?;
    Ok(())
}
