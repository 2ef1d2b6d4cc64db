use portal_router::{config, handlers, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up JWT_SECRET, PORTAL_TENANT_SEED, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting portal-router in {:?} mode", config.environment);

    // Compile and validate the route tables up front; a broken table
    // definition must fail startup, not the first request
    let registry = routes::registry();
    tracing::info!(tables = registry.tables().len(), "route tables validated");

    let app = handlers::router()?;

    // Allow tests or deployments to override port via env
    let port = std::env::var("PORTAL_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("portal-router listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
