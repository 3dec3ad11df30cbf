use portfolio_api::{app, config, database, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    let config = config::config();
    tracing_subscriber::fmt::init();
    tracing::info!("Starting Portfolio API in {:?} mode", config.environment);

    let pool = database::connect_pool()
        .unwrap_or_else(|e| panic!("failed to create database pool: {}", e));

    // The pool is lazy; if the database is down we still serve (degraded) and
    // /health reports it. Migrations are retried on next start.
    if let Err(e) = database::run_migrations(&pool).await {
        tracing::warn!("migrations not applied: {}", e);
    }

    let app = app(AppState::new(pool));

    // Allow tests or deployments to override port via env
    let port = std::env::var("PORTFOLIO_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Portfolio API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
