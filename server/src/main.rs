use anyhow::Context;
use tokio::net::TcpListener;

use todo_api::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let db_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| "tododb.db".to_string());
    let conn = todo_api::db::open(&db_path)
        .with_context(|| format!("opening database at {db_path}"))?;
    tracing::info!(path = %db_path, "database ready");

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "listening");

    todo_api::run(listener, AppState::new(conn)).await?;
    Ok(())
}
