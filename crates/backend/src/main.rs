pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::system::audit::StaticAuditor;
use crate::system::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_file = system::tracing::initialize()?;
    tracing::info!("Logging to {}", log_file.display());

    let config = shared::config::load_config()?;
    let db_path = shared::config::get_database_path(&config);

    let db = shared::data::db::initialize_database(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;
    let coins = domain::a001_coin::service::count_all(&db).await?;
    tracing::info!("Database ready at {}: {} coin(s)", db_path.display(), coins);

    let auditor = Arc::new(StaticAuditor::new(config.audit.default_actor.clone()));
    let app = routes::configure_routes(AppState::new(db, auditor));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid server address: {e}"))?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
