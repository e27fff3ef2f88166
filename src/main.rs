use anyhow::Context;
use daigyo::{bootstrap, config::Config, db, session, store::Hasher, AppState};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    let db_pool = db::connect(&config.database_url, config.db_max_connections).await?;
    db::migrate(&db_pool).await.context("failed to create schema")?;
    info!("schema ready");

    let app_state = AppState::new(db_pool.clone(), Hasher::new(config.argon2.clone()));
    bootstrap::seed_admin(&app_state.accounts, &config.admin_email, &config.admin_password)
        .await
        .context("failed to seed administrator")?;

    let session_layer = session::layer(config.session_inactivity, config.secure_cookie);
    let app = daigyo::app(app_state, session_layer);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    db_pool.close().await;
    info!("stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
