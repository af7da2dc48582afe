//! Voting server entry-point: loads settings, prepares backing services and
//! serves the JSON pages.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use voting::inbound::http::health::HealthState;
use voting::inbound::http::session_config::{BuildMode, otp_policy, session_settings_from_env};
use voting::outbound::cache::RedisOtpStore;
use voting::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use voting::settings::VotingSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = VotingSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let config = build_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}

async fn build_config(settings: &VotingSettings) -> std::io::Result<ServerConfig> {
    let mode = BuildMode::from_debug_assertions();
    let session = session_settings_from_env(&DefaultEnv::new(), mode)
        .map_err(|e| std::io::Error::other(format!("invalid session configuration: {e}")))?;
    let policy = otp_policy(settings.otp_bypass, mode).map_err(std::io::Error::other)?;
    let ttl = settings.otp_ttl().map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_otp(policy, ttl);

    if let Some(url) = settings.database_url() {
        run_pending_migrations(url)
            .await
            .map_err(|e| std::io::Error::other(format!("database migration failed: {e}")))?;
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .map_err(|e| std::io::Error::other(format!("database pool failed: {e}")))?;
        config = config.with_db_pool(pool);
    }

    if let Some(url) = settings.redis_url() {
        let store = RedisOtpStore::connect(url)
            .await
            .map_err(|e| std::io::Error::other(format!("redis connection failed: {e}")))?;
        config = config.with_redis(store);
    }

    info!(bind_addr = %config.bind_addr(), "voting server configured");
    Ok(config)
}
