//! Application configuration loaded from environment variables.

use std::env;

use ideaslab_core::services::BackfillPolicy;
use ideaslab_infra::DatabaseConfig;
use ideaslab_infra::auth::JwtConfig;
use uuid::Uuid;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub backfill: BackfillPolicy,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        });

        let backfill = parse_backfill_policy(
            env::var("LEGACY_BACKFILL").ok().as_deref(),
            env::var("LEGACY_OWNER_ID").ok().as_deref(),
        );

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            jwt: JwtConfig::from_env(),
            backfill,
        }
    }
}

/// `LEGACY_OWNER_ID` wins over `LEGACY_BACKFILL`; `off`/`false`/`0` disables claiming.
fn parse_backfill_policy(mode: Option<&str>, owner: Option<&str>) -> BackfillPolicy {
    if let Some(raw) = owner.filter(|s| !s.trim().is_empty()) {
        match Uuid::parse_str(raw.trim()) {
            Ok(owner) => return BackfillPolicy::AssignTo(owner),
            Err(e) => tracing::warn!(error = %e, "Ignoring invalid LEGACY_OWNER_ID"),
        }
    }

    match mode.map(|m| m.trim().to_ascii_lowercase()) {
        Some(m) if matches!(m.as_str(), "off" | "false" | "0" | "disabled") => BackfillPolicy::Disabled,
        _ => BackfillPolicy::ClaimByFirstCaller,
    }
}
