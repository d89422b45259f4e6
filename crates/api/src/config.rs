//! Server configuration, sourced from the environment.

use crate::auth::jwt::JwtConfig;

/// Runtime configuration for the HTTP server.
///
/// Everything except `JWT_SECRET` has a local-development default.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address. `HOST`, default `0.0.0.0`.
    pub host: String,
    /// Bind port. `PORT`, default `5000`.
    pub port: u16,
    /// Allowed CORS origins. `CORS_ORIGINS`, comma separated, default the
    /// local Vite dev server.
    pub cors_origins: Vec<String>,
    /// Per-request timeout in seconds. `REQUEST_TIMEOUT_SECS`, default `30`.
    pub request_timeout_secs: u64,
    /// JWT signing configuration, read by the auth extractor.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Read the configuration from environment variables.
    ///
    /// # Panics
    ///
    /// Panics on unparseable numeric values and on a missing `JWT_SECRET`;
    /// misconfiguration should stop the process before it binds.
    pub fn from_env() -> Self {
        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_or("PORT", "5000")
                .parse()
                .expect("PORT must be a valid u16"),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", "30")
                .parse()
                .expect("REQUEST_TIMEOUT_SECS must be a valid u64"),
            jwt: JwtConfig::from_env(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
