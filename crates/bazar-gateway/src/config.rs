//! Environment-driven gateway configuration.

use crate::paths::PublicPathSet;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;
const DEV_SECRET: &str = "bazar-dev-secret";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub public_paths: PublicPathSet,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            jwt_secret: DEV_SECRET.to_string(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            public_paths: PublicPathSet::default(),
        }
    }
}

impl GatewayConfig {
    /// Read configuration from the environment, falling back to
    /// development defaults. Unparseable values fall back too, with a
    /// warning, rather than aborting startup.
    pub fn from_env() -> Self {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(%raw, "invalid PORT, using {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        let jwt_secret = match std::env::var("BAZAR_JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("BAZAR_JWT_SECRET not set, using the development secret");
                DEV_SECRET.to_string()
            }
        };

        let token_ttl_secs = match std::env::var("BAZAR_TOKEN_TTL_SECS") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(%raw, "invalid BAZAR_TOKEN_TTL_SECS, using default");
                DEFAULT_TOKEN_TTL_SECS
            }),
            Err(_) => DEFAULT_TOKEN_TTL_SECS,
        };

        let public_paths = match std::env::var("BAZAR_PUBLIC_PATHS") {
            Ok(csv) => {
                let set = PublicPathSet::from_csv(&csv);
                if set.is_empty() {
                    tracing::warn!("BAZAR_PUBLIC_PATHS is empty, every path requires a token");
                }
                set
            }
            Err(_) => PublicPathSet::default(),
        };

        Self {
            port,
            jwt_secret,
            token_ttl_secs,
            public_paths,
        }
    }
}
