//! Environment-driven configuration.
//!
//! All deployment knobs come from the environment (optionally via a `.env`
//! file): listening address, store location, and the token signing secret.
//! The signing secret is REQUIRED; there is deliberately no fallback value.

use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to a local SQLite file; unset or ":memory:" selects the
    /// in-memory store
    pub path: Option<String>,
    /// Remote Turso replica URL (takes precedence when the `turso`
    /// feature is enabled)
    pub url: Option<String>,
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Token validity in seconds (default: one hour)
    pub token_expiry: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
            },
            database: DatabaseConfig {
                path: env::var("DATABASE_PATH").ok(),
                url: env::var("TURSO_DATABASE_URL").ok(),
                auth_token: env::var("TURSO_AUTH_TOKEN").ok(),
            },
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET").map_err(|_| "JWT_SECRET must be set")?,
                token_expiry: env::var("TOKEN_EXPIRY")
                    .unwrap_or_else(|_| "3600".to_string())
                    .parse()?,
            },
        })
    }
}
