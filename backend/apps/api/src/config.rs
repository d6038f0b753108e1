//! Server configuration loaded from the environment
//!
//! `.env` is read by `dotenvy` before [`ApiConfig::from_env`] runs.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use crm::CrmConfig;
use platform::token::{DEFAULT_TOKEN_TTL, parse_ttl};

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_MAIL_FROM: &str = "5K Energia Solar <no-reply@localhost>";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    /// `None` in debug builds without `JWT_SECRET`: a random key is used
    pub jwt_secret: Option<String>,
    pub jwt_ttl: Duration,
    pub password_pepper: Option<String>,
    pub frontend_url: String,
    pub frontend_origins: Vec<String>,
    pub upload_dir: PathBuf,
    /// Prefix of stored file URLs; empty means relative `/uploads/...`
    pub public_url: String,
    pub mail_from: String,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match var("PORT") {
            Some(port) => port.parse().context("PORT must be a port number")?,
            None => DEFAULT_PORT,
        };
        let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(n) => n
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let jwt_secret = var("JWT_SECRET");
        if jwt_secret.is_none() && !cfg!(debug_assertions) {
            bail!("JWT_SECRET must be set in production");
        }
        let jwt_ttl = match var("JWT_EXPIRES_IN") {
            Some(raw) => parse_ttl(&raw)
                .with_context(|| format!("JWT_EXPIRES_IN has an invalid duration: {raw}"))?,
            None => DEFAULT_TOKEN_TTL,
        };

        let frontend_url = var("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string());
        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| frontend_url.clone())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            port,
            database_url,
            max_connections,
            jwt_secret,
            jwt_ttl,
            password_pepper: var("PASSWORD_PEPPER"),
            frontend_url,
            frontend_origins,
            upload_dir: var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./uploads")),
            public_url: var("PUBLIC_URL")
                .unwrap_or_default()
                .trim_end_matches('/')
                .to_string(),
            mail_from: var("MAIL_FROM").unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string()),
        })
    }

    pub fn auth(&self) -> AuthConfig {
        let config = match &self.jwt_secret {
            Some(secret) => AuthConfig::new(secret.as_bytes(), self.jwt_ttl),
            None => {
                tracing::warn!("JWT_SECRET not set, using a random signing key");
                AuthConfig::with_random_secret(self.jwt_ttl)
            }
        };
        match &self.password_pepper {
            Some(pepper) => config.with_pepper(pepper.as_bytes()),
            None => config,
        }
    }

    pub fn crm(&self) -> CrmConfig {
        CrmConfig::new(&self.frontend_url, &self.mail_from)
    }

    /// Base URL handed to the object store
    pub fn uploads_base_url(&self) -> String {
        format!("{}/uploads", self.public_url)
    }
}

/// Unset and blank variables are treated the same
fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
