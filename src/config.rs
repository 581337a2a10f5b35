use anyhow::{Context, Result};
use std::env;

use crate::i18n::Lang;

#[derive(Debug, Clone)]
pub struct Config {
    /// When unset the service runs on the in-memory store
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub nats_url: Option<String>,
    pub port: u16,
    pub default_lang: Lang,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let default_lang = match non_empty("DEFAULT_LANG") {
            Some(tag) => Lang::from_tag(&tag).with_context(|| format!("Unsupported DEFAULT_LANG {}", tag))?,
            None => Lang::En,
        };

        Ok(Config {
            database_url: non_empty("DATABASE_URL"),
            db_max_connections: non_empty("DB_MAX_CONNECTIONS")
                .map(|v| v.parse::<u32>())
                .transpose()
                .context("Invalid DB_MAX_CONNECTIONS")?
                .unwrap_or(10),
            nats_url: non_empty("NATS_URL"),
            port: non_empty("PORT")
                .map(|v| v.parse::<u16>())
                .transpose()
                .context("Invalid PORT")?
                .unwrap_or(8083),
            default_lang,
        })
    }
}
