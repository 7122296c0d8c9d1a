//! Environment-based runtime configuration.

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

// Local-development defaults
const DEFAULT_DATABASE_URL: &str = "sqlite:spendwise.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_NEWS_BASE_URL: &str = "https://fakenews.squirro.com";

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database URL
    pub database_url: String,
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// Base URL of the remote news feed
    pub news_base_url: String,
}

impl Config {
    /// Read the configuration from the environment, falling back to
    /// local-development defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("SPENDWISE_DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let bind_addr = env::var("SPENDWISE_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("Invalid SPENDWISE_BIND_ADDR")?;
        let news_base_url = env::var("SPENDWISE_NEWS_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_NEWS_BASE_URL.to_string());

        Ok(Self {
            database_url,
            bind_addr,
            news_base_url,
        })
    }
}
