use std::env;

use anyhow::Context;

/// Per-IP limit for the phone lookup routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub per_second: u64,
    pub burst_size: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// `None` when rate limiting is switched off
    pub rate_limit: Option<RateLimit>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let port = parse_var("PORT", 8080)?;
        let per_second = parse_var("LOOKUP_RATE_PER_SECOND", 2)?;
        let burst_size = parse_var("LOOKUP_RATE_BURST", 5)?;

        Ok(Self {
            database_url,
            port,
            rate_limit: rate_limit(per_second, burst_size),
        })
    }
}

/// A zero rate disables limiting
fn rate_limit(per_second: u64, burst_size: u32) -> Option<RateLimit> {
    (per_second > 0).then_some(RateLimit {
        per_second,
        burst_size: burst_size.max(1),
    })
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", name, value)),
        Err(_) => Ok(default),
    }
}
