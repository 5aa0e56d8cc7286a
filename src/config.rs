use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use url::Url;

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.github.com/users";

pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub upstream_url: Url,
    pub upstream_timeout: Duration,
    pub log_json: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let listen_addr: SocketAddr = env::var("PROFILE_RELAY_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("invalid PROFILE_RELAY_ADDR")?;

        let upstream_url = parse_upstream_url(
            &env::var("PROFILE_RELAY_UPSTREAM_URL")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string()),
        )?;

        let upstream_timeout = parse_duration("PROFILE_RELAY_UPSTREAM_TIMEOUT_SECONDS", 10)?;

        let log_json = env::var("PROFILE_RELAY_LOG_JSON")
            .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            listen_addr,
            upstream_url,
            upstream_timeout,
            log_json,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }

    pub fn upstream_timeout(&self) -> Duration {
        self.upstream_timeout
    }
}

pub fn parse_upstream_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("PROFILE_RELAY_UPSTREAM_URL is not a valid url: {raw}"))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        bail!("PROFILE_RELAY_UPSTREAM_URL must be an absolute http(s) base url: {raw}");
    }

    Ok(url)
}

fn parse_duration(env_key: &str, default_secs: u64) -> Result<Duration> {
    let raw = env::var(env_key).unwrap_or_else(|_| default_secs.to_string());
    let secs: u64 = raw
        .parse()
        .with_context(|| format!("{env_key} must be an integer number of seconds"))?;

    Ok(Duration::from_secs(secs))
}
