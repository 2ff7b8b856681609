use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use anyhow::Context;
use dotenv::dotenv;
use tracing::Level;

use crate::methods::reservation::StatusPolicy;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    pub latency_scale: f64,
    pub status_policy: StatusPolicy,
    pub booking_horizon_days: i64,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3030),
            latency_scale: 1.0,
            status_policy: StatusPolicy::Overwrite,
            booking_horizon_days: 90,
            log_level: Level::INFO,
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, var: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(var) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{var} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

impl Config {
    /// Read the configuration from the process environment, after loading `.env`
    /// if one exists.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build a configuration from any variable source. Unset variables fall back
    /// to their defaults; unparseable ones are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Config::default();

        let ip: IpAddr = parse_var(&lookup, "STOREFRONT_ADDR", defaults.addr.ip())?;
        let port: u16 = parse_var(&lookup, "STOREFRONT_PORT", defaults.addr.port())?;
        let latency_scale: f64 = parse_var(&lookup, "LATENCY_SCALE", defaults.latency_scale)?;
        if !latency_scale.is_finite() || latency_scale < 0.0 {
            anyhow::bail!("LATENCY_SCALE must be a non-negative number, got {latency_scale}");
        }
        let strict: bool = parse_var(&lookup, "STRICT_STATUS_TRANSITIONS", false)?;
        let booking_horizon_days: i64 =
            parse_var(&lookup, "BOOKING_HORIZON_DAYS", defaults.booking_horizon_days)?;
        if booking_horizon_days < 0 {
            anyhow::bail!("BOOKING_HORIZON_DAYS must not be negative, got {booking_horizon_days}");
        }
        let log_level: Level = match lookup("LOG_LEVEL") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("LOG_LEVEL has an invalid value '{raw}'"))?,
            None => defaults.log_level,
        };

        Ok(Config {
            addr: SocketAddr::new(ip, port),
            latency_scale,
            status_policy: if strict { StatusPolicy::Strict } else { StatusPolicy::Overwrite },
            booking_horizon_days,
            log_level,
        })
    }
}
