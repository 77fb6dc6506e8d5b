//! Server configuration from the environment.

use std::net::SocketAddr;
use std::str::FromStr;

use sortscope_steps::AlgorithmId;

use crate::error::{Error, Result};
use crate::session::SessionConfig;

/// Configuration for the visualization server.
#[derive(Debug, Clone, PartialEq)]
pub struct VisConfig {
    /// HTTP listen address
    pub addr: SocketAddr,

    /// Initial array size and speed
    pub session: SessionConfig,

    /// Seed for reproducible inputs (random when unset)
    pub seed: Option<u64>,

    /// Algorithm selected at startup
    pub algorithm: AlgorithmId,

    /// Use faithful traces for every algorithm instead of the placeholder
    pub faithful: bool,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            session: SessionConfig::default(),
            seed: None,
            algorithm: AlgorithmId::default(),
            faithful: false,
        }
    }
}

impl VisConfig {
    /// Create config from environment variables with defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let addr = parse_var(&lookup, "SORTSCOPE_ADDR")?.unwrap_or(defaults.addr);
        let size = parse_var(&lookup, "SORTSCOPE_SIZE")?.unwrap_or(defaults.session.size());
        let speed = parse_var(&lookup, "SORTSCOPE_SPEED")?.unwrap_or(defaults.session.speed());
        let seed = parse_var(&lookup, "SORTSCOPE_SEED")?;
        let algorithm = match lookup("SORTSCOPE_ALGORITHM") {
            Some(name) => name.parse()?,
            None => defaults.algorithm,
        };
        let faithful = parse_var(&lookup, "SORTSCOPE_FAITHFUL")?.unwrap_or(defaults.faithful);

        Ok(Self {
            addr,
            session: SessionConfig::new(size, speed),
            seed,
            algorithm,
            faithful,
        })
    }

    /// Apply positional arguments: `[size] [port]`.
    pub fn with_args<I>(mut self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        if let Some(size) = args.next() {
            let size = parse_value::<usize>("size", &size)?;
            self.session = self.session.with_size(size);
        }
        if let Some(port) = args.next() {
            self.addr.set_port(parse_value("port", &port)?);
        }
        Ok(self)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| parse_value(key, &raw))
        .transpose()
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| Error::Config(format!("invalid {name} {raw:?}: {e}")))
}
