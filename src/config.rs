use std::env;
use std::fmt::Display;
use std::str::FromStr;

use anyhow::anyhow;

use crate::scorer::Thresholds;

/// Default request body ceiling; base64 inflates images by a third.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
    pub thresholds: Thresholds,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let stock = Thresholds::default();

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 5000)?,
            max_body_bytes: parse_or(&lookup, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
            thresholds: Thresholds {
                noise_threshold: parse_or(&lookup, "NOISE_THRESHOLD", stock.noise_threshold)?,
                edge_threshold: parse_or(&lookup, "EDGE_THRESHOLD", stock.edge_threshold)?,
                brightness_center: parse_or(&lookup, "BRIGHTNESS_CENTER", stock.brightness_center)?,
                brightness_tolerance: parse_or(
                    &lookup,
                    "BRIGHTNESS_TOLERANCE",
                    stock.brightness_tolerance,
                )?,
                ..stock
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{key} must be a number, got {raw:?}: {e}")),
        None => Ok(default),
    }
}
