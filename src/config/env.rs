//! Environment variable overrides, the highest-precedence layer.
//!
//! One naming scheme is recognised:
//!
//! | Variable | Field |
//! |---|---|
//! | `SERVER_PORT` | `server.port` |
//! | `LOG_LEVEL` | `server.logLevel` |
//! | `PROXY_DEFAULT_HOST` | `proxy.defaultHost` |
//! | `PROXY_DEFAULT_PATH` | `proxy.defaultPath` |
//! | `REQUEST_TIMEOUT` | `proxy.requestTimeoutSeconds` |
//! | `ENABLE_STATUS_ENDPOINT` | `features.enableStatusEndpoint` |
//! | `ENABLE_CONFIG_ENDPOINT` | `features.enableConfigEndpoint` |
//! | `MEMORY_CHUNK_MB` | `simulation.memoryChunkMb` |
//!
//! Empty values are treated as unset. Values that fail to parse are ignored
//! and the prior value kept.

use std::str::FromStr;

use crate::config::schema::FixtureConfig;
use crate::config::validation::{is_valid_chunk_mb, is_valid_host};

pub const SERVER_PORT: &str = "SERVER_PORT";
pub const LOG_LEVEL: &str = "LOG_LEVEL";
pub const PROXY_DEFAULT_HOST: &str = "PROXY_DEFAULT_HOST";
pub const PROXY_DEFAULT_PATH: &str = "PROXY_DEFAULT_PATH";
pub const REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT";
pub const ENABLE_STATUS_ENDPOINT: &str = "ENABLE_STATUS_ENDPOINT";
pub const ENABLE_CONFIG_ENDPOINT: &str = "ENABLE_CONFIG_ENDPOINT";
pub const MEMORY_CHUNK_MB: &str = "MEMORY_CHUNK_MB";

/// Overlay env vars onto `config`, returning the names that were applied.
pub fn apply_env_overrides<F>(config: &mut FixtureConfig, lookup: &F) -> Vec<&'static str>
where
    F: Fn(&str) -> Option<String>,
{
    let mut applied = Vec::new();
    let var = |name: &'static str| {
        let value = lookup(name).filter(|v| !v.is_empty());
        (name, value)
    };

    if let (name, Some(port)) = var(SERVER_PORT) {
        if let Some(port) = parse_positive::<u16>(&port) {
            config.server.port = port;
            applied.push(name);
        }
    }

    if let (name, Some(level)) = var(LOG_LEVEL) {
        config.server.log_level = level;
        applied.push(name);
    }

    if let (name, Some(host)) = var(PROXY_DEFAULT_HOST) {
        if is_valid_host(&host) {
            config.proxy.default_host = host;
            applied.push(name);
        }
    }

    if let (name, Some(path)) = var(PROXY_DEFAULT_PATH) {
        config.proxy.default_path = path;
        applied.push(name);
    }

    if let (name, Some(timeout)) = var(REQUEST_TIMEOUT) {
        if let Some(secs) = parse_positive::<u64>(&timeout) {
            config.proxy.request_timeout_seconds = secs;
            applied.push(name);
        }
    }

    if let (name, Some(flag)) = var(ENABLE_STATUS_ENDPOINT) {
        if let Some(enabled) = parse_flag(&flag) {
            config.features.enable_status_endpoint = enabled;
            applied.push(name);
        }
    }

    if let (name, Some(flag)) = var(ENABLE_CONFIG_ENDPOINT) {
        if let Some(enabled) = parse_flag(&flag) {
            config.features.enable_config_endpoint = enabled;
            applied.push(name);
        }
    }

    if let (name, Some(chunk)) = var(MEMORY_CHUNK_MB) {
        let mb = parse_positive::<usize>(&chunk).filter(|mb| is_valid_chunk_mb(*mb));
        if let Some(mb) = mb {
            config.simulation.memory_chunk_mb = mb;
            applied.push(name);
        }
    }

    applied
}

fn parse_positive<T>(raw: &str) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
{
    raw.trim().parse::<T>().ok().filter(|v| *v > T::default())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
