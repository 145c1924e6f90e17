//! Configuration schema definitions.
//!
//! The JSON config file mirrors these structs exactly (camelCase keys,
//! nested `server`, `proxy`, `features` and `simulation` groups). Every
//! field has a default so partial files are valid.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const MIB: usize = 1024 * 1024;

/// Largest chunk size a single allocation can hold.
pub const MAX_MEMORY_CHUNK_MB: usize = isize::MAX as usize / MIB;

/// Root configuration snapshot for the fixture.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct FixtureConfig {
    /// Listener and logging settings.
    pub server: ServerConfig,

    /// Defaults for the proxy passthrough.
    pub proxy: ProxyConfig,

    /// Optional diagnostic endpoints.
    pub features: FeatureConfig,

    /// Induced failure tuning.
    pub simulation: SimulationConfig,
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    /// TCP port to listen on (all interfaces).
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 9090,
            log_level: "info".to_string(),
        }
    }
}

/// Upstream defaults used when a proxy request leaves fields empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProxyConfig {
    /// Upstream base URL, e.g. `http://postman-echo.com`.
    pub default_host: String,

    /// Upstream path, joined to the host with a single slash.
    pub default_path: String,

    /// Hard deadline for one upstream exchange.
    pub request_timeout_seconds: u64,
}

impl ProxyConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            default_host: "http://postman-echo.com".to_string(),
            default_path: "get?foo1=bar1&foo2=bar2".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

/// Feature toggles for the diagnostic endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureConfig {
    /// Register `/status/`.
    pub enable_status_endpoint: bool,

    /// Register `/config/`.
    pub enable_config_endpoint: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            enable_status_endpoint: true,
            enable_config_endpoint: true,
        }
    }
}

/// Induced failure settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    /// Size of each block retained by the memory growth loop, in MiB.
    pub memory_chunk_mb: usize,

    /// Stop allocating after this many chunks and hold them; 0 grows forever.
    pub memory_chunk_limit: usize,

    /// Exit status used by the crash endpoint. Its low byte is never zero.
    pub exit_code: i32,

    /// Upper bound on waiting for in-flight responses before exiting.
    pub drain_timeout_seconds: u64,
}

impl SimulationConfig {
    pub fn chunk_bytes(&self) -> usize {
        self.memory_chunk_mb.saturating_mul(MIB)
    }

    pub fn chunk_limit(&self) -> Option<usize> {
        (self.memory_chunk_limit > 0).then_some(self.memory_chunk_limit)
    }

    pub fn drain_timeout(&self) -> Duration {
        Duration::from_secs(self.drain_timeout_seconds)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            memory_chunk_mb: 500,
            memory_chunk_limit: 0,
            exit_code: 1,
            drain_timeout_seconds: 5,
        }
    }
}

/// Where the snapshot came from, echoed by `/config/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSource {
    /// Value of `CONFIG_FILE_PATH`, empty when unset.
    pub file_path_env_var: String,

    /// True only when the file was read and parsed successfully.
    pub loaded_from_file: bool,
}
