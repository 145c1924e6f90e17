//! Configuration validation.
//!
//! # Responsibilities
//! - Reject zero ports, timeouts and chunk sizes
//! - Cap chunk sizes at what one allocation can hold
//! - Reject exit codes the OS would report as success
//! - Require the default upstream host to be an absolute http(s) URL
//!
//! # Design Decisions
//! - Invalid file values are reset to their built-in default, one warning each
//! - Env overrides use the same predicates and are skipped when they fail

use url::Url;

use crate::config::loader::ConfigLoadWarning;
use crate::config::schema::{
    FixtureConfig, ProxyConfig, ServerConfig, SimulationConfig, MAX_MEMORY_CHUNK_MB,
};

/// True when `host` parses as an absolute `http` or `https` URL.
pub fn is_valid_host(host: &str) -> bool {
    Url::parse(host)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

/// True when `mb` MiB fits in a single allocation.
pub fn is_valid_chunk_mb(mb: usize) -> bool {
    (1..=MAX_MEMORY_CHUNK_MB).contains(&mb)
}

/// True when the OS reports `code` as a failure. Unix keeps only the low byte.
pub fn is_failure_exit_code(code: i32) -> bool {
    code & 0xff != 0
}

/// Reset every out-of-range field to its default, reporting what was reset.
pub fn validate_config(config: &mut FixtureConfig) -> Vec<ConfigLoadWarning> {
    let mut warnings = Vec::new();

    if config.server.port == 0 {
        config.server.port = ServerConfig::default().port;
        warnings.push(invalid("server.port", "must be positive"));
    }

    if !is_valid_host(&config.proxy.default_host) {
        warnings.push(invalid(
            "proxy.defaultHost",
            format!("{:?} is not an absolute http(s) URL", config.proxy.default_host),
        ));
        config.proxy.default_host = ProxyConfig::default().default_host;
    }

    if config.proxy.request_timeout_seconds == 0 {
        config.proxy.request_timeout_seconds = ProxyConfig::default().request_timeout_seconds;
        warnings.push(invalid("proxy.requestTimeoutSeconds", "must be positive"));
    }

    if !is_valid_chunk_mb(config.simulation.memory_chunk_mb) {
        warnings.push(invalid(
            "simulation.memoryChunkMb",
            format!(
                "{} is outside 1..={MAX_MEMORY_CHUNK_MB}",
                config.simulation.memory_chunk_mb
            ),
        ));
        config.simulation.memory_chunk_mb = SimulationConfig::default().memory_chunk_mb;
    }

    if !is_failure_exit_code(config.simulation.exit_code) {
        warnings.push(invalid(
            "simulation.exitCode",
            format!(
                "{} would be reported as a successful exit",
                config.simulation.exit_code
            ),
        ));
        config.simulation.exit_code = SimulationConfig::default().exit_code;
    }

    warnings
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigLoadWarning {
    ConfigLoadWarning::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_defaults() {
        let mut config = FixtureConfig::default();
        assert!(validate_config(&mut config).is_empty());
        assert_eq!(config, FixtureConfig::default());
    }

    #[test]
    fn resets_each_invalid_field() {
        let mut config = FixtureConfig::default();
        config.server.port = 0;
        config.proxy.default_host = "not a url".into();
        config.proxy.request_timeout_seconds = 0;
        config.simulation.exit_code = 0;

        let warnings = validate_config(&mut config);
        assert_eq!(warnings.len(), 4);
        assert_eq!(config, FixtureConfig::default());
    }

    #[test]
    fn exit_codes_truncating_to_zero_are_reset() {
        for code in [256, -256, 512] {
            let mut config = FixtureConfig::default();
            config.simulation.exit_code = code;

            let warnings = validate_config(&mut config);
            assert_eq!(warnings.len(), 1, "exit code {code}");
            assert_eq!(config.simulation.exit_code, 1);
        }

        let mut config = FixtureConfig::default();
        config.simulation.exit_code = 257;
        assert!(validate_config(&mut config).is_empty());
        assert_eq!(config.simulation.exit_code, 257);
    }

    #[test]
    fn oversized_chunk_is_reset() {
        let mut config = FixtureConfig::default();
        config.simulation.memory_chunk_mb = usize::MAX;

        let warnings = validate_config(&mut config);
        assert!(matches!(
            warnings.as_slice(),
            [ConfigLoadWarning::Invalid { field: "simulation.memoryChunkMb", .. }]
        ));
        assert_eq!(config.simulation.memory_chunk_mb, 500);

        config.simulation.memory_chunk_mb = MAX_MEMORY_CHUNK_MB;
        assert!(validate_config(&mut config).is_empty());
    }

    #[test]
    fn host_must_be_http() {
        assert!(is_valid_host("http://example.com"));
        assert!(is_valid_host("https://example.com/"));
        assert!(is_valid_host("http://127.0.0.1:8080"));
        assert!(!is_valid_host("ftp://example.com"));
        assert!(!is_valid_host("example.com"));
        assert!(!is_valid_host(""));
    }
}
