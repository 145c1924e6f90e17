//! Layered configuration resolution.

use std::path::Path;

use crate::config::env::apply_env_overrides;
use crate::config::loader::{load_config, ConfigLoadWarning};
use crate::config::schema::{ConfigSource, FixtureConfig};
use crate::config::validation::validate_config;

/// Env var naming the optional JSON config file.
pub const CONFIG_FILE_PATH_VAR: &str = "CONFIG_FILE_PATH";

/// Outcome of resolving all configuration layers.
#[derive(Debug)]
pub struct Resolution {
    pub config: FixtureConfig,
    pub source: ConfigSource,
    pub warnings: Vec<ConfigLoadWarning>,
    /// Env vars that replaced a lower-layer value.
    pub overrides: Vec<&'static str>,
}

impl Resolution {
    /// Emit the warnings and overrides gathered during resolution.
    ///
    /// Call after the tracing subscriber is installed.
    pub fn log(&self) {
        if self.source.loaded_from_file {
            tracing::info!(path = %self.source.file_path_env_var, "Configuration loaded from file");
        }
        for warning in &self.warnings {
            tracing::warn!(error = %warning, "Configuration layer skipped, using lower-precedence value");
        }
        for var in &self.overrides {
            tracing::info!(var = %var, "Configuration overridden by environment");
        }
    }
}

/// Resolve configuration from the process environment.
pub fn resolve() -> Resolution {
    resolve_with(|name| std::env::var(name).ok())
}

/// Resolve configuration using `lookup` in place of the process environment.
///
/// Precedence, lowest first: built-in defaults, the file named by
/// `CONFIG_FILE_PATH`, individual env overrides.
pub fn resolve_with<F>(lookup: F) -> Resolution
where
    F: Fn(&str) -> Option<String>,
{
    let mut warnings = Vec::new();
    let mut source = ConfigSource::default();
    let mut config = FixtureConfig::default();

    if let Some(path) = lookup(CONFIG_FILE_PATH_VAR).filter(|p| !p.is_empty()) {
        match load_config(Path::new(&path)) {
            Ok(mut loaded) => {
                warnings.extend(validate_config(&mut loaded));
                config = loaded;
                source.loaded_from_file = true;
            }
            Err(warning) => warnings.push(warning),
        }
        source.file_path_env_var = path;
    }

    let overrides = apply_env_overrides(&mut config, &lookup);

    Resolution {
        config,
        source,
        warnings,
        overrides,
    }
}
