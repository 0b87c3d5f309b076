use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Only the bootstrap path reads this; services receive their settings
/// through constructors.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()))
        .load_full()
}

/// Initialize the global configuration
///
/// Loads configuration from `path` (or "config.toml" in the current directory)
/// overlaid by `SHORTLY__*` environment variables. A missing default file
/// means in-memory defaults; a missing explicit `path` is an error.
pub fn init_config(path: Option<&str>) -> Result<(), config::ConfigError> {
    let loaded = StaticConfig::load(path)?;
    match CONFIG.get() {
        Some(current) => current.store(Arc::new(loaded)),
        None => {
            let _ = CONFIG.set(ArcSwap::from_pointee(loaded));
        }
    }
    Ok(())
}
