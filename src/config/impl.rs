use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks. Falls back to in-memory defaults when
/// `init_config()` has not run yet (unit tests, benches).
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()))
        .load_full()
}

/// Initialize the global configuration
///
/// Loads configuration from the given path (default "config.toml") plus
/// `MUKA__*` environment variables. Only the first call has any effect.
///
/// # Examples
/// ```no_run
/// use muka::config::init_config;
/// init_config(None);
/// ```
pub fn init_config(path: Option<&str>) {
    CONFIG.get_or_init(|| ArcSwap::from_pointee(StaticConfig::load(path)));
}

/// 替换当前配置（测试与 CLI 覆盖使用）
pub fn replace_config(config: StaticConfig) {
    match CONFIG.get() {
        Some(current) => current.store(Arc::new(config)),
        None => {
            let _ = CONFIG.set(ArcSwap::from_pointee(config));
        }
    }
}
