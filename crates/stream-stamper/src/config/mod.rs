#[allow(clippy::module_inception)]
mod config;
mod format_config;
mod stream_config;
mod watcher_config;

pub(crate) use {
    config::Config, format_config::FormatConfig, stream_config::StreamConfig,
    watcher_config::WatcherConfig,
};

pub(crate) const DEFAULT_TEMPLATE: &str = "$timestamp $title [Lv.$level]";
pub(crate) const DEFAULT_ENABLED: bool = true;
pub(crate) const DEFAULT_HOST: &str = "localhost";
pub(crate) const DEFAULT_PORT: u16 = 4455;
pub(crate) const DEFAULT_POLL_INTERVAL_MS: u64 = 250;

pub(crate) fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

pub(crate) fn default_enabled() -> bool {
    DEFAULT_ENABLED
}

pub(crate) fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

pub(crate) fn default_port() -> u16 {
    DEFAULT_PORT
}

pub(crate) fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}
