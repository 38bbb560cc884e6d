use crate::config::{default_enabled, default_host, default_port};

use serde::{Deserialize, Serialize};
use stream_stamper_core::GatewaySettings;

/// Streaming-tool connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Whether streaming-tool integration is enabled. When disabled,
    /// recording starts immediately instead of waiting for the stream.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Gateway host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Gateway port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Gateway password, empty when authentication is off.
    #[serde(default)]
    pub password: String,
}

impl StreamConfig {
    /// Recorder-facing view of these settings.
    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            enabled: self.enabled,
            host: self.host.clone(),
            port: self.port,
            password: self.password.clone(),
        }
    }
}
