use crate::config::default_template;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use stream_stamper_core::{FormatId, TimestampFormatter};

/// Timestamp line template configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Template with `$identifier` placeholders.
    #[serde(default = "default_template")]
    pub template: String,
    /// Per-identifier fallback text for fields with no value yet.
    #[serde(default)]
    pub defaults: HashMap<FormatId, String>,
}

impl FormatConfig {
    /// Build the formatter described by this configuration.
    pub fn formatter(&self) -> TimestampFormatter {
        TimestampFormatter::with_defaults(&self.template, self.defaults.clone())
    }
}
