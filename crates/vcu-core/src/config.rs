//! Aggregator configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then `VCU__`
//! environment variables (`VCU__LIVENESS__ENTRY_TIMEOUT_MS=750`).

use crate::error::VcuError;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use liveness::LivenessConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Aggregator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VcuConfig {
    /// Receive queue capacity in records
    pub rx_queue_capacity: usize,
    /// Dispatch table slots
    pub dispatch_capacity: usize,
    /// Tracing level name
    pub log_level: String,
    /// Emit JSON log lines
    pub log_json: bool,
    pub liveness: LivenessConfig,
}

impl Default for VcuConfig {
    fn default() -> Self {
        Self {
            rx_queue_capacity: 64,
            dispatch_capacity: 64,
            log_level: "info".to_string(),
            log_json: false,
            liveness: LivenessConfig::default(),
        }
    }
}

impl VcuConfig {
    /// Load defaults, then `path` if given, then the environment
    pub fn load(path: Option<&Path>) -> Result<Self, VcuError> {
        let mut builder = Self::defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        Self::finish(builder.add_source(Self::environment()))
    }

    /// Load defaults overlaid with a TOML document
    pub fn from_toml(text: &str) -> Result<Self, VcuError> {
        Self::finish(Self::defaults()?.add_source(File::from_str(text, FileFormat::Toml)))
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, VcuError> {
        Ok(Config::builder().add_source(Config::try_from(&Self::default())?))
    }

    fn environment() -> Environment {
        Environment::with_prefix("VCU")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, VcuError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check capacities against their limits and the liveness timing order
    pub fn validate(&self) -> Result<(), VcuError> {
        if !(1..=transport_queue::CAPACITY_MAX).contains(&self.rx_queue_capacity) {
            return Err(VcuError::Invalid(format!(
                "rx_queue_capacity {} outside 1..={}",
                self.rx_queue_capacity,
                transport_queue::CAPACITY_MAX
            )));
        }

        let routes = decoders::default_route_count();
        if !(routes..=dispatch_table::CAPACITY_MAX).contains(&self.dispatch_capacity) {
            return Err(VcuError::Invalid(format!(
                "dispatch_capacity {} outside {}..={}",
                self.dispatch_capacity,
                routes,
                dispatch_table::CAPACITY_MAX
            )));
        }

        if tracing::Level::from_str(&self.log_level).is_err() {
            return Err(VcuError::Invalid(format!(
                "unknown log level '{}'",
                self.log_level
            )));
        }

        self.liveness.validate()?;
        Ok(())
    }
}
