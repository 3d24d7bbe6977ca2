//! Observability (logging and tracing)
//!
//! The crate logs through `tracing`: dialog transitions and registrations at
//! `debug`, rejected transitions and namespace collisions at `warn`. Hosts
//! that have no subscriber of their own can install one here.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber
///
/// Sets up:
/// - Structured logging with JSON formatting (release) or pretty formatting (debug)
/// - Environment-based log level filtering (`RUST_LOG`)
///
/// # Example
///
/// ```rust,no_run
/// use acton_crud::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init()?;
/// tracing::info!("admin tables ready");
/// # Ok(())
/// # }
/// ```
pub fn init() -> anyhow::Result<()> {
    init_with(&ObservabilityConfig::default())
}

/// Initialize the tracing subscriber with explicit settings
pub fn init_with(config: &ObservabilityConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.default_filter()))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()?;
    }

    tracing::debug!(
        service = %config.service_name,
        json = config.json,
        "observability initialized"
    );
    Ok(())
}

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name, used as the crate-level filter target
    pub service_name: String,

    /// Emit JSON lines instead of pretty output
    pub json: bool,

    /// Log level used when `RUST_LOG` is unset
    pub level: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "acton_crud".to_string(),
            json: !cfg!(debug_assertions),
            level: None,
        }
    }
}

impl ObservabilityConfig {
    /// Create new observability config
    #[must_use]
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Emit JSON lines
    #[must_use]
    pub const fn with_json(mut self) -> Self {
        self.json = true;
        self
    }

    /// Set the fallback log level
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Filter directive used when `RUST_LOG` is unset
    #[must_use]
    pub fn default_filter(&self) -> String {
        match &self.level {
            Some(level) => level.clone(),
            None if cfg!(debug_assertions) => format!("debug,{}=trace", self.service_name),
            None => "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.service_name, "acton_crud");
        assert!(config.level.is_none());
    }

    #[test]
    fn test_builder() {
        let config = ObservabilityConfig::new("admin")
            .with_json()
            .with_level("warn");

        assert_eq!(config.service_name, "admin");
        assert!(config.json);
        assert_eq!(config.default_filter(), "warn");
    }

    #[test]
    fn test_default_filter_names_service() {
        let config = ObservabilityConfig::new("admin");
        #[cfg(debug_assertions)]
        assert_eq!(config.default_filter(), "debug,admin=trace");
        #[cfg(not(debug_assertions))]
        assert_eq!(config.default_filter(), "info");
    }
}
