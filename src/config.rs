//! Engine configuration
//!
//! Every evaluation call carries its configuration explicitly; there is no
//! process-wide mutable default, so concurrent engines with different
//! budgets never race.

use std::time::Duration;

/// Default wall-clock budget for a single expression evaluation.
pub const DEFAULT_EXECUTION_TIMEOUT: Duration = Duration::from_millis(100);

/// Configuration for expression evaluation
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum wall-clock duration one expression may run before it is
    /// forcibly terminated inside the sandbox
    pub execution_timeout: Duration,
    /// Optional memory ceiling for the sandbox, in bytes; `None` leaves the
    /// host's allocation unbounded
    pub memory_limit: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            execution_timeout: DEFAULT_EXECUTION_TIMEOUT,
            memory_limit: None,
        }
    }
}

/// Builder for engine configuration with fluent API
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Set the execution budget for a single evaluation
    pub fn with_execution_timeout(mut self, timeout: Duration) -> Self {
        self.config.execution_timeout = timeout;
        self
    }

    /// Cap the sandbox's memory usage, in bytes
    pub fn with_memory_limit(mut self, bytes: usize) -> Self {
        self.config.memory_limit = Some(bytes);
        self
    }

    /// Build the final configuration
    pub fn build(self) -> EngineConfig {
        self.config
    }
}

impl Default for EngineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.execution_timeout, DEFAULT_EXECUTION_TIMEOUT);
        assert_eq!(config.memory_limit, None);
    }

    #[test]
    fn test_config_builder() {
        let config = EngineConfigBuilder::new()
            .with_execution_timeout(Duration::from_millis(250))
            .with_memory_limit(16 * 1024 * 1024)
            .build();

        assert_eq!(config.execution_timeout, Duration::from_millis(250));
        assert_eq!(config.memory_limit, Some(16 * 1024 * 1024));
    }
}
