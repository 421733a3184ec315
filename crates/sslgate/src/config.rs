//! Gate configuration

use tracing::debug;

/// Environment variable that turns legacy provider loading off.
pub const ENV_NO_LEGACY: &str = "SSLGATE_NO_LEGACY";
/// Environment variable that keeps a missing legacy provider from being fatal.
pub const ENV_LEGACY_OPTIONAL: &str = "SSLGATE_LEGACY_OPTIONAL";
/// Environment variable that drops errors pending before registration.
pub const ENV_DISCARD_STALE_ERRORS: &str = "SSLGATE_DISCARD_STALE_ERRORS";

/// Configuration for opening an [`InitGate`](crate::InitGate)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Load the legacy provider during initialization
    pub load_legacy: bool,

    /// Fail initialization when the legacy provider cannot be loaded
    pub require_legacy: bool,

    /// Drain and drop errors left on the queue before registration
    /// instead of running them through the startup filter
    pub discard_stale_errors: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            load_legacy: true,
            require_legacy: true,
            discard_stale_errors: false,
        }
    }
}

impl GateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| lookup(key).is_some_and(|v| is_truthy(&v));

        let mut config = Self::default();
        if flag(ENV_NO_LEGACY) {
            config.load_legacy = false;
            config.require_legacy = false;
        }
        if flag(ENV_LEGACY_OPTIONAL) {
            config.require_legacy = false;
        }
        if flag(ENV_DISCARD_STALE_ERRORS) {
            config.discard_stale_errors = true;
        }
        debug!(?config, "gate config from environment");
        config
    }

    /// Set whether the legacy provider is loaded
    pub fn load_legacy(mut self, enable: bool) -> Self {
        self.load_legacy = enable;
        if !enable {
            self.require_legacy = false;
        }
        self
    }

    /// Set whether a missing legacy provider is fatal
    pub fn require_legacy(mut self, require: bool) -> Self {
        self.require_legacy = require;
        self
    }

    pub fn discard_stale_errors(mut self, enable: bool) -> Self {
        self.discard_stale_errors = enable;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.require_legacy && !self.load_legacy {
            return Err("require_legacy needs load_legacy");
        }
        Ok(())
    }
}

/// `1`, `true`, `yes` and `on`, any case.
fn is_truthy(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let c = GateConfig::default();
        assert!(c.load_legacy);
        assert!(c.require_legacy);
        assert!(!c.discard_stale_errors);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_environment_is_default() {
        assert_eq!(GateConfig::from_lookup(lookup(&[])), GateConfig::default());
    }

    #[test]
    fn no_legacy_clears_both() {
        let c = GateConfig::from_lookup(lookup(&[(ENV_NO_LEGACY, "1")]));
        assert!(!c.load_legacy);
        assert!(!c.require_legacy);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn legacy_optional() {
        let c = GateConfig::from_lookup(lookup(&[(ENV_LEGACY_OPTIONAL, "yes")]));
        assert!(c.load_legacy);
        assert!(!c.require_legacy);
    }

    #[test]
    fn flag_values() {
        for v in ["1", "true", "TRUE", "Yes", "on"] {
            let c = GateConfig::from_lookup(lookup(&[(ENV_DISCARD_STALE_ERRORS, v)]));
            assert!(c.discard_stale_errors, "{:?} should enable", v);
        }
        for v in ["0", "false", "off", "", "2"] {
            let c = GateConfig::from_lookup(lookup(&[(ENV_DISCARD_STALE_ERRORS, v)]));
            assert!(!c.discard_stale_errors, "{:?} should not enable", v);
        }
    }

    #[test]
    fn builder_and_validate() {
        let c = GateConfig::new().load_legacy(false);
        assert!(!c.require_legacy, "turning loading off drops the requirement");
        assert!(c.validate().is_ok());

        let bad = GateConfig::new().load_legacy(false).require_legacy(true);
        assert!(bad.validate().is_err());

        let c = GateConfig::new().require_legacy(false).discard_stale_errors(true);
        assert!(c.load_legacy);
        assert!(c.discard_stale_errors);
    }
}
