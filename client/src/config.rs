use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::{Error, Result};

/// Most claim instructions that fit one transaction.
pub const MAX_CLAIMS_PER_BUNDLE: usize = 10;

/// Hard per-transaction compute ceiling.
pub const MAX_COMPUTE_UNITS: u32 = 1_400_000;

/// Settings for [`crate::BatchClaimer`].
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Claims bundled into one submission (1..=10).
    pub max_claims_per_bundle: usize,
    /// Compute units requested per bundled claim.
    pub compute_units_per_claim: u32,
    /// Upper bound for a bundle's compute request.
    pub compute_unit_ceiling: u32,
    /// Parallel reads during the pending-earnings snapshot.
    pub snapshot_concurrency: usize,
    pub confirmation_timeout_ms: u64,
    pub poll_interval_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_claims_per_bundle: MAX_CLAIMS_PER_BUNDLE,
            compute_units_per_claim: 140_000,
            compute_unit_ceiling: MAX_COMPUTE_UNITS,
            snapshot_concurrency: 16,
            confirmation_timeout_ms: 60_000,
            poll_interval_ms: 500,
        }
    }
}

impl BatchConfig {
    /// Parse a YAML document; missing fields take their defaults.
    pub fn from_yaml(raw: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_claims_per_bundle == 0 || self.max_claims_per_bundle > MAX_CLAIMS_PER_BUNDLE {
            return Err(Error::InvalidConfig(format!(
                "max_claims_per_bundle must be within 1..={MAX_CLAIMS_PER_BUNDLE}, got {}",
                self.max_claims_per_bundle
            )));
        }
        if self.compute_unit_ceiling == 0 || self.compute_unit_ceiling > MAX_COMPUTE_UNITS {
            return Err(Error::InvalidConfig(format!(
                "compute_unit_ceiling must be within 1..={MAX_COMPUTE_UNITS}, got {}",
                self.compute_unit_ceiling
            )));
        }
        if self.snapshot_concurrency == 0 {
            return Err(Error::InvalidConfig("snapshot_concurrency must be positive".into()));
        }
        if self.poll_interval_ms == 0 {
            return Err(Error::InvalidConfig("poll_interval_ms must be positive".into()));
        }
        Ok(())
    }

    /// Compute units to request for a bundle of `claims` claims.
    pub fn compute_budget(&self, claims: usize) -> u32 {
        let claims = u32::try_from(claims).unwrap_or(u32::MAX);
        self.compute_units_per_claim
            .saturating_mul(claims)
            .min(self.compute_unit_ceiling)
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_millis(self.confirmation_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = BatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_claims_per_bundle, 10);
    }

    #[test]
    fn test_compute_budget_is_capped() {
        let config = BatchConfig::default();
        assert_eq!(config.compute_budget(1), 140_000);
        assert_eq!(config.compute_budget(3), 420_000);
        assert_eq!(config.compute_budget(10), MAX_COMPUTE_UNITS);
        assert_eq!(config.compute_budget(usize::MAX), MAX_COMPUTE_UNITS);
    }

    #[test]
    fn test_yaml_overrides_and_defaults() {
        let config = BatchConfig::from_yaml("max_claims_per_bundle: 4\npoll_interval_ms: 25\n").unwrap();
        assert_eq!(config.max_claims_per_bundle, 4);
        assert_eq!(config.poll_interval(), Duration::from_millis(25));
        assert_eq!(config.compute_unit_ceiling, MAX_COMPUTE_UNITS);
    }

    #[test]
    fn test_rejects_oversized_bundles() {
        let err = BatchConfig::from_yaml("max_claims_per_bundle: 11").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = BatchConfig::from_yaml("compute_unit_ceiling: 2000000").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("colony-client-missing").join("batch.yaml");
        let err = BatchConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::Io(ref io) if io.kind() == std::io::ErrorKind::NotFound));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = BatchConfig::from_yaml("bundle_size: 3").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
