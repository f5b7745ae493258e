use keyhint_core::{Error, Result};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for the advisor.
///
/// Every field has a default, so a TOML file only needs to name the values it
/// changes:
///
/// ```toml
/// min_selectivity = 10.0
/// icp_compatible = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Predicates whose sampled selectivity falls below this value are not
    /// worth an index column.
    pub min_selectivity: f64,

    /// Upper bound on the number of rows read when sampling a predicate.
    pub sample_cap: u64,

    /// Place join-propagated columns right after the first range column, so
    /// the remaining range predicates can be checked with index condition
    /// pushdown.
    pub icp_compatible: bool,

    /// Prefix of generated index names.
    pub index_name_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_selectivity: 2.0,
            sample_cap: 100_000,
            icp_compatible: false,
            index_name_prefix: "idx".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_selectivity(mut self, min_selectivity: f64) -> Self {
        self.min_selectivity = min_selectivity;
        self
    }

    pub fn sample_cap(mut self, sample_cap: u64) -> Self {
        self.sample_cap = sample_cap;
        self
    }

    pub fn icp_compatible(mut self, icp_compatible: bool) -> Self {
        self.icp_compatible = icp_compatible;
        self
    }

    pub fn index_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.index_name_prefix = prefix.into();
        self
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(src).map_err(|err| Error::invalid_config(err.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|err| {
            Error::from(err).context(Error::invalid_config(format!(
                "failed to read {}",
                path.display()
            )))
        })?;

        Self::from_toml_str(&src)
            .map_err(|err| err.context(Error::from_args(format_args!("{}", path.display()))))
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_selectivity.is_finite() || self.min_selectivity < 0.0 {
            return Err(Error::invalid_config(format!(
                "min_selectivity must be a non-negative number, got {}",
                self.min_selectivity
            )));
        }

        if self.sample_cap == 0 {
            return Err(Error::invalid_config(
                "sample_cap must be greater than zero",
            ));
        }

        Ok(())
    }
}
