use crate::{engine, Advice, Config};

use keyhint_core::{shape::Query, stats::StatsProvider, Result};
use tracing::{debug, warn};

/// Recommends indexes for statements, backed by a statistics provider.
#[derive(Debug)]
pub struct Advisor {
    provider: Box<dyn StatsProvider>,
    config: Config,
}

impl Advisor {
    /// Create an advisor with the default configuration
    pub fn new(provider: impl StatsProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            config: Config::default(),
        }
    }

    /// Create an advisor with a custom configuration
    pub fn with_config(provider: impl StatsProvider + 'static, config: Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            provider: Box::new(provider),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn provider(&self) -> &dyn StatsProvider {
        &*self.provider
    }

    /// Analyses one statement.
    ///
    /// Any provider failure aborts the analysis; no partial advice is
    /// returned.
    pub async fn advise(&self, query: &Query) -> Result<Advice> {
        engine::analyze(&*self.provider, &self.config, query).await
    }

    /// Analyses statements one after another.
    ///
    /// A failure only affects the statement it occurred in; the remaining
    /// statements are still analysed.
    pub async fn advise_all<'a>(&self, queries: impl IntoIterator<Item = &'a Query>) -> Vec<Result<Advice>> {
        let mut results = vec![];

        for (i, query) in queries.into_iter().enumerate() {
            debug!(statement = i, "analysing statement");

            let result = self.advise(query).await;
            if let Err(err) = &result {
                warn!(statement = i, error = %err, "analysis failed");
            }

            results.push(result);
        }

        results
    }
}
