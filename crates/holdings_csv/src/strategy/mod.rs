//! Parsing strategies and the cascade that runs them.
//!
//! Strategies are tried strictly in order. The first one that reports
//! success wins outright; later strategies are never run and results are
//! never compared.

mod header;
mod index;
mod line_split;

pub use header::HeaderStrategy;
pub use index::IndexStrategy;
pub use line_split::LineSplitStrategy;

use models::{Delimiter, NormalizedRecord};
use tracing::{debug, info, warn};

/// Records produced by one strategy and whether the cascade should stop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategyOutcome {
    pub records: Vec<NormalizedRecord>,
    pub success: bool,
}

impl StrategyOutcome {
    /// Success means at least one record survived filtering.
    pub fn from_records(records: Vec<NormalizedRecord>) -> Self {
        let success = !records.is_empty();
        Self { records, success }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

pub trait ParseStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn parse(&self, text: &str) -> StrategyOutcome;
}

/// Result of a cascade run. `strategy` names the winner, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CascadeReport {
    pub records: Vec<NormalizedRecord>,
    pub strategy: Option<&'static str>,
}

pub struct Cascade {
    strategies: Vec<Box<dyn ParseStrategy>>,
}

impl Cascade {
    pub fn new(strategies: Vec<Box<dyn ParseStrategy>>) -> Self {
        Self { strategies }
    }

    /// Header parse per delimiter, then positional parse per delimiter,
    /// then manual line splitting.
    pub fn standard() -> Self {
        let mut strategies: Vec<Box<dyn ParseStrategy>> = Vec::new();
        for d in Delimiter::CANDIDATES {
            strategies.push(Box::new(HeaderStrategy::new(d)));
        }
        for d in Delimiter::CANDIDATES {
            strategies.push(Box::new(IndexStrategy::new(d)));
        }
        strategies.push(Box::new(LineSplitStrategy));
        Self::new(strategies)
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn run(&self, text: &str) -> CascadeReport {
        let text = strip_bom(text);
        for strategy in &self.strategies {
            debug!(strategy = strategy.name(), "Trying parse strategy");
            let outcome = strategy.parse(text);
            if outcome.success {
                info!(
                    strategy = strategy.name(),
                    records = outcome.records.len(),
                    "Parse strategy accepted"
                );
                return CascadeReport {
                    records: outcome.records,
                    strategy: Some(strategy.name()),
                };
            }
        }
        warn!("No parse strategy produced any records");
        CascadeReport::default()
    }
}

impl Default for Cascade {
    fn default() -> Self {
        Self::standard()
    }
}

pub(crate) fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}
