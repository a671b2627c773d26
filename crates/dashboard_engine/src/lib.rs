//! Consumer side of the holdings pipeline: loads the three published
//! datasets and derives the dashboard views from them.

pub mod filter;
pub mod month;
pub mod overlap;
pub mod stocks;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use holdings_csv::{HttpSource, TextSource, fetch_csv};
use models::{DatasetKind, NormalizedRecord};
use serde::Serialize;
use settings_loader::DatasetSettings;
use tracing::warn;

pub use filter::{RecordFilter, classifications, sectors};
pub use month::latest_month_label;
pub use overlap::{CommonHolding, FundComparison, SoloHolding, compare_funds, fund_names};
pub use stocks::{FundHolding, StockGroup, group_by_stock, rank_buys, rank_sells};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Datasets {
    pub holdings: Vec<NormalizedRecord>,
    pub buys: Vec<NormalizedRecord>,
    pub sells: Vec<NormalizedRecord>,
}

/// HTTP source configured with the settings' base URL.
pub fn source_for(settings: &DatasetSettings) -> Result<HttpSource> {
    HttpSource::new(settings.base_url.as_deref()).context("Building dataset source")
}

/// Fetches one dataset; any failure is logged and becomes an empty list.
pub async fn load_dataset<S>(
    source: &S,
    settings: &DatasetSettings,
    kind: DatasetKind,
) -> Vec<NormalizedRecord>
where
    S: TextSource + ?Sized,
{
    let location = settings.url_for(kind);
    match fetch_csv(source, location).await {
        Ok(records) => records,
        Err(e) => {
            warn!(
                dataset = kind.label(),
                location,
                error = %e,
                "Dataset unavailable, using empty list"
            );
            Vec::new()
        }
    }
}

/// Fetches holdings, buys and sells concurrently.
pub async fn load_datasets<S>(source: &S, settings: &DatasetSettings) -> Datasets
where
    S: TextSource + ?Sized,
{
    let (holdings, buys, sells) = tokio::join!(
        load_dataset(source, settings, DatasetKind::Holdings),
        load_dataset(source, settings, DatasetKind::Buys),
        load_dataset(source, settings, DatasetKind::Sells),
    );
    Datasets {
        holdings,
        buys,
        sells,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub generated_at: String,
    pub month_label: Option<String>,
    pub holdings_count: usize,
    pub funds: Vec<String>,
    pub classifications: Vec<String>,
    pub sectors: Vec<String>,
    pub filter: RecordFilter,
    pub most_held: Vec<StockGroup>,
    pub top_buys: Vec<NormalizedRecord>,
    pub top_sells: Vec<NormalizedRecord>,
}

/// Builds the summary views, keeping `limit` entries per ranking.
pub fn summarize(datasets: &Datasets, limit: usize) -> DashboardSummary {
    summarize_filtered(datasets, limit, &RecordFilter::default())
}

/// Like [`summarize`], with `filter` applied to every dataset first. The
/// month label and the classification/sector option lists always come from
/// the unfiltered holdings.
pub fn summarize_filtered(
    datasets: &Datasets,
    limit: usize,
    filter: &RecordFilter,
) -> DashboardSummary {
    let holdings = filter.apply(&datasets.holdings);
    let mut most_held = group_by_stock(&holdings);
    most_held.truncate(limit);
    let mut top_buys = rank_buys(&filter.apply(&datasets.buys));
    top_buys.truncate(limit);
    let mut top_sells = rank_sells(&filter.apply(&datasets.sells));
    top_sells.truncate(limit);

    DashboardSummary {
        generated_at: Local::now().to_rfc3339(),
        month_label: latest_month_label(&datasets.holdings),
        holdings_count: holdings.len(),
        funds: fund_names(&holdings),
        classifications: classifications(&datasets.holdings),
        sectors: sectors(&datasets.holdings),
        filter: filter.clone(),
        most_held,
        top_buys,
        top_sells,
    }
}

pub fn write_summary_json(summary: &DashboardSummary, out_path: &Path) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Creating output dir: {}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(out_path, json)
        .with_context(|| format!("Writing output file: {}", out_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use holdings_csv::FetchError;
    use std::collections::HashMap;

    struct FixtureSource {
        files: HashMap<&'static str, &'static str>,
    }

    #[async_trait]
    impl TextSource for FixtureSource {
        async fn fetch_text(&self, location: &str) -> holdings_csv::Result<String> {
            self.files
                .get(location)
                .map(|s| s.to_string())
                .ok_or(FetchError::Status {
                    status: 404,
                    reason: "Not Found".to_string(),
                })
        }
    }

    const HOLDINGS: &str = "Fund Name,Classification,Month,Stock/Instrument,Percent AUM\n\
                            Alpha Fund,Large Cap,November-2025,Acme Corp,5.25\n\
                            Beta Fund,Mid Cap,November-2025,Acme Corp,3.00\n\
                            Beta Fund,Mid Cap,November-2025,Widget Co,1.10\n";
    const BUYS: &str = "Stock Name\tNet Qty Bought\tApprox. Buy Value(In Rs. cr) *\n\
                        Widget Co\t1,000\t4.5\n\
                        Acme Corp\t500\t12.0\n";

    fn fixture() -> FixtureSource {
        FixtureSource {
            files: HashMap::from([
                ("data.csv", HOLDINGS),
                ("Stock_Buy_Nov-25 (1).csv", BUYS),
            ]),
        }
    }

    #[tokio::test]
    async fn test_missing_dataset_degrades_to_empty() {
        let datasets = load_datasets(&fixture(), &DatasetSettings::default()).await;
        assert_eq!(datasets.holdings.len(), 3);
        assert_eq!(datasets.buys.len(), 2);
        assert!(datasets.sells.is_empty());
    }

    #[tokio::test]
    async fn test_summarize_loaded_datasets() {
        let datasets = load_datasets(&fixture(), &DatasetSettings::default()).await;
        let summary = summarize(&datasets, 1);

        assert_eq!(summary.month_label.as_deref(), Some("November 2025"));
        assert_eq!(summary.funds, vec!["Alpha Fund", "Beta Fund"]);
        assert_eq!(summary.most_held.len(), 1);
        assert_eq!(summary.most_held[0].name, "Acme Corp");
        assert_eq!(summary.top_buys[0].stock_name, "Acme Corp");
        assert!(summary.top_sells.is_empty());
    }

    #[tokio::test]
    async fn test_summarize_with_filter() {
        let datasets = load_datasets(&fixture(), &DatasetSettings::default()).await;
        let filter = RecordFilter {
            search: "widget".to_string(),
            classifications: vec!["Mid Cap".to_string()],
            ..Default::default()
        };

        let summary = summarize_filtered(&datasets, 10, &filter);

        assert_eq!(summary.holdings_count, 1);
        assert_eq!(summary.funds, vec!["Beta Fund"]);
        assert_eq!(summary.classifications, vec!["Large Cap", "Mid Cap"]);
        assert_eq!(summary.most_held.len(), 1);
        assert_eq!(summary.most_held[0].name, "Widget Co");
        // buys carry no classification, so the facet drops them
        assert!(summary.top_buys.is_empty());
        assert_eq!(summary.month_label.as_deref(), Some("November 2025"));
    }

    #[test]
    fn test_write_summary_json() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out").join("summary.json");
        let summary = summarize(&Datasets::default(), 10);

        write_summary_json(&summary, &out).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["holdings_count"], 0);
        assert!(written["month_label"].is_null());
    }
}
