use std::collections::BTreeSet;

use models::NormalizedRecord;
use serde::Serialize;

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted, unique, non-empty classifications (trimmed).
pub fn classifications(records: &[NormalizedRecord]) -> Vec<String> {
    distinct(records.iter().map(|r| r.classification.as_str()))
}

/// Sorted, unique, non-empty sectors (trimmed).
pub fn sectors(records: &[NormalizedRecord]) -> Vec<String> {
    distinct(records.iter().map(|r| r.sector.as_str()))
}

/// Search and facet selection applied to records before any view is built.
///
/// An empty search or an empty facet list matches everything. Search is a
/// case-insensitive substring test against stock name, company name and
/// ticker; facets compare the trimmed cell exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordFilter {
    pub search: String,
    pub classifications: Vec<String>,
    pub sectors: Vec<String>,
}

impl RecordFilter {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || !self.classifications.is_empty()
            || !self.sectors.is_empty()
    }

    pub fn matches(&self, record: &NormalizedRecord) -> bool {
        self.matches_search(record)
            && facet_allows(&self.classifications, &record.classification)
            && facet_allows(&self.sectors, &record.sector)
    }

    pub fn apply(&self, records: &[NormalizedRecord]) -> Vec<NormalizedRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }

    fn matches_search(&self, record: &NormalizedRecord) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&record.stock_name, &record.company_name, &record.ticker]
            .iter()
            .any(|hay| hay.to_lowercase().contains(&needle))
    }
}

fn facet_allows(selected: &[String], value: &str) -> bool {
    selected.is_empty() || selected.iter().any(|s| s.trim() == value.trim())
}
