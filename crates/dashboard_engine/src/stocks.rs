use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use models::NormalizedRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundHolding {
    pub fund_name: String,
    pub classification: String,
    pub month: String,
    pub percent_aum: Option<f64>,
}

/// One stock and every fund row that holds it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockGroup {
    pub name: String,
    pub ticker: String,
    pub sector: String,
    pub holdings: Vec<FundHolding>,
}

impl StockGroup {
    pub fn fund_count(&self) -> usize {
        self.holdings
            .iter()
            .map(|h| h.fund_name.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Holding funds narrowed by classification and a case-insensitive
    /// fund-name search; empty arguments keep everything.
    pub fn funds_matching(
        &self,
        fund_search: &str,
        classifications: &[String],
    ) -> Vec<FundHolding> {
        let needle = fund_search.trim().to_lowercase();
        self.holdings
            .iter()
            .filter(|h| {
                classifications.is_empty()
                    || classifications.iter().any(|c| c.trim() == h.classification.trim())
            })
            .filter(|h| needle.is_empty() || h.fund_name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

/// Groups records by stock (case-insensitive display name), most widely held
/// first. Ticker and sector are taken from the first row that has them.
/// Each group's holdings are ordered by weight, unweighted rows last.
pub fn group_by_stock(records: &[NormalizedRecord]) -> Vec<StockGroup> {
    let mut groups: Vec<StockGroup> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for r in records {
        let name = r.display_name().trim();
        if name.is_empty() {
            continue;
        }
        let key = name.to_lowercase();
        let idx = match slots.get(&key).copied() {
            Some(i) => i,
            None => {
                slots.insert(key, groups.len());
                groups.push(StockGroup {
                    name: name.to_string(),
                    ticker: String::new(),
                    sector: String::new(),
                    holdings: Vec::new(),
                });
                groups.len() - 1
            }
        };

        let group = &mut groups[idx];
        if group.ticker.is_empty() {
            group.ticker = r.ticker.trim().to_string();
        }
        if group.sector.is_empty() {
            group.sector = r.sector.trim().to_string();
        }
        group.holdings.push(FundHolding {
            fund_name: r.fund_name.clone(),
            classification: r.classification.clone(),
            month: r.month.clone(),
            percent_aum: r.percent_aum,
        });
    }

    for group in &mut groups {
        group
            .holdings
            .sort_by(|a, b| descending(a.percent_aum, b.percent_aum));
    }
    groups.sort_by_key(|g| std::cmp::Reverse(g.fund_count()));
    groups
}

fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    b.unwrap_or(f64::NEG_INFINITY)
        .total_cmp(&a.unwrap_or(f64::NEG_INFINITY))
}

/// Fresh buys, largest approximate value first, then by quantity.
pub fn rank_buys(records: &[NormalizedRecord]) -> Vec<NormalizedRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| {
        descending(a.approx_buy_value_cr, b.approx_buy_value_cr)
            .then_with(|| descending(a.net_qty_bought, b.net_qty_bought))
    });
    ranked
}

/// Exits, largest approximate value first, then by quantity.
pub fn rank_sells(records: &[NormalizedRecord]) -> Vec<NormalizedRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| {
        descending(a.approx_sell_value_cr, b.approx_sell_value_cr)
            .then_with(|| descending(a.net_qty_sold, b.net_qty_sold))
    });
    ranked
}
