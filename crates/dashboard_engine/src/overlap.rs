use std::collections::{BTreeSet, HashMap, HashSet};

use models::NormalizedRecord;
use serde::Serialize;

/// Above this overlap two funds offer little diversification against each other.
pub const HIGH_OVERLAP_PCT: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommonHolding {
    pub name: String,
    pub weight_a: Option<f64>,
    pub weight_b: Option<f64>,
}

impl CommonHolding {
    fn combined_weight(&self) -> f64 {
        self.weight_a.unwrap_or(0.0) + self.weight_b.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoloHolding {
    pub name: String,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundComparison {
    pub fund_a: String,
    pub fund_b: String,
    pub common: Vec<CommonHolding>,
    pub unique_a: Vec<SoloHolding>,
    pub unique_b: Vec<SoloHolding>,
    pub overlap_percentage: f64,
    pub total_a: usize,
    pub total_b: usize,
    pub common_count: usize,
}

impl FundComparison {
    pub fn is_high_overlap(&self) -> bool {
        self.overlap_percentage > HIGH_OVERLAP_PCT
    }
}

/// Sorted, de-duplicated fund names. Records without a fund are skipped.
pub fn fund_names(records: &[NormalizedRecord]) -> Vec<String> {
    records
        .iter()
        .filter(|r| !r.fund_name.is_empty())
        .map(|r| r.fund_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// Stock -> weight for one fund, first-seen order; a repeated stock keeps its
// slot but takes the later weight.
fn holdings_of(records: &[NormalizedRecord], fund: &str) -> Vec<(String, Option<f64>)> {
    let mut out: Vec<(String, Option<f64>)> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    for r in records.iter().filter(|r| r.fund_name == fund) {
        let name = r.display_name().to_string();
        match slots.get(&name).copied() {
            Some(i) => out[i].1 = r.percent_aum,
            None => {
                slots.insert(name.clone(), out.len());
                out.push((name, r.percent_aum));
            }
        }
    }
    out
}

/// Compares the holdings of two funds by stock name.
///
/// Returns `None` unless both fund names are given.
pub fn compare_funds(
    records: &[NormalizedRecord],
    fund_a: &str,
    fund_b: &str,
) -> Option<FundComparison> {
    if fund_a.is_empty() || fund_b.is_empty() {
        return None;
    }

    let stocks_a = holdings_of(records, fund_a);
    let stocks_b = holdings_of(records, fund_b);
    let weights_b: HashMap<&str, Option<f64>> =
        stocks_b.iter().map(|(n, w)| (n.as_str(), *w)).collect();
    let names_a: HashSet<&str> = stocks_a.iter().map(|(n, _)| n.as_str()).collect();

    let mut common = Vec::new();
    let mut unique_a = Vec::new();
    for (name, weight_a) in &stocks_a {
        match weights_b.get(name.as_str()) {
            Some(weight_b) => common.push(CommonHolding {
                name: name.clone(),
                weight_a: *weight_a,
                weight_b: *weight_b,
            }),
            None => unique_a.push(SoloHolding {
                name: name.clone(),
                weight: *weight_a,
            }),
        }
    }
    let mut unique_b: Vec<SoloHolding> = stocks_b
        .iter()
        .filter(|(name, _)| !names_a.contains(name.as_str()))
        .map(|(name, weight)| SoloHolding {
            name: name.clone(),
            weight: *weight,
        })
        .collect();

    common.sort_by(|x, y| y.combined_weight().total_cmp(&x.combined_weight()));
    let by_weight = |x: &SoloHolding, y: &SoloHolding| {
        y.weight.unwrap_or(0.0).total_cmp(&x.weight.unwrap_or(0.0))
    };
    unique_a.sort_by(by_weight);
    unique_b.sort_by(by_weight);

    let total_unique = common.len() + unique_a.len() + unique_b.len();
    let overlap_percentage = if total_unique > 0 {
        common.len() as f64 / total_unique as f64 * 100.0
    } else {
        0.0
    };

    Some(FundComparison {
        fund_a: fund_a.to_string(),
        fund_b: fund_b.to_string(),
        common_count: common.len(),
        total_a: stocks_a.len(),
        total_b: stocks_b.len(),
        common,
        unique_a,
        unique_b,
        overlap_percentage,
    })
}
