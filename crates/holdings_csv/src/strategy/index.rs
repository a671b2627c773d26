use models::{CanonicalField, Delimiter};

use super::{ParseStrategy, StrategyOutcome};
use crate::delimited::read_rows;
use crate::record::assemble;

const MIN_COLUMNS: usize = 10;

// Column layout of the headerless holdings export
const FUND_NAME_COL: usize = 2;
const CLASSIFICATION_COL: usize = 3;
const MONTH_COL: usize = 4;
const STOCK_NAME_COL: usize = 6;
const PERCENT_AUM_COL: usize = 9;

/// No header row; fields are read by fixed column position.
#[derive(Debug, Clone, Copy)]
pub struct IndexStrategy {
    delimiter: Delimiter,
}

impl IndexStrategy {
    pub fn new(delimiter: Delimiter) -> Self {
        Self { delimiter }
    }
}

fn column(field: CanonicalField) -> Option<usize> {
    match field {
        CanonicalField::FundName => Some(FUND_NAME_COL),
        CanonicalField::Classification => Some(CLASSIFICATION_COL),
        CanonicalField::Month => Some(MONTH_COL),
        CanonicalField::StockName => Some(STOCK_NAME_COL),
        CanonicalField::PercentAum => Some(PERCENT_AUM_COL),
        _ => None,
    }
}

impl ParseStrategy for IndexStrategy {
    fn name(&self) -> &'static str {
        match self.delimiter {
            Delimiter::Tab => "index:tab",
            Delimiter::Comma => "index:comma",
            Delimiter::Semicolon => "index:semicolon",
        }
    }

    fn parse(&self, text: &str) -> StrategyOutcome {
        let records = read_rows(text, self.delimiter)
            .into_iter()
            .filter(|row| row.len() >= MIN_COLUMNS)
            .map(|row| {
                assemble(|field| column(field).and_then(|i| row.get(i)).map(String::as_str))
            })
            .filter(|r| {
                !r.stock_name.is_empty()
                    && !r.fund_name.is_empty()
                    && r.fund_name.to_lowercase() != "fund name"
                    && r.stock_name.to_lowercase() != "stock/instrument"
            })
            .collect();
        StrategyOutcome::from_records(records)
    }
}
