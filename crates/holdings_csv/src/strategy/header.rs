use models::{CanonicalField, Delimiter};

use super::{ParseStrategy, StrategyOutcome};
use crate::delimited::read_rows;
use crate::headers::normalize_header;
use crate::record::assemble;

/// First row is the header; columns are located by canonical name.
#[derive(Debug, Clone, Copy)]
pub struct HeaderStrategy {
    delimiter: Delimiter,
}

impl HeaderStrategy {
    pub fn new(delimiter: Delimiter) -> Self {
        Self { delimiter }
    }
}

impl ParseStrategy for HeaderStrategy {
    fn name(&self) -> &'static str {
        match self.delimiter {
            Delimiter::Tab => "header:tab",
            Delimiter::Comma => "header:comma",
            Delimiter::Semicolon => "header:semicolon",
        }
    }

    fn parse(&self, text: &str) -> StrategyOutcome {
        let mut rows = read_rows(text, self.delimiter).into_iter();
        let Some(header) = rows.next() else {
            return StrategyOutcome::empty();
        };
        let columns = HeaderColumns::new(&header);

        let records = rows
            .map(|row| assemble(|field| columns.cell(&row, field)))
            .filter(|r| r.is_valid())
            .collect();
        StrategyOutcome::from_records(records)
    }
}

/// Header row after normalization.
struct HeaderColumns {
    keys: Vec<String>,
}

impl HeaderColumns {
    fn new(header: &[String]) -> Self {
        Self {
            keys: header.iter().map(|h| normalize_header(h)).collect(),
        }
    }

    /// The first column carrying the field's key wins, even if the row's
    /// cell there is empty.
    fn cell<'r>(&self, row: &'r [String], field: CanonicalField) -> Option<&'r str> {
        let idx = self.keys.iter().position(|k| k == field.key())?;
        row.get(idx).map(String::as_str)
    }
}
