use std::collections::HashMap;

use models::CanonicalField;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{ParseStrategy, StrategyOutcome};
use crate::headers::normalize_header;
use crate::record::assemble;

static SPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" {2,}").expect("space run pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineDelimiter {
    Comma,
    Tab,
    Spaces,
}

impl LineDelimiter {
    fn detect(line: &str) -> Self {
        if line.contains(',') {
            LineDelimiter::Comma
        } else if line.contains('\t') {
            LineDelimiter::Tab
        } else {
            LineDelimiter::Spaces
        }
    }

    fn split(self, line: &str) -> Vec<String> {
        match self {
            LineDelimiter::Comma => line.split(',').map(clean).collect(),
            LineDelimiter::Tab => line.split('\t').map(clean).collect(),
            LineDelimiter::Spaces => SPACE_RUN.split(line).map(clean).collect(),
        }
    }
}

fn clean(cell: &str) -> String {
    cell.replace('\u{a0}', " ")
        .replace('\u{feff}', "")
        .trim()
        .to_string()
}

fn split_line(line: &str) -> Vec<String> {
    LineDelimiter::detect(line).split(line)
}

/// Last resort: no quoting rules, the separator is detected line by line
/// (comma, else tab, else runs of two or more spaces).
#[derive(Debug, Clone, Copy, Default)]
pub struct LineSplitStrategy;

impl ParseStrategy for LineSplitStrategy {
    fn name(&self) -> &'static str {
        "line-split"
    }

    fn parse(&self, text: &str) -> StrategyOutcome {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        let Some((header_line, body)) = lines.split_first() else {
            return StrategyOutcome::empty();
        };
        if body.is_empty() {
            return StrategyOutcome::empty();
        }

        let header = split_line(header_line);
        let positions: HashMap<CanonicalField, usize> = CanonicalField::ALL
            .into_iter()
            .filter_map(|field| {
                header
                    .iter()
                    .position(|h| normalize_header(h) == field.key())
                    .map(|idx| (field, idx))
            })
            .collect();

        let records = body
            .iter()
            .map(|line| {
                let cells = split_line(line);
                assemble(|field| {
                    positions
                        .get(&field)
                        .and_then(|idx| cells.get(*idx))
                        .map(String::as_str)
                })
            })
            .filter(|r| !r.stock_name.is_empty() && !r.fund_name.is_empty())
            .collect();
        StrategyOutcome::from_records(records)
    }
}
