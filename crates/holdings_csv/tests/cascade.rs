use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use holdings_csv::strategy::{HeaderStrategy, IndexStrategy, LineSplitStrategy};
use holdings_csv::{
    Cascade, Delimiter, NormalizedRecord, ParseStrategy, StrategyOutcome, parse_text,
};

const SCENARIO_A: &str = "Fund Name,Classification,Month,Stock/Instrument,Percent AUM\n\
                          Alpha Fund,Large Cap,Jan-2025,Acme Corp,5.25\n";

fn alpha_acme() -> NormalizedRecord {
    NormalizedRecord {
        fund_name: "Alpha Fund".to_string(),
        classification: "Large Cap".to_string(),
        month: "Jan-2025".to_string(),
        stock_name: "Acme Corp".to_string(),
        percent_aum: Some(5.25),
        ..Default::default()
    }
}

#[test]
fn test_scenario_a_comma_document() {
    let records = parse_text(SCENARIO_A);
    assert_eq!(records, vec![alpha_acme()]);

    let json = serde_json::to_value(&records[0]).unwrap();
    assert_eq!(json["sector"], "");
    assert_eq!(json["company_name"], "");
    assert_eq!(json["ticker"], "");
    assert!(json["net_qty_bought"].is_null());
    assert!(json["approx_sell_value_cr"].is_null());
}

#[test]
fn test_scenario_b_tab_document_without_percent_column() {
    let text = "Fund Name\tClassification\tMonth\tStock/Instrument\n\
                Alpha Fund\tLarge Cap\tJan-2025\tAcme Corp\n";
    let records = parse_text(text);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].percent_aum, None);
    assert_eq!(records[0].stock_name, "Acme Corp");
}

#[test]
fn test_scenario_d_row_without_stock_is_dropped() {
    let text = "Fund Name,Classification,Month,Stock/Instrument,Percent AUM\n\
                Alpha Fund,Large Cap,Jan-2025,Acme Corp,5.25\n\
                Alpha Fund,Large Cap,Jan-2025,,1.10\n";
    assert_eq!(parse_text(text), vec![alpha_acme()]);
}

#[test]
fn test_parsing_is_idempotent() {
    let text = "Stock Name;Net Qty Bought;Approx. Buy Value(In Rs. cr) *\n\
                Acme Corp;1,200;12.5\n\
                Widget Co;300;N/A\n";
    let first = parse_text(text);
    let second = parse_text(text);
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[test]
fn test_delimiters_produce_same_records() {
    let rows = [
        ["Fund Name", "Stock/Instrument", "Percent AUM", "Net Qty Bought"],
        ["Alpha Fund", "Acme Corp", "5.25", "1200"],
        ["Beta Fund", "Widget Co", "1.5", ""],
    ];
    let render = |sep: &str| {
        rows.iter()
            .map(|r| r.join(sep))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let tab = parse_text(&render("\t"));
    let comma = parse_text(&render(","));
    let semicolon = parse_text(&render(";"));

    assert_eq!(tab.len(), 2);
    assert_eq!(tab, comma);
    assert_eq!(comma, semicolon);
}

#[test]
fn test_semicolon_document_with_thousands_separators() {
    let text = "Fund Name;Stock/Instrument;Net Qty Bought\nAlpha Fund;Acme Corp;1,234.5\n";
    let report = Cascade::standard().run(text);
    assert_eq!(report.strategy, Some("header:semicolon"));
    assert_eq!(report.records[0].net_qty_bought, Some(1234.5));
}

#[test]
fn test_header_aliases_are_equivalent() {
    let a = parse_text("Fund Name,Stock/Instrument\nAlpha Fund,Acme Corp\n");
    let b = parse_text("fund name,  STOCK   name \nAlpha Fund,Acme Corp\n");
    assert_eq!(a.len(), 1);
    assert_eq!(a, b);
}

#[test]
fn test_numeric_cells() {
    let text = "Stock Name,Net Qty Bought,Approx. Buy Value(In Rs. cr) *,Net Qty Sold\n\
                Acme Corp,\"1,234.5\",N/A,\n";
    let records = parse_text(text);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].net_qty_bought, Some(1234.5));
    assert_eq!(records[0].approx_buy_value_cr, None);
    assert_eq!(records[0].net_qty_sold, None);
}

#[test]
fn test_row_filtering() {
    let text = "Fund Name,Stock Name,Net Qty Bought\n\
                Alpha Fund,,100\n\
                ,Lonely Corp,\n\
                Alpha Fund,Acme Corp,\n";
    let records = parse_text(text);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].stock_name, "Acme Corp");
    assert_eq!(records[0].net_qty_bought, None);
}

#[test]
fn test_bom_prefixed_document() {
    let text = format!("\u{feff}{SCENARIO_A}");
    assert_eq!(parse_text(&text), vec![alpha_acme()]);
}

#[test]
fn test_quoted_fields_keep_embedded_delimiters() {
    let text = "Fund Name,Stock Name,Sector\n\
                \"Alpha Fund, Direct Plan\",Acme Corp,\"Capital Goods\"\n";
    let records = parse_text(text);
    assert_eq!(records[0].fund_name, "Alpha Fund, Direct Plan");
    assert_eq!(records[0].sector, "Capital Goods");
}

#[test]
fn test_headerless_export_falls_back_to_positions() {
    let text = "1,Alpha AMC,Alpha Fund,Large Cap,Jan-2025,INE001A01,Acme Corp,Equity,12000,5.25\n\
                2,Alpha AMC,Alpha Fund,Large Cap,Jan-2025,INE002A01,Widget Co,Equity,800,0.4\n";
    let report = Cascade::standard().run(text);
    assert_eq!(report.strategy, Some("index:comma"));
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[1].stock_name, "Widget Co");
    assert_eq!(report.records[1].percent_aum, Some(0.4));
}

#[test]
fn test_fixed_width_export_falls_back_to_line_splitting() {
    let text = "Fund Name      Stock Name      Percent AUM\n\
                Alpha Fund     Acme Corp       5.25\n";
    let report = Cascade::standard().run(text);
    assert_eq!(report.strategy, Some("line-split"));
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].fund_name, "Alpha Fund");
}

#[test]
fn test_blank_or_garbage_input_is_empty() {
    assert!(parse_text("").is_empty());
    assert!(parse_text("\n\n   \n\t\n").is_empty());
    assert!(parse_text("%%%$$$\n@@@ ###\n!!!").is_empty());
}

struct Instrumented<S> {
    inner: S,
    calls: Arc<AtomicUsize>,
}

impl<S: ParseStrategy> ParseStrategy for Instrumented<S> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn parse(&self, text: &str) -> StrategyOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.parse(text)
    }
}

fn instrumented<S: ParseStrategy + 'static>(
    inner: S,
    counters: &mut Vec<Arc<AtomicUsize>>,
) -> Box<dyn ParseStrategy> {
    let calls = Arc::new(AtomicUsize::new(0));
    counters.push(Arc::clone(&calls));
    Box::new(Instrumented { inner, calls })
}

fn instrumented_cascade() -> (Cascade, Vec<Arc<AtomicUsize>>) {
    let mut counters = Vec::new();
    let mut strategies = Vec::new();
    for d in Delimiter::CANDIDATES {
        strategies.push(instrumented(HeaderStrategy::new(d), &mut counters));
    }
    for d in Delimiter::CANDIDATES {
        strategies.push(instrumented(IndexStrategy::new(d), &mut counters));
    }
    strategies.push(instrumented(LineSplitStrategy, &mut counters));
    (Cascade::new(strategies), counters)
}

#[test]
fn test_tab_header_success_runs_only_first_strategy() {
    let (cascade, counters) = instrumented_cascade();
    let text = "Fund Name\tStock/Instrument\nAlpha Fund\tAcme Corp\n";

    let report = cascade.run(text);

    assert_eq!(report.strategy, Some("header:tab"));
    let calls: Vec<usize> = counters.iter().map(|c| c.load(Ordering::SeqCst)).collect();
    assert_eq!(calls, vec![1, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn test_failed_document_runs_every_strategy_once() {
    let (cascade, counters) = instrumented_cascade();
    let report = cascade.run("nothing useful here");
    assert!(report.records.is_empty());
    assert_eq!(report.strategy, None);
    assert!(counters.iter().all(|c| c.load(Ordering::SeqCst) == 1));
}
