use models::{CanonicalField, NormalizedRecord};

use crate::numeric::{parse_number, parse_percent};

/// Builds a record from a per-field cell lookup. Text cells are trimmed;
/// numeric cells go through the usual coercion.
pub fn assemble<'a, F>(cell: F) -> NormalizedRecord
where
    F: Fn(CanonicalField) -> Option<&'a str>,
{
    let text = |field| cell(field).map(str::trim).unwrap_or_default().to_string();
    let number = |field| cell(field).and_then(parse_number);

    NormalizedRecord {
        fund_name: text(CanonicalField::FundName),
        classification: text(CanonicalField::Classification),
        month: text(CanonicalField::Month),
        stock_name: text(CanonicalField::StockName),
        percent_aum: cell(CanonicalField::PercentAum).and_then(parse_percent),
        sector: text(CanonicalField::Sector),
        company_name: text(CanonicalField::CompanyName),
        ticker: text(CanonicalField::Ticker),
        net_qty_bought: number(CanonicalField::NetQtyBought),
        approx_buy_value_cr: number(CanonicalField::ApproxBuyValueCr),
        net_qty_sold: number(CanonicalField::NetQtySold),
        approx_sell_value_cr: number(CanonicalField::ApproxSellValueCr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_defaults() {
        let r = assemble(|_| None);
        assert_eq!(r, NormalizedRecord::default());
        assert!(!r.is_valid());
    }

    #[test]
    fn test_assemble_trims_and_coerces() {
        let r = assemble(|field| match field {
            CanonicalField::StockName => Some("  Acme Corp "),
            CanonicalField::PercentAum => Some("4.5"),
            CanonicalField::NetQtyBought => Some("1,200"),
            CanonicalField::ApproxBuyValueCr => Some("N/A"),
            _ => None,
        });
        assert_eq!(r.stock_name, "Acme Corp");
        assert_eq!(r.percent_aum, Some(4.5));
        assert_eq!(r.net_qty_bought, Some(1200.0));
        assert_eq!(r.approx_buy_value_cr, None);
        assert!(r.is_valid());
    }
}
