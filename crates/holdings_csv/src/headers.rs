//! Column header normalization.
//!
//! Raw header text is reduced to a lowercase token and then looked up in a
//! fixed alias table. Headers the table does not know pass through as their
//! normalized token and are ignored when records are built.

use models::CanonicalField;

/// Normalized header token -> canonical field.
pub static HEADER_ALIASES: &[(&str, CanonicalField)] = &[
    ("fund name", CanonicalField::FundName),
    ("classification", CanonicalField::Classification),
    ("month", CanonicalField::Month),
    ("stock instrument", CanonicalField::StockName),
    ("stock name", CanonicalField::StockName),
    ("percent aum", CanonicalField::PercentAum),
    ("sector", CanonicalField::Sector),
    ("company name", CanonicalField::CompanyName),
    ("ticker", CanonicalField::Ticker),
    ("net qty bought", CanonicalField::NetQtyBought),
    ("approx. buy value(in rs. cr) *", CanonicalField::ApproxBuyValueCr),
    ("approx. buy value(in rs. cr)", CanonicalField::ApproxBuyValueCr),
    ("approx. buy value (in rs. cr) *", CanonicalField::ApproxBuyValueCr),
    ("approx. buy value (in rs. cr)", CanonicalField::ApproxBuyValueCr),
    ("net qty sold", CanonicalField::NetQtySold),
    ("approx. sell value(in rs. cr) *", CanonicalField::ApproxSellValueCr),
    ("approx. sell value(in rs. cr)", CanonicalField::ApproxSellValueCr),
    ("approx. sell value (in rs. cr) *", CanonicalField::ApproxSellValueCr),
    ("approx. sell value (in rs. cr)", CanonicalField::ApproxSellValueCr),
];

/// Strips BOMs, trims, lowercases, collapses whitespace and turns `/` into a
/// space. Does not consult the alias table.
pub fn header_token(raw: &str) -> String {
    let lowered = raw.replace('\u{feff}', "").trim().to_lowercase();
    lowered
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('/', " ")
}

/// Looks a normalized token up in the alias table. Tokens that already are
/// canonical keys (`stock_name`, ...) map to themselves.
pub fn canonical_field(token: &str) -> Option<CanonicalField> {
    // "Stock / Instrument" leaves a run of spaces after the slash swap
    let key = token.split_whitespace().collect::<Vec<_>>().join(" ");
    HEADER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, field)| *field)
        .or_else(|| CanonicalField::from_key(&key))
}

/// Maps a raw header to its canonical key, or to its normalized token when
/// the header is not recognized.
pub fn normalize_header(raw: &str) -> String {
    let token = header_token(raw);
    match canonical_field(&token) {
        Some(field) => field.key().to_string(),
        None => token,
    }
}
