use serde::{Deserialize, Serialize};
use std::fmt;

// Canonical column names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
	FundName,
	Classification,
	Month,
	StockName,
	PercentAum,
	Sector,
	CompanyName,
	Ticker,
	NetQtyBought,
	ApproxBuyValueCr,
	NetQtySold,
	ApproxSellValueCr,
}

impl CanonicalField {
	pub const ALL: [CanonicalField; 12] = [
		CanonicalField::FundName,
		CanonicalField::Classification,
		CanonicalField::Month,
		CanonicalField::StockName,
		CanonicalField::PercentAum,
		CanonicalField::Sector,
		CanonicalField::CompanyName,
		CanonicalField::Ticker,
		CanonicalField::NetQtyBought,
		CanonicalField::ApproxBuyValueCr,
		CanonicalField::NetQtySold,
		CanonicalField::ApproxSellValueCr,
	];

	/// Stable snake_case name, identical to the serialized record key.
	pub fn key(self) -> &'static str {
		match self {
			CanonicalField::FundName => "fund_name",
			CanonicalField::Classification => "classification",
			CanonicalField::Month => "month",
			CanonicalField::StockName => "stock_name",
			CanonicalField::PercentAum => "percent_aum",
			CanonicalField::Sector => "sector",
			CanonicalField::CompanyName => "company_name",
			CanonicalField::Ticker => "ticker",
			CanonicalField::NetQtyBought => "net_qty_bought",
			CanonicalField::ApproxBuyValueCr => "approx_buy_value_cr",
			CanonicalField::NetQtySold => "net_qty_sold",
			CanonicalField::ApproxSellValueCr => "approx_sell_value_cr",
		}
	}

	pub fn from_key(key: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|f| f.key() == key)
	}
}

impl fmt::Display for CanonicalField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

// Delimiters tried by the ingestion cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
	Tab,
	Comma,
	Semicolon,
}

impl Delimiter {
	/// Fixed enumeration order; earlier entries win ties.
	pub const CANDIDATES: [Delimiter; 3] = [Delimiter::Tab, Delimiter::Comma, Delimiter::Semicolon];

	pub fn as_byte(self) -> u8 {
		match self {
			Delimiter::Tab => b'\t',
			Delimiter::Comma => b',',
			Delimiter::Semicolon => b';',
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Delimiter::Tab => "tab",
			Delimiter::Comma => "comma",
			Delimiter::Semicolon => "semicolon",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
	Holdings,
	Buys,
	Sells,
}

impl DatasetKind {
	pub fn label(self) -> &'static str {
		match self {
			DatasetKind::Holdings => "holdings",
			DatasetKind::Buys => "buys",
			DatasetKind::Sells => "sells",
		}
	}
}

/// One normalized row of a fund disclosure export.
///
/// Text fields are empty strings when absent; numeric fields are `None`
/// (serialized as `null`) and never silently become zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
	pub fund_name: String,
	pub classification: String,
	pub month: String,
	pub stock_name: String,
	pub percent_aum: Option<f64>,
	pub sector: String,
	pub company_name: String,
	pub ticker: String,
	pub net_qty_bought: Option<f64>,
	pub approx_buy_value_cr: Option<f64>,
	pub net_qty_sold: Option<f64>,
	pub approx_sell_value_cr: Option<f64>,
}

impl NormalizedRecord {
	/// A record is kept only when it names a stock and carries a fund name
	/// or at least one buy/sell figure.
	pub fn is_valid(&self) -> bool {
		!self.stock_name.is_empty()
			&& (!self.fund_name.is_empty()
				|| self.net_qty_bought.is_some()
				|| self.approx_buy_value_cr.is_some()
				|| self.net_qty_sold.is_some()
				|| self.approx_sell_value_cr.is_some())
	}

	/// Name used to key a stock across funds: company name when present.
	pub fn display_name(&self) -> &str {
		if self.company_name.is_empty() {
			&self.stock_name
		} else {
			&self.company_name
		}
	}
}
