//! # Holdings CSV
//!
//! Ingestion of mutual-fund holding disclosures exported as delimited text.
//!
//! Exports differ in delimiter (tab, comma, semicolon), in header spelling
//! from one release to the next, and sometimes lose their header row
//! altogether. [`parse_text`] runs an ordered cascade of parse strategies
//! over a document and returns the records of the first strategy that
//! yields anything:
//!
//! 1. header-based parse, per delimiter
//! 2. fixed-position parse, per delimiter
//! 3. manual line splitting
//!
//! A document nothing can be read from gives an empty list, not an error.
//! Only fetching can fail ([`FetchError`]).
//!
//! ```rust,no_run
//! # async fn demo() -> holdings_csv::Result<()> {
//! let source = holdings_csv::HttpSource::new(Some("https://example.com/data/"))?;
//! let records = source.fetch_csv("data.csv").await?;
//! println!("{} holdings", records.len());
//! # Ok(())
//! # }
//! ```

pub mod delimited;
pub mod error;
pub mod headers;
pub mod numeric;
pub mod record;
pub mod source;
pub mod strategy;

pub use error::{FetchError, Result};
pub use headers::{canonical_field, normalize_header};
pub use models::{CanonicalField, Delimiter, NormalizedRecord};
pub use numeric::{parse_number, parse_percent};
pub use source::{HttpSource, TextSource, decode_document, fetch_csv};
pub use strategy::{Cascade, CascadeReport, ParseStrategy, StrategyOutcome};

/// Parses a raw document with the standard cascade.
pub fn parse_text(text: &str) -> Vec<NormalizedRecord> {
    Cascade::standard().run(text).records
}
