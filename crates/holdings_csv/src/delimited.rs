use csv::ReaderBuilder;
use models::Delimiter;
use tracing::debug;

/// Splits `text` into rows of cells using `delimiter`, honouring quotes.
///
/// Rows may have differing lengths. Blank rows are skipped, and records the
/// reader cannot decode are logged and dropped rather than failing the batch.
pub fn read_rows(text: &str, delimiter: Delimiter) -> Vec<Vec<String>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                debug!(
                    row = idx,
                    delimiter = delimiter.label(),
                    error = %e,
                    "Skipping unreadable record"
                );
                continue;
            }
        };
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    rows
}
