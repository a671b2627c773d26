use chrono::Month;
use models::NormalizedRecord;

/// Parses month cells such as `November-2025` or `Nov 2025` into
/// `(year, month number, label)`. The label keeps the cell's own spelling,
/// capitalised.
fn parse_month(cell: &str) -> Option<(i32, u32, String)> {
    let mut parts = cell
        .trim()
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|p| !p.is_empty());
    let raw_month = parts.next()?;
    let raw_year = parts.next()?;

    let month = raw_month.parse::<Month>().ok()?;
    let digits: String = raw_year.chars().take_while(|c| c.is_ascii_digit()).collect();
    let year = digits.parse::<i32>().ok()?;

    let mut chars = raw_month.chars();
    let first = chars.next()?;
    let label = format!(
        "{}{} {}",
        first.to_uppercase(),
        chars.as_str().to_lowercase(),
        raw_year
    );
    Some((year, month.number_from_month(), label))
}

/// Most recent reporting month found in the records, e.g. `"November 2025"`.
pub fn latest_month_label(records: &[NormalizedRecord]) -> Option<String> {
    let mut best: Option<(i32, u32, String)> = None;
    for parsed in records.iter().filter_map(|r| parse_month(&r.month)) {
        let newer = match &best {
            Some((year, month, _)) => (parsed.0, parsed.1) > (*year, *month),
            None => true,
        };
        if newer {
            best = Some(parsed);
        }
    }
    best.map(|(_, _, label)| label)
}
