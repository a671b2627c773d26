use once_cell::sync::Lazy;
use regex::Regex;

// Longest numeric prefix, the way a lenient float parser reads "12.5abc" as 12.5
static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("float prefix pattern is valid")
});

/// Parses the leading float of `s`, ignoring leading whitespace and any
/// trailing garbage. `None` when `s` does not start with a number.
pub fn float_prefix(s: &str) -> Option<f64> {
    let m = FLOAT_PREFIX.find(s.trim_start())?;
    let digits = m.as_str();
    match digits.trim_start_matches(['+', '-']) {
        "Infinity" if digits.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => digits.parse::<f64>().ok(),
    }
}

/// Numeric cell coercion: thousands separators, whitespace and every other
/// character except digits, `.` and `-` are dropped before parsing.
///
/// An unparseable cell is `None`, never zero.
pub fn parse_number(cell: &str) -> Option<f64> {
    let cleaned: String = cell
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    float_prefix(&cleaned)
}

/// Percent-of-AUM coercion. Reads the leading float of the trimmed cell
/// (percent signs removed); zero and unparseable values are `None`.
pub fn parse_percent(cell: &str) -> Option<f64> {
    let stripped = cell.replace('%', "");
    float_prefix(stripped.trim()).filter(|v| *v != 0.0)
}
