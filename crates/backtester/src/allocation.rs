use core_types::Allocation;

/// Cleans and normalizes raw (symbol, weight) pairs into an allocation
/// set whose weights sum to 1.0.
///
/// Per-item skips, never whole-batch failures: blank symbols, non-finite
/// weights and weights ≤ 0 are dropped. If nothing survives (or the
/// surviving weights sum to ≤ 0) the result is empty: "no usable
/// allocation", not an error.
///
/// Repeated symbols are NOT merged; each occurrence becomes its own leg
/// with its own normalized weight. Their return series are identical, so
/// the backtest result equals weight consolidation, but downstream code
/// must not assume deduplication happened.
pub fn normalize_allocations<I, S>(items: I) -> Vec<Allocation>
where
    I: IntoIterator<Item = (S, f64)>,
    S: AsRef<str>,
{
    let mut cleaned: Vec<(String, f64)> = Vec::new();
    for (symbol, weight) in items {
        let symbol = symbol.as_ref().trim();
        if symbol.is_empty() {
            continue;
        }
        if !weight.is_finite() || weight <= 0.0 {
            continue;
        }
        cleaned.push((symbol.to_string(), weight));
    }

    let total: f64 = cleaned.iter().map(|(_, weight)| weight).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    cleaned
        .into_iter()
        .map(|(symbol, weight)| Allocation {
            symbol,
            weight: weight / total,
        })
        .collect()
}

/// Parses user-entered holdings, one per line: `SYMBOL WEIGHT`.
///
/// Blank lines, lines with fewer than two fields and unparseable weights
/// are skipped line by line; one bad line never invalidates the rest.
pub fn parse_holdings(text: &str) -> Vec<(String, f64)> {
    let mut out = Vec::new();
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let (Some(symbol), Some(weight)) = (parts.next(), parts.next()) else {
            continue;
        };
        let Ok(weight) = weight.parse::<f64>() else {
            continue;
        };
        out.push((symbol.to_string(), weight));
    }
    out
}
