use tracing::warn;

/// Parse a locale-formatted number from the grid, e.g. `"1 234,56"` with
/// U+00A0 group separators and a comma decimal point. Empty cells and
/// unparseable text are missing values, not zero.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned = trimmed.replace('\u{a0}', "").replace(',', ".");
    match cleaned.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(value = raw, "cell is not a number, leaving it empty");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_decimals_parse() {
        assert_eq!(parse_decimal("43,21"), Some(43.21));
        assert_eq!(parse_decimal("-1,5"), Some(-1.5));
        assert_eq!(parse_decimal("12.5"), Some(12.5));
    }

    #[test]
    fn group_separators_are_stripped() {
        assert_eq!(parse_decimal("1\u{a0}234,56"), Some(1234.56));
        assert_eq!(parse_decimal("12\u{a0}345\u{a0}678"), Some(12_345_678.0));
    }

    #[test]
    fn empty_cells_are_missing_not_zero() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("   "), None);
        assert_eq!(parse_decimal("\u{a0}"), None);
    }

    #[test]
    fn garbage_is_missing() {
        assert_eq!(parse_decimal("n/a"), None);
        assert_eq!(parse_decimal("12,34,56"), None);
    }
}
