//! Conversion between naira (major units) and kobo (minor units).
//!
//! All rounding policy lives here. Amounts are stored as integer kobo;
//! naira values only exist at the API boundary and in the legacy column
//! handled by the migrate-to-kobo tool.

/// Convert a naira amount to kobo, rounding to the nearest kobo with ties
/// away from zero (`f64::round`).
///
/// The caller must have validated that `naira` is a finite number.
pub fn naira_to_kobo(naira: f64) -> i64 {
    (naira * 100.0).round() as i64
}

/// Format a kobo amount as a naira string with exactly two decimals.
///
/// Uses integer arithmetic rather than float division so the output never
/// carries binary floating-point artifacts.
pub fn kobo_to_naira(kobo: i64) -> String {
    let sign = if kobo < 0 { "-" } else { "" };
    let abs = kobo.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naira_to_kobo() {
        assert_eq!(naira_to_kobo(19.99), 1999);
        assert_eq!(naira_to_kobo(10.0), 1000);
        assert_eq!(naira_to_kobo(0.0), 0);
        assert_eq!(naira_to_kobo(0.01), 1);
    }

    #[test]
    fn test_naira_to_kobo_rounds_ties_away_from_zero() {
        // 12.5 kobo rounds up, not to even
        assert_eq!(naira_to_kobo(0.125), 13);
        assert_eq!(naira_to_kobo(-0.125), -13);
    }

    #[test]
    fn test_naira_to_kobo_truncates_sub_kobo_precision() {
        assert_eq!(naira_to_kobo(19.994), 1999);
        assert_eq!(naira_to_kobo(19.996), 2000);
    }

    #[test]
    fn test_kobo_to_naira() {
        assert_eq!(kobo_to_naira(1999), "19.99");
        assert_eq!(kobo_to_naira(1000), "10.00");
        assert_eq!(kobo_to_naira(0), "0.00");
        assert_eq!(kobo_to_naira(5), "0.05");
        assert_eq!(kobo_to_naira(600), "6.00");
    }

    #[test]
    fn test_kobo_to_naira_negative() {
        assert_eq!(kobo_to_naira(-1999), "-19.99");
        assert_eq!(kobo_to_naira(-5), "-0.05");
    }

    #[test]
    fn test_round_trip_two_decimal_amounts() {
        // Any amount with at most two fractional digits survives the pair
        for kobo in [0i64, 1, 99, 100, 1999, 123_456_789] {
            let naira = kobo as f64 / 100.0;
            assert_eq!(naira_to_kobo(naira), kobo);
            assert_eq!(kobo_to_naira(kobo), format!("{naira:.2}"));
        }
    }
}
