//! Parsing helpers for free-text KOPIS fields: dotted dates and ticket
//! price guidance.

use chrono::NaiveDate;

use crate::error::FormatError;

/// Price guidance KOPIS uses for free admission.
pub const FREE_ADMISSION: &str = "전석무료";

/// Width of one price chunk once punctuation is stripped.
const PRICE_CHUNK_DIGITS: usize = 5;

/// Parses a `"YYYY.MM.DD"` date into a [`NaiveDate`].
///
/// Only dots are accepted as separators and each group must have exactly
/// 4, 2, and 2 ASCII digits. Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`FormatError`] for any other shape or for an impossible
/// calendar date such as `"2024.02.30"`.
pub fn parse_dotted_date(text: &str) -> Result<NaiveDate, FormatError> {
    let err = || FormatError {
        input: text.to_string(),
    };

    let mut parts = text.trim().split('.');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(err());
    };

    let group = |s: &str, width: usize| -> Option<u32> {
        if s.len() == width && s.bytes().all(|b| b.is_ascii_digit()) {
            s.parse().ok()
        } else {
            None
        }
    };

    let year = group(year, 4).ok_or_else(err)?;
    let month = group(month, 2).ok_or_else(err)?;
    let day = group(day, 2).ok_or_else(err)?;

    let year = i32::try_from(year).map_err(|_| err())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(err)
}

/// Reduces KOPIS price guidance to the lowest ticket tier.
///
/// Every non-digit character is dropped, the remaining digit run is cut into
/// consecutive 5-digit chunks from the left, and the smallest chunk wins.
/// Free admission, empty text, and text without digits all yield `0`.
///
/// The chunking assumes every tier is a 5-digit won amount. Tiers of other
/// widths shift the chunk boundaries, e.g. `"R석 100,000원, S석 70,000원"`
/// yields chunks `10000`, `07000`, `0` and therefore `0`. This matches the
/// records already stored downstream and must not change without migrating
/// them.
#[must_use]
pub fn parse_min_price(text: &str) -> u32 {
    if text.is_empty() || text == FREE_ADMISSION {
        return 0;
    }

    let digits: Vec<u8> = text.bytes().filter(u8::is_ascii_digit).collect();

    digits
        .chunks(PRICE_CHUNK_DIGITS)
        .filter_map(|chunk| std::str::from_utf8(chunk).ok()?.parse::<u32>().ok())
        .min()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;

    #[test]
    fn parse_dotted_date_valid() {
        let d = parse_dotted_date("2024.01.31").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn parse_dotted_date_round_trips_components() {
        for (y, m, d) in [(2024, 1, 1), (1999, 12, 31), (2024, 2, 29), (2030, 7, 15)] {
            let text = format!("{y:04}.{m:02}.{d:02}");
            let date = parse_dotted_date(&text).unwrap();
            assert_eq!((date.year(), date.month(), date.day()), (y, m, d), "{text}");
        }
    }

    #[test]
    fn parse_dotted_date_trims_whitespace() {
        assert!(parse_dotted_date(" 2024.03.05\n").is_ok());
    }

    #[test]
    fn parse_dotted_date_rejects_other_separators() {
        for text in ["2024-01-01", "2024/01/01", "2024 01 01", "20240101"] {
            let err = parse_dotted_date(text).unwrap_err();
            assert_eq!(err.input, text);
        }
    }

    #[test]
    fn parse_dotted_date_rejects_malformed_groups() {
        for text in ["2024.1.1", "24.01.01", "2024.01.01.", "2024..01", "2024.0a.01", ""] {
            assert!(parse_dotted_date(text).is_err(), "{text:?} should fail");
        }
    }

    #[test]
    fn parse_dotted_date_rejects_impossible_dates() {
        assert!(parse_dotted_date("2023.02.29").is_err());
        assert!(parse_dotted_date("2024.13.01").is_err());
        assert!(parse_dotted_date("2024.04.31").is_err());
    }

    #[test]
    fn parse_min_price_free_and_empty() {
        assert_eq!(parse_min_price("전석무료"), 0);
        assert_eq!(parse_min_price(""), 0);
    }

    #[test]
    fn parse_min_price_without_digits() {
        assert_eq!(parse_min_price("무료 (사전예약)"), 0);
    }

    #[test]
    fn parse_min_price_single_tier() {
        assert_eq!(parse_min_price("30,000원"), 30_000);
        assert_eq!(parse_min_price("전석 20,000원"), 20_000);
    }

    #[test]
    fn parse_min_price_multi_tier_takes_minimum_chunk() {
        // digits "3000020000" -> chunks "30000", "20000"
        assert_eq!(parse_min_price("전석 30,000원 / 학생 20,000원"), 20_000);
    }

    #[test]
    fn parse_min_price_short_amount_is_one_chunk() {
        assert_eq!(parse_min_price("5,000원"), 5_000);
        assert_eq!(parse_min_price("500원"), 500);
    }

    #[test]
    fn parse_min_price_misgroups_six_digit_tiers() {
        // digits "10000070000" -> chunks "10000", "07000", "0"
        assert_eq!(parse_min_price("R석 100,000원, S석 70,000원"), 0);
        // digits "15000050000" -> chunks "15000", "05000", "0"
        assert_eq!(parse_min_price("VIP석 150,000원 / A석 50,000원"), 0);
    }

    #[test]
    fn parse_min_price_trailing_short_chunk_can_win() {
        // digits "5000012" -> chunks "50000", "12"
        assert_eq!(parse_min_price("50,000원 (12세 이상)"), 12);
    }

    #[test]
    fn parse_min_price_ignores_non_ascii_digits() {
        assert_eq!(parse_min_price("３０,０００원"), 0);
    }
}
