//! Release-date normalization for the site's Spanish date strings.
//!
//! Detail pages render dates as "15 ene 2023". Month names are matched
//! against a fixed abbreviation table so parsing never depends on the
//! process locale.

use chrono::NaiveDate;

/// Spanish month abbreviations in calendar order.
const MONTHS: [&str; 12] =
    ["ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic"];

/// Parses a "day abbreviated-month year" string into a date.
///
/// Returns `None` for anything that does not match the pattern,
/// including calendar-invalid dates like "29 feb 2023". Month matching
/// is case-insensitive and tolerates a trailing period and the longer
/// "sept" form.
pub fn parse_release_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split_whitespace();

    let day: u32 = parts.next()?.parse().ok()?;
    let month = month_number(parts.next()?)?;
    let year: i32 = parts.next()?.parse().ok()?;

    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Renders a parsed date as the fixed `dd/mm/yyyy` storage format;
/// `None` becomes an empty cell.
pub fn format_release_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string()).unwrap_or_default()
}

fn month_number(token: &str) -> Option<u32> {
    let normalized = token.trim_end_matches('.').to_lowercase();
    let key: String = normalized.chars().take(3).collect();

    MONTHS.iter().position(|&m| m == key).map(|i| i as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        assert_eq!(parse_release_date("15 ene 2023"), NaiveDate::from_ymd_opt(2023, 1, 15));
        assert_eq!(parse_release_date("1 dic 2019"), NaiveDate::from_ymd_opt(2019, 12, 1));
        assert_eq!(parse_release_date("31 ago 2021"), NaiveDate::from_ymd_opt(2021, 8, 31));
    }

    #[test]
    fn test_parse_all_months() {
        for (i, month) in MONTHS.iter().enumerate() {
            let text = format!("10 {} 2022", month);
            assert_eq!(
                parse_release_date(&text),
                NaiveDate::from_ymd_opt(2022, i as u32 + 1, 10),
                "failed for {}",
                month
            );
        }
    }

    #[test]
    fn test_parse_tolerant_month_forms() {
        assert_eq!(parse_release_date("15 ENE 2023"), NaiveDate::from_ymd_opt(2023, 1, 15));
        assert_eq!(parse_release_date("15 ene. 2023"), NaiveDate::from_ymd_opt(2023, 1, 15));
        assert_eq!(parse_release_date("3 sept 2020"), NaiveDate::from_ymd_opt(2020, 9, 3));
        assert_eq!(parse_release_date("  15 ene 2023  "), NaiveDate::from_ymd_opt(2023, 1, 15));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_release_date("not a date"), None);
        assert_eq!(parse_release_date(""), None);
        assert_eq!(parse_release_date("15 xyz 2023"), None);
        assert_eq!(parse_release_date("ene 15 2023"), None);
        assert_eq!(parse_release_date("15 ene"), None);
        assert_eq!(parse_release_date("15 ene 2023 extra"), None);
    }

    #[test]
    fn test_parse_rejects_invalid_calendar_dates() {
        assert_eq!(parse_release_date("29 feb 2023"), None);
        assert_eq!(parse_release_date("31 abr 2023"), None);
        assert_eq!(parse_release_date("0 ene 2023"), None);
        // 2024 was a leap year
        assert_eq!(parse_release_date("29 feb 2024"), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_format_release_date() {
        assert_eq!(format_release_date(NaiveDate::from_ymd_opt(2023, 1, 15)), "15/01/2023");
        assert_eq!(format_release_date(NaiveDate::from_ymd_opt(2019, 12, 1)), "01/12/2019");
        assert_eq!(format_release_date(None), "");
    }

    #[test]
    fn test_roundtrip_through_storage_format() {
        let date = parse_release_date("5 mar 2022");
        assert_eq!(format_release_date(date), "05/03/2022");
    }
}
