use chrono::NaiveDate;

use crate::error::AppError;
use crate::report::DateRange;

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    let s = s.trim();
    // Try YYYYMMDD
    if s.len() == 8 {
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d") {
            return Ok(d);
        }
    }
    // Try YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    Err(AppError::InvalidDate {
        input: s.to_string(),
    })
}

/// Report window from optional CLI dates.
///
/// Both dates pick an explicit range; anything less falls back to last week.
pub(crate) fn resolve_range(
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> Result<DateRange, AppError> {
    let start = start.map(parse_date).transpose()?;
    let end = end.map(parse_date).transpose()?;

    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(AppError::InvalidRange { start, end }),
        (Some(start), Some(end)) => Ok(DateRange::new(start, end)),
        (None, None) => Ok(DateRange::last_week(today)),
        _ => {
            let range = DateRange::last_week(today);
            tracing::warn!(
                "both --start-date and --end-date are needed for a custom window; using {range}"
            );
            Ok(range)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_compact_and_dashed() {
        assert_eq!(parse_date("20261005").unwrap(), date(2026, 10, 5));
        assert_eq!(parse_date("2026-10-05").unwrap(), date(2026, 10, 5));
        assert_eq!(parse_date(" 2026-10-05 ").unwrap(), date(2026, 10, 5));
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["", "2026-13-01", "20261399", "yesterday", "05/10/2026"] {
            assert!(
                matches!(parse_date(bad), Err(AppError::InvalidDate { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn explicit_range_is_kept() {
        let range = resolve_range(Some("2026-09-01"), Some("20260907"), date(2026, 10, 17)).unwrap();
        assert_eq!(range, DateRange::new(date(2026, 9, 1), date(2026, 9, 7)));
    }

    #[test]
    fn missing_dates_default_to_last_week() {
        let today = date(2026, 10, 17);
        let expected = DateRange::new(date(2026, 10, 5), date(2026, 10, 11));
        assert_eq!(resolve_range(None, None, today).unwrap(), expected);
        assert_eq!(resolve_range(Some("2026-09-01"), None, today).unwrap(), expected);
        assert_eq!(resolve_range(None, Some("2026-09-07"), today).unwrap(), expected);
    }

    #[test]
    fn lone_invalid_date_is_still_an_error() {
        let err = resolve_range(Some("nope"), None, date(2026, 10, 17)).unwrap_err();
        assert!(matches!(err, AppError::InvalidDate { .. }));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = resolve_range(Some("2026-09-07"), Some("2026-09-01"), date(2026, 10, 17)).unwrap_err();
        assert!(matches!(err, AppError::InvalidRange { .. }));
    }
}
