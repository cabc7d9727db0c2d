//! Day arithmetic on local calendar dates.
//!
//! Every function here is pure. Weekdays are numbered from Sunday (0) to
//! Saturday (6) and months passed as plain numbers are 0-based, matching
//! the grid's cell layout.

use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::clock::Clock;

/// True when both values fall on the same calendar day. Time-of-day is ignored.
pub fn is_same_day<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

pub fn is_today<D: Datelike>(d: &D, clock: &dyn Clock) -> bool {
    is_same_day(d, &clock.today())
}

/// 0 for Sunday through 6 for Saturday.
pub fn weekday_index<D: Datelike>(d: &D) -> u32 {
    d.weekday().num_days_from_sunday()
}

pub fn is_weekend<D: Datelike>(d: &D) -> bool {
    matches!(weekday_index(d), 0 | 6)
}

/// Offset a date by `n` days in either direction.
///
/// Saturates at the edges of chrono's representable range.
pub fn add_days(d: NaiveDate, n: i64) -> NaiveDate {
    TimeDelta::try_days(n)
        .and_then(|delta| d.checked_add_signed(delta))
        .unwrap_or(if n < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// The Sunday on or before `d`.
pub fn week_start(d: NaiveDate) -> NaiveDate {
    add_days(d, -(weekday_index(&d) as i64))
}

pub fn month_start(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

pub fn month_end(d: NaiveDate) -> NaiveDate {
    d.with_day(days_in_month(d.year(), d.month0())).unwrap_or(d)
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Length of a month, `month0` being 0 for January.
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    match month0 {
        1 if is_leap_year(year) => 29,
        1 => 28,
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

/// Every date in `d`'s month, first to last.
pub fn month_days(d: NaiveDate) -> Vec<NaiveDate> {
    let len = days_in_month(d.year(), d.month0()) as usize;
    month_start(d).iter_days().take(len).collect()
}

/// `YYYY/MM/DD`
pub fn format_date(d: NaiveDate) -> String {
    d.format("%Y/%m/%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    #[test]
    fn test_is_same_day_ignores_time_of_day() {
        let morning = datetime("2024-12-25T10:00");
        let night = datetime("2024-12-25T23:59");
        assert!(is_same_day(&morning, &night));
        assert!(is_same_day(&night, &morning));
        assert!(is_same_day(&morning, &morning));
        assert!(is_same_day(&morning, &date(2024, 12, 25)));
        assert!(!is_same_day(&morning, &datetime("2024-12-26T10:00")));
    }

    #[test]
    fn test_is_same_day_compares_year_and_month() {
        assert!(!is_same_day(&date(2024, 12, 25), &date(2023, 12, 25)));
        assert!(!is_same_day(&date(2024, 12, 25), &date(2024, 11, 25)));
    }

    #[test]
    fn test_is_today_uses_clock() {
        let clock = crate::clock::FixedClock::on(date(2024, 6, 15));
        assert!(is_today(&date(2024, 6, 15), &clock));
        assert!(!is_today(&date(2024, 6, 16), &clock));
    }

    #[test]
    fn test_is_weekend() {
        // 2024-12-21 is a Saturday
        assert!(is_weekend(&date(2024, 12, 21)));
        assert!(is_weekend(&date(2024, 12, 22)));
        for day in 23..=27 {
            assert!(!is_weekend(&date(2024, 12, day)), "Dec {day} is a weekday");
        }
    }

    #[test]
    fn test_add_days_rolls_across_month_and_year() {
        assert_eq!(add_days(date(2024, 12, 31), 1), date(2025, 1, 1));
        assert_eq!(add_days(date(2025, 1, 1), -1), date(2024, 12, 31));
        assert_eq!(add_days(date(2024, 2, 28), 1), date(2024, 2, 29));
        assert_eq!(add_days(date(2023, 2, 28), 1), date(2023, 3, 1));
        assert_eq!(add_days(date(2024, 3, 1), -30), date(2024, 1, 31));
    }

    #[test]
    fn test_add_days_round_trip() {
        let start = date(2024, 1, 15);
        for n in [-1000, -366, -31, -1, 0, 1, 29, 365, 4000] {
            assert_eq!(add_days(add_days(start, n), -n), start, "n = {n}");
        }
    }

    #[test]
    fn test_week_start_is_sunday_on_or_before() {
        // 2024-12-25 is a Wednesday
        assert_eq!(week_start(date(2024, 12, 25)), date(2024, 12, 22));
        assert_eq!(week_start(date(2024, 12, 22)), date(2024, 12, 22));
        // Crosses into the previous year
        assert_eq!(week_start(date(2025, 1, 1)), date(2024, 12, 29));
    }

    #[test]
    fn test_month_boundaries() {
        assert_eq!(month_start(date(2024, 2, 17)), date(2024, 2, 1));
        assert_eq!(month_end(date(2024, 2, 17)), date(2024, 2, 29));
        assert_eq!(month_end(date(2023, 2, 1)), date(2023, 2, 28));
        assert_eq!(month_end(date(2024, 4, 30)), date(2024, 4, 30));
        assert_eq!(month_end(date(2024, 12, 1)), date(2024, 12, 31));
    }

    #[test]
    fn test_days_in_february_follows_leap_rules() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(2000, 1), 29);
        assert_eq!(days_in_month(1900, 1), 28);
    }

    #[test]
    fn test_days_in_month_agrees_with_chrono() {
        for year in [1900, 1999, 2000, 2023, 2024, 2100] {
            for month0 in 0..12 {
                let first = date(year, month0 + 1, 1);
                let next = first.checked_add_months(chrono::Months::new(1)).unwrap();
                let expected = (next - first).num_days() as u32;
                assert_eq!(days_in_month(year, month0), expected, "{year}-{month0}");
            }
        }
    }

    #[test]
    fn test_month_days() {
        let days = month_days(date(2024, 2, 10));
        assert_eq!(days.len(), 29);
        assert_eq!(days.first(), Some(&date(2024, 2, 1)));
        assert_eq!(days.last(), Some(&date(2024, 2, 29)));
    }

    #[test]
    fn test_format_date_zero_pads() {
        assert_eq!(format_date(date(2024, 1, 5)), "2024/01/05");
        assert_eq!(format_date(date(2024, 12, 25)), "2024/12/25");
    }
}
