//! A calendar month, independent of any day within it.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::date_math;

/// Year plus 0-based month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month0: u32,
}

impl YearMonth {
    /// `None` when `month0` is outside 0..=11 or the year is out of chrono's range.
    pub fn new(year: i32, month0: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month0 + 1, 1)?;
        Some(YearMonth { year, month0 })
    }

    pub fn of<D: Datelike>(d: &D) -> Self {
        YearMonth {
            year: d.year(),
            month0: d.month0(),
        }
    }

    /// Parse `YYYY-MM` (1-based month, as typed by people).
    pub fn parse(s: &str) -> Option<Self> {
        let (year, month) = s.split_once('-')?;
        let month: u32 = month.parse().ok()?;
        Self::new(year.parse().ok()?, month.checked_sub(1)?)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month0(&self) -> u32 {
        self.month0
    }

    /// 1-based month, for display.
    pub fn month(&self) -> u32 {
        self.month0 + 1
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1).unwrap_or_default()
    }

    pub fn last_day(&self) -> NaiveDate {
        date_math::month_end(self.first_day())
    }

    pub fn len_days(&self) -> u32 {
        date_math::days_in_month(self.year, self.month0)
    }

    pub fn contains<D: Datelike>(&self, d: &D) -> bool {
        d.year() == self.year && d.month0() == self.month0
    }

    /// Shift by whole months, rolling the year as needed.
    pub fn offset(&self, months: i32) -> Self {
        let total = self.year * 12 + self.month0 as i32 + months;
        YearMonth {
            year: total.div_euclid(12),
            month0: total.rem_euclid(12) as u32,
        }
    }

    pub fn pred(&self) -> Self {
        self.offset(-1)
    }

    pub fn succ(&self) -> Self {
        self.offset(1)
    }

    /// `YYYY年M月`
    pub fn title(&self) -> String {
        format!("{}年{}月", self.year, self.month())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range_month() {
        assert!(YearMonth::new(2024, 11).is_some());
        assert!(YearMonth::new(2024, 12).is_none());
    }

    #[test]
    fn test_succ_and_pred_roll_year() {
        let dec = YearMonth::new(2024, 11).unwrap();
        assert_eq!(dec.succ(), YearMonth::new(2025, 0).unwrap());

        let jan = YearMonth::new(2024, 0).unwrap();
        assert_eq!(jan.pred(), YearMonth::new(2023, 11).unwrap());

        assert_eq!(jan.offset(-25), YearMonth::new(2021, 11).unwrap());
        assert_eq!(jan.offset(24), YearMonth::new(2026, 0).unwrap());
    }

    #[test]
    fn test_parse_and_display() {
        let ym = YearMonth::parse("2024-02").unwrap();
        assert_eq!(ym.month0(), 1);
        assert_eq!(ym.len_days(), 29);
        assert_eq!(ym.to_string(), "2024-02");
        assert!(YearMonth::parse("2024-13").is_none());
        assert!(YearMonth::parse("2024-00").is_none());
        assert!(YearMonth::parse("garbage").is_none());
    }

    #[test]
    fn test_title() {
        assert_eq!(YearMonth::new(2024, 11).unwrap().title(), "2024年12月");
    }
}
