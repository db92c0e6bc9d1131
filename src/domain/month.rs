use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use std::fmt;

/// Calendar month, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn current_utc() -> Self {
        let today = Utc::now().date_naive();
        Self::new(today.year(), today.month())
    }

    pub fn next(self) -> Self {
        if self.month >= 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// Unix seconds of midnight UTC on the first day of the month
    pub fn start_timestamp(self) -> Result<i64> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .with_context(|| format!("Invalid month {}", self))?;
        Ok(date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp())
    }

    /// Half-open `[start, next start)` window in Unix seconds
    pub fn window(self) -> Result<(i64, i64)> {
        Ok((self.start_timestamp()?, self.next().start_timestamp()?))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps_december() {
        assert_eq!(YearMonth::new(2022, 7).next(), YearMonth::new(2022, 8));
        assert_eq!(YearMonth::new(2022, 12).next(), YearMonth::new(2023, 1));
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(YearMonth::new(2022, 12) < YearMonth::new(2023, 1));
        assert!(YearMonth::new(2023, 2) > YearMonth::new(2023, 1));
    }

    #[test]
    fn test_window() {
        let (after, before) = YearMonth::new(2019, 2).window().unwrap();
        assert_eq!(after, 1_548_979_200);
        assert_eq!(before, 1_551_398_400);
    }

    #[test]
    fn test_display_is_unpadded() {
        assert_eq!(YearMonth::new(2019, 2).to_string(), "2019-2");
    }
}
