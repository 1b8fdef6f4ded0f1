// Recurrence spec parsing and calendar arithmetic

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};

use crate::error::TodoError;

/// Recurrence unit of a `rec:` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceUnit {
    Day,
    Week,
    Month,
    Year,
}

impl RecurrenceUnit {
    fn letter(&self) -> char {
        match self {
            Self::Day => 'd',
            Self::Week => 'w',
            Self::Month => 'm',
            Self::Year => 'y',
        }
    }
}

/// Parsed `<count><unit>` recurrence spec, e.g. `1d`, `2w`, `6m`, `1y`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recurrence {
    pub amount: u32,
    pub unit: RecurrenceUnit,
}

impl FromStr for Recurrence {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TodoError::InvalidRecurrence(s.to_string());
        if !s.is_ascii() || s.len() < 2 {
            return Err(err());
        }
        let (count, unit) = s.split_at(s.len() - 1);
        if !count.chars().all(|c| c.is_ascii_digit()) {
            return Err(err());
        }
        let amount: u32 = count.parse().map_err(|_| err())?;
        if amount == 0 {
            return Err(err());
        }
        let unit = match unit {
            "d" => RecurrenceUnit::Day,
            "w" => RecurrenceUnit::Week,
            "m" => RecurrenceUnit::Month,
            "y" => RecurrenceUnit::Year,
            _ => return Err(err()),
        };
        Ok(Self { amount, unit })
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.letter())
    }
}

impl Recurrence {
    /// Next due date counted from `from`.
    ///
    /// Days and weeks are fixed day counts; months and years are calendar
    /// arithmetic. A day past the end of the target month clamps to its last
    /// day (Jan 31 + 1m = Feb 28, Feb 29 + 1y = Feb 28).
    pub fn next_due(&self, from: NaiveDate) -> NaiveDate {
        let next = match self.unit {
            RecurrenceUnit::Day => from.checked_add_days(Days::new(self.amount as u64)),
            RecurrenceUnit::Week => from.checked_add_days(Days::new(self.amount as u64 * 7)),
            RecurrenceUnit::Month => from.checked_add_months(Months::new(self.amount)),
            RecurrenceUnit::Year => from.checked_add_months(Months::new(self.amount * 12)),
        };
        next.unwrap_or(NaiveDate::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_valid_specs() {
        let rec: Recurrence = "1d".parse().unwrap();
        assert_eq!(rec.amount, 1);
        assert_eq!(rec.unit, RecurrenceUnit::Day);

        let rec: Recurrence = "2w".parse().unwrap();
        assert_eq!(rec.amount, 2);
        assert_eq!(rec.unit, RecurrenceUnit::Week);

        let rec: Recurrence = "6m".parse().unwrap();
        assert_eq!(rec.amount, 6);
        assert_eq!(rec.unit, RecurrenceUnit::Month);

        let rec: Recurrence = "10y".parse().unwrap();
        assert_eq!(rec.amount, 10);
        assert_eq!(rec.unit, RecurrenceUnit::Year);
    }

    #[test]
    fn test_parse_rejects_malformed_specs() {
        for spec in ["", "d", "1", "0d", "1x", "-1d", "+1d", "1.5d", "d1", "1dd"] {
            assert!(spec.parse::<Recurrence>().is_err(), "should reject '{spec}'");
        }
    }

    #[test]
    fn test_display_round_trips() {
        for spec in ["1d", "2w", "6m", "10y"] {
            let rec: Recurrence = spec.parse().unwrap();
            assert_eq!(rec.to_string(), spec);
        }
    }

    #[test]
    fn test_next_due_days_and_weeks() {
        let from = date(2024, 3, 1);
        assert_eq!("1d".parse::<Recurrence>().unwrap().next_due(from), date(2024, 3, 2));
        assert_eq!("10d".parse::<Recurrence>().unwrap().next_due(from), date(2024, 3, 11));
        assert_eq!("1w".parse::<Recurrence>().unwrap().next_due(from), date(2024, 3, 8));
        assert_eq!("2w".parse::<Recurrence>().unwrap().next_due(from), date(2024, 3, 15));
    }

    #[test]
    fn test_next_due_calendar_months_and_years() {
        let rec: Recurrence = "1m".parse().unwrap();
        assert_eq!(rec.next_due(date(2024, 3, 15)), date(2024, 4, 15));

        let rec: Recurrence = "1y".parse().unwrap();
        assert_eq!(rec.next_due(date(2024, 3, 15)), date(2025, 3, 15));
    }

    #[test]
    fn test_next_due_clamps_month_overflow() {
        let rec: Recurrence = "1m".parse().unwrap();
        assert_eq!(rec.next_due(date(2025, 1, 31)), date(2025, 2, 28));
        assert_eq!(rec.next_due(date(2024, 1, 31)), date(2024, 2, 29));

        let rec: Recurrence = "1y".parse().unwrap();
        assert_eq!(rec.next_due(date(2024, 2, 29)), date(2025, 2, 28));
    }
}
