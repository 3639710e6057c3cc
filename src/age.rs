//! Calendar age of an account, "X years, Y months, Z days".
//!
//! Chrono has no year/month/day difference, so whole months are counted with
//! `checked_add_months` (which clamps to the end of shorter months) and the
//! remainder is taken in days.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountAge {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl AccountAge {
    /// `None` when `since` lies after `today`.
    pub fn between(since: NaiveDate, today: NaiveDate) -> Option<Self> {
        if since > today {
            return None;
        }

        let mut whole_months = (today.year() - since.year()) * 12 + today.month() as i32
            - since.month() as i32;
        let mut anchor = add_months(since, whole_months)?;
        if anchor > today {
            whole_months -= 1;
            anchor = add_months(since, whole_months)?;
        }

        let whole_months = u32::try_from(whole_months).ok()?;
        let days = u32::try_from((today - anchor).num_days()).ok()?;

        Some(Self {
            years: whole_months / 12,
            months: whole_months % 12,
            days,
        })
    }
}

fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(u32::try_from(months).ok()?))
}

impl fmt::Display for AccountAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years),
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

fn plural(n: u32) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn same_day() {
        let age = AccountAge::between(d(2020, 5, 5), d(2020, 5, 5)).unwrap();
        assert_eq!(age.to_string(), "0 years, 0 months, 0 days");
    }

    #[test]
    fn borrows_a_month_when_day_not_reached() {
        let age = AccountAge::between(d(2011, 1, 25), d(2024, 3, 10)).unwrap();
        assert_eq!((age.years, age.months, age.days), (13, 1, 14));
    }

    #[test]
    fn singular_units() {
        let age = AccountAge::between(d(2019, 1, 1), d(2020, 2, 2)).unwrap();
        assert_eq!(age.to_string(), "1 year, 1 month, 1 day");
    }

    #[test]
    fn end_of_month_clamps() {
        let age = AccountAge::between(d(2023, 1, 31), d(2023, 2, 28)).unwrap();
        assert_eq!((age.years, age.months, age.days), (0, 1, 0));
        let age = AccountAge::between(d(2024, 1, 31), d(2024, 3, 1)).unwrap();
        assert_eq!((age.years, age.months, age.days), (0, 1, 1));
    }

    #[test]
    fn future_date_has_no_age() {
        assert!(AccountAge::between(d(2030, 1, 1), d(2024, 1, 1)).is_none());
    }
}
