use chrono::{Datelike, Local, Month, NaiveDate};
use num_traits::FromPrimitive;

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    if month.number_from_month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month.number_from_month() + 1, 1)
    }
    .unwrap()
    .signed_duration_since(NaiveDate::from_ymd_opt(year, month.number_from_month(), 1).unwrap())
    .num_days() as u32
}

/// A calendar month of a specific year, used as the index of the visible
/// month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthIndex {
    pub month: Month,
    pub year: i32,
}

impl MonthIndex {
    pub fn new(month: Month, year: i32) -> Self {
        MonthIndex { month, year }
    }

    pub fn next(&self) -> Self {
        let next_month = self.month.succ();

        MonthIndex {
            month: next_month,
            year: if next_month.number_from_month() == 1 {
                self.year + 1
            } else {
                self.year
            },
        }
    }

    pub fn prev(&self) -> Self {
        let prev_month = self.month.pred();

        MonthIndex {
            month: prev_month,
            year: if prev_month.number_from_month() == 12 {
                self.year - 1
            } else {
                self.year
            },
        }
    }

    pub fn num_days(&self) -> u32 {
        days_of_month(&self.month, self.year)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month.number_from_month(), 1).unwrap()
    }

    /// Column of the first day in a Monday-based week grid.
    pub fn weekday_offset(&self) -> u32 {
        self.first_day().weekday().num_days_from_monday()
    }

    /// The given day of this month. `day_num` must be within
    /// `1..=num_days()`.
    pub fn day(&self, day_num: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month.number_from_month(), day_num).unwrap()
    }

    pub fn contains(&self, day: &NaiveDate) -> bool {
        day.year() == self.year && day.month() == self.month.number_from_month()
    }
}

impl Default for MonthIndex {
    fn default() -> Self {
        Local::now().date_naive().into()
    }
}

impl<T: Datelike> From<T> for MonthIndex {
    fn from(m: T) -> Self {
        MonthIndex::new(Month::from_u32(m.month()).unwrap(), m.year())
    }
}
