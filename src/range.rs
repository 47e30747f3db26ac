use chrono::NaiveDate;

const ISO_FORMAT: &str = "%Y-%m-%d";

/// A committed, inclusive range of calendar days. `start <= end` always
/// holds; the constructor reorders inverted inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if b < a {
            DateRange { start: b, end: a }
        } else {
            DateRange { start: a, end: b }
        }
    }

    pub fn single(day: NaiveDate) -> Self {
        DateRange {
            start: day,
            end: day,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive day count of the range.
    pub fn span_days(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_days() + 1
    }

    pub fn contains(&self, day: &NaiveDate) -> bool {
        &self.start <= day && day <= &self.end
    }

    pub fn to_iso_pair(&self) -> (String, String) {
        (
            self.start.format(ISO_FORMAT).to_string(),
            self.end.format(ISO_FORMAT).to_string(),
        )
    }

    /// Human readable label for the trigger line. A single-day range is
    /// shown as one formatted day.
    pub fn label(&self, format: &str) -> String {
        if self.start == self.end {
            self.start.format(format).to_string()
        } else {
            format!(
                "{} – {}",
                self.start.format(format),
                self.end.format(format)
            )
        }
    }
}
