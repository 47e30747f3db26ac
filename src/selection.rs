use chrono::{Duration, NaiveDate};

use crate::range::DateRange;

/// Per-session picking state. The draft lives only while the picker is
/// open; every commit, cancel or clear drops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    Closed,
    PickingStart,
    PickingEnd { anchor: NaiveDate },
}

/// Result of clicking a day cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Disabled day or no open session. State unchanged, nothing to show.
    Ignored,
    /// The day became the anchor of the range.
    Anchored(NaiveDate),
    /// A range was committed and the session ended.
    Committed(DateRange),
    /// The forward distance to the anchor exceeds the span bound. The
    /// session stays in `PickingEnd` with the anchor unchanged; `span` is
    /// the inclusive day count the click would have produced.
    RejectedSpan { span: i64, max_span: u32 },
}

/// Translates a sequence of day clicks into a validated, span-bounded date
/// range. The host owns the committed range; the selector only reports
/// outcomes.
#[derive(Debug, Clone)]
pub struct RangeSelector {
    state: SelectorState,
    max_span_days: u32,
    single_day: bool,
}

impl RangeSelector {
    pub fn new(max_span_days: u32, single_day: bool) -> Self {
        RangeSelector {
            state: SelectorState::Closed,
            max_span_days,
            single_day,
        }
    }

    /// Only days strictly before today can be picked.
    pub fn is_selectable(day: NaiveDate, today: NaiveDate) -> bool {
        day < today
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != SelectorState::Closed
    }

    pub fn anchor(&self) -> Option<NaiveDate> {
        match self.state {
            SelectorState::PickingEnd { anchor } => Some(anchor),
            _ => None,
        }
    }

    pub fn max_span_days(&self) -> u32 {
        self.max_span_days
    }

    pub fn single_day(&self) -> bool {
        self.single_day
    }

    /// Starts a fresh picking session, dropping any previous draft.
    pub fn open(&mut self) {
        self.state = SelectorState::PickingStart;
    }

    /// Ends the session without committing anything.
    pub fn cancel(&mut self) {
        self.state = SelectorState::Closed;
    }

    pub fn click_day(&mut self, day: NaiveDate, today: NaiveDate) -> ClickOutcome {
        if !Self::is_selectable(day, today) {
            return ClickOutcome::Ignored;
        }

        match self.state {
            SelectorState::Closed => ClickOutcome::Ignored,
            SelectorState::PickingStart => {
                if self.single_day {
                    self.state = SelectorState::Closed;
                    ClickOutcome::Committed(DateRange::single(day))
                } else {
                    self.state = SelectorState::PickingEnd { anchor: day };
                    ClickOutcome::Anchored(day)
                }
            }
            SelectorState::PickingEnd { anchor } => {
                let diff = day.signed_duration_since(anchor).num_days();

                // The bound applies to the signed forward distance only;
                // an earlier day always commits swapped.
                if diff > self.max_span_days as i64 - 1 {
                    ClickOutcome::RejectedSpan {
                        span: diff + 1,
                        max_span: self.max_span_days,
                    }
                } else {
                    self.state = SelectorState::Closed;
                    ClickOutcome::Committed(DateRange::new(anchor, day))
                }
            }
        }
    }

    /// Commits `[anchor, anchor + max_span_days - 1]` without a second
    /// click. Available once an anchor is set in multi-day mode.
    pub fn apply_default_span(&mut self) -> Option<DateRange> {
        if self.single_day {
            return None;
        }

        if let SelectorState::PickingEnd { anchor } = self.state {
            self.state = SelectorState::Closed;
            Some(DateRange::new(
                anchor,
                anchor + Duration::days(self.max_span_days as i64 - 1),
            ))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn today() -> NaiveDate {
        day(30)
    }

    fn open_selector() -> RangeSelector {
        let mut selector = RangeSelector::new(7, false);
        selector.open();
        selector
    }

    fn selector_with_anchor(anchor: NaiveDate) -> RangeSelector {
        let mut selector = open_selector();
        assert_eq!(
            selector.click_day(anchor, today()),
            ClickOutcome::Anchored(anchor)
        );
        selector
    }

    #[test]
    fn in_bounds_click_commits_unchanged() {
        let mut selector = selector_with_anchor(day(10));

        // diff = 6 is the widest range a bound of 7 allows
        let outcome = selector.click_day(day(16), today());
        assert_eq!(
            outcome,
            ClickOutcome::Committed(DateRange::new(day(10), day(16)))
        );
        assert_eq!(selector.state(), SelectorState::Closed);
    }

    #[test]
    fn earlier_click_commits_swapped() {
        let mut selector = selector_with_anchor(day(10));

        let outcome = selector.click_day(day(5), today());
        match outcome {
            ClickOutcome::Committed(range) => {
                assert_eq!(range.start(), day(5));
                assert_eq!(range.end(), day(10));
            }
            other => panic!("expected commit, got {:?}", other),
        }
    }

    #[test]
    fn out_of_span_click_is_rejected_in_place() {
        let mut selector = selector_with_anchor(day(10));

        let outcome = selector.click_day(day(17), today());
        assert_eq!(
            outcome,
            ClickOutcome::RejectedSpan {
                span: 8,
                max_span: 7
            }
        );
        assert_eq!(
            selector.state(),
            SelectorState::PickingEnd { anchor: day(10) }
        );

        // recoverable with a nearer click
        let outcome = selector.click_day(day(16), today());
        assert_eq!(
            outcome,
            ClickOutcome::Committed(DateRange::new(day(10), day(16)))
        );
    }

    #[test]
    fn clicking_the_anchor_twice_commits_a_single_day() {
        let mut selector = selector_with_anchor(day(10));

        let outcome = selector.click_day(day(10), today());
        assert_eq!(
            outcome,
            ClickOutcome::Committed(DateRange::single(day(10)))
        );
    }

    #[test]
    fn today_and_future_days_are_never_selectable() {
        let mut selector = open_selector();

        assert_eq!(selector.click_day(today(), today()), ClickOutcome::Ignored);
        assert_eq!(selector.state(), SelectorState::PickingStart);

        let mut selector = selector_with_anchor(day(26));
        let future = NaiveDate::from_ymd_opt(2024, 7, 2).unwrap();
        assert_eq!(selector.click_day(future, today()), ClickOutcome::Ignored);
        assert_eq!(
            selector.state(),
            SelectorState::PickingEnd { anchor: day(26) }
        );
    }

    #[test]
    fn clicks_without_an_open_session_are_ignored() {
        let mut selector = RangeSelector::new(7, false);
        assert_eq!(selector.click_day(day(10), today()), ClickOutcome::Ignored);
        assert_eq!(selector.state(), SelectorState::Closed);
    }

    #[test]
    fn cancel_drops_the_draft_without_committing() {
        let mut selector = selector_with_anchor(day(10));
        selector.cancel();
        assert_eq!(selector.state(), SelectorState::Closed);
        assert_eq!(selector.anchor(), None);
    }

    #[test]
    fn reopening_starts_a_fresh_draft() {
        let mut selector = selector_with_anchor(day(10));
        selector.cancel();
        selector.open();
        assert_eq!(selector.state(), SelectorState::PickingStart);
    }

    #[test]
    fn single_day_mode_commits_on_the_first_click() {
        let mut selector = RangeSelector::new(7, true);
        selector.open();

        let outcome = selector.click_day(day(10), today());
        assert_eq!(
            outcome,
            ClickOutcome::Committed(DateRange::single(day(10)))
        );
        assert_eq!(selector.state(), SelectorState::Closed);
    }

    #[test]
    fn default_span_commits_from_the_anchor() {
        let mut selector = selector_with_anchor(day(10));

        let range = selector.apply_default_span().unwrap();
        assert_eq!(range, DateRange::new(day(10), day(16)));
        assert_eq!(selector.state(), SelectorState::Closed);
    }

    #[test]
    fn default_span_needs_an_anchor_and_multi_day_mode() {
        let mut selector = open_selector();
        assert_eq!(selector.apply_default_span(), None);
        assert_eq!(selector.state(), SelectorState::PickingStart);

        let mut selector = RangeSelector::new(7, true);
        selector.open();
        assert_eq!(selector.apply_default_span(), None);
    }

    #[test]
    fn worked_example_from_a_bound_of_seven() {
        // anchor day 10: day 16 commits, day 17 is rejected, day 5 swaps
        let mut selector = selector_with_anchor(day(10));
        assert_eq!(
            selector.click_day(day(16), today()),
            ClickOutcome::Committed(DateRange::new(day(10), day(16)))
        );

        let mut selector = selector_with_anchor(day(10));
        assert!(matches!(
            selector.click_day(day(17), today()),
            ClickOutcome::RejectedSpan { .. }
        ));

        let mut selector = selector_with_anchor(day(10));
        assert_eq!(
            selector.click_day(day(5), today()),
            ClickOutcome::Committed(DateRange::new(day(5), day(10)))
        );
    }
}
