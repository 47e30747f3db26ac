use chrono::{DateTime, Duration, Local, NaiveDate};

use unsegen::base::style::*;

use crate::calendar::MonthIndex;
use crate::config::Config;
use crate::range::DateRange;
use crate::selection::{ClickOutcome, RangeSelector};

#[derive(Clone, Debug)]
pub struct Theme {
    pub day_style: StyleModifier,
    pub focus_day_style: StyleModifier,
    pub disabled_day_style: StyleModifier,
    pub anchor_day_style: StyleModifier,
    pub in_range_day_style: StyleModifier,
    pub today_day_char: Option<char>,
    pub anchor_day_char: Option<char>,
    pub month_header_style: StyleModifier,
    pub month_header_text_style: TextFormatModifier,
    pub trigger_style: StyleModifier,
    pub hint_style: StyleModifier,
    pub notice_style: StyleModifier,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            day_style: StyleModifier::default(),
            focus_day_style: StyleModifier::default().bg_color(Color::Blue),
            disabled_day_style: StyleModifier::default().fg_color(Color::LightBlack),
            anchor_day_style: StyleModifier::default().bg_color(Color::Magenta),
            in_range_day_style: StyleModifier::default().bg_color(Color::Cyan),
            today_day_char: Some('*'),
            anchor_day_char: None,
            month_header_style: StyleModifier::default().fg_color(Color::Yellow),
            month_header_text_style: TextFormatModifier::default(),
            trigger_style: StyleModifier::default().invert(true),
            hint_style: StyleModifier::default().fg_color(Color::LightBlack),
            notice_style: StyleModifier::default().fg_color(Color::Red),
        }
    }
}

/// Shared state of one picker host: the committed range, the transient
/// picking session, and the grid the widgets render from.
pub struct Context {
    theme: Theme,
    now: DateTime<Local>,
    cursor: NaiveDate,
    visible: MonthIndex,
    selector: RangeSelector,
    committed: Option<DateRange>,
    pub last_error_message: Option<String>,
}

impl Context {
    pub fn new(config: &Config) -> Self {
        let now = Local::now();
        Context {
            theme: Theme::default(),
            now,
            cursor: now.date_naive(),
            visible: MonthIndex::default(),
            selector: RangeSelector::new(config.max_span_days, config.single_day),
            committed: None,
            last_error_message: None,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn now(&self) -> &DateTime<Local> {
        &self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn update(&mut self) {
        self.now = Local::now();
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn visible(&self) -> MonthIndex {
        self.visible
    }

    pub fn committed(&self) -> Option<&DateRange> {
        self.committed.as_ref()
    }

    pub fn set_committed(&mut self, range: DateRange) {
        self.committed = Some(range);
    }

    pub fn clear_committed(&mut self) {
        self.committed = None;
    }

    pub fn picker_open(&self) -> bool {
        self.selector.is_open()
    }

    pub fn selector(&self) -> &RangeSelector {
        &self.selector
    }

    pub fn anchor(&self) -> Option<NaiveDate> {
        self.selector.anchor()
    }

    /// Days highlighted between the anchor and the focused cursor while an
    /// end date is being picked, in either order.
    pub fn is_in_draft_range(&self, day: NaiveDate) -> bool {
        match self.selector.anchor() {
            Some(anchor) => {
                let (lo, hi) = if anchor <= self.cursor {
                    (anchor, self.cursor)
                } else {
                    (self.cursor, anchor)
                };
                lo <= day && day <= hi
            }
            None => false,
        }
    }

    /// Opens a fresh session: the visible month always resets to the month
    /// containing today, the cursor to the most recent selectable day.
    pub fn open_picker(&mut self) {
        self.selector.open();
        self.visible = self.today().into();
        self.cursor = self.today() - Duration::days(1);
        self.last_error_message = None;
    }

    /// Closes the session and drops the draft. Used for explicit cancel and
    /// for every other way of leaving the picker.
    pub fn dismiss_picker(&mut self) {
        self.selector.cancel();
        self.last_error_message = None;
    }

    pub fn move_cursor(&mut self, days: i64) {
        self.cursor = self.cursor + Duration::days(days);
        self.visible = self.cursor.into();
        self.last_error_message = None;
    }

    /// Month navigation moves the visible grid only; the draft and the
    /// cursor stay untouched.
    pub fn next_month(&mut self) {
        self.visible = self.visible.next();
        self.last_error_message = None;
    }

    pub fn prev_month(&mut self) {
        self.visible = self.visible.prev();
        self.last_error_message = None;
    }

    pub fn click_cursor(&mut self) -> ClickOutcome {
        let today = self.today();
        self.selector.click_day(self.cursor, today)
    }

    pub fn apply_default_span(&mut self) -> Option<DateRange> {
        self.selector.apply_default_span()
    }

    pub fn trigger_label(&self, format: &str) -> String {
        match &self.committed {
            Some(range) => range.label(format),
            None => "no range selected".to_owned(),
        }
    }
}
