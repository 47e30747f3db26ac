use std::fmt::Display;
use std::fmt::Write;

use unsegen::base::*;
use unsegen::widget::*;

use crate::calendar::MonthIndex;
use crate::selection::RangeSelector;

use super::{Context, Theme};

struct DayCell<'a> {
    day_num: u8,
    focused: bool,
    anchor: bool,
    in_range: bool,
    disabled: bool,
    is_today: bool,
    theme: &'a Theme,
}

impl<'a> DayCell<'a> {
    const CELL_HEIGHT: usize = 1;
    const CELL_WIDTH: usize = 4;

    fn new(day_num: u8, theme: &'a Theme) -> Self {
        DayCell {
            day_num,
            focused: false,
            anchor: false,
            in_range: false,
            disabled: false,
            is_today: false,
            theme,
        }
    }

    fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn anchor(mut self, anchor: bool) -> Self {
        self.anchor = anchor;
        self
    }

    fn in_range(mut self, in_range: bool) -> Self {
        self.in_range = in_range;
        self
    }

    fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    fn today(mut self, is_today: bool) -> Self {
        self.is_today = is_today;
        self
    }

    fn style(&self) -> StyleModifier {
        if self.focused {
            self.theme.focus_day_style
        } else if self.anchor {
            self.theme.anchor_day_style
        } else if self.in_range {
            self.theme.in_range_day_style
        } else if self.disabled {
            self.theme.disabled_day_style
        } else {
            self.theme.day_style
        }
    }
}

impl Display for DayCell<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arg_today = if self.is_today {
            self.theme.today_day_char.unwrap_or(' ')
        } else {
            ' '
        };

        let arg_anchor = if self.anchor {
            self.theme.anchor_day_char.unwrap_or(' ')
        } else {
            ' '
        };

        write!(f, "{}{}{:>2}", arg_today, arg_anchor, self.day_num)
    }
}

pub struct MonthPane<'a> {
    index: MonthIndex,
    num_days: u8,
    offset: u8,
    context: &'a Context,
}

impl<'a> MonthPane<'a> {
    const COLUMNS: usize = 7;
    const ROWS: usize = 6;
    const HEADER_ROWS: usize = 1;

    const HEADER: &'static [&'static str] = &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

    pub fn new(index: MonthIndex, context: &'a Context) -> Self {
        MonthPane {
            index,
            num_days: index.num_days() as u8,
            offset: index.weekday_offset() as u8,
            context,
        }
    }
}

impl Widget for MonthPane<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(Self::COLUMNS * DayCell::CELL_WIDTH),
            height: RowDemand::exact(Self::HEADER_ROWS + Self::ROWS * DayCell::CELL_HEIGHT),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = self.context.theme();
        let today = self.context.today();

        let mut cursor = Cursor::new(&mut window)
            .wrapping_mode(WrappingMode::Wrap)
            .style_modifier(
                theme
                    .month_header_style
                    .format(theme.month_header_text_style),
            );

        for &head in Self::HEADER {
            write!(
                &mut cursor,
                "{:>width$}",
                &head,
                width = DayCell::CELL_WIDTH
            )
            .unwrap();
        }

        // offset for the first row
        cursor.set_style_modifier(StyleModifier::default());
        cursor.move_by(
            ColDiff::new((DayCell::CELL_WIDTH * self.offset as usize) as i32),
            RowDiff::new(0),
        );

        for day_num in 1..=self.num_days {
            let day = self.index.day(day_num as u32);

            let cell = DayCell::new(day_num, theme)
                .focused(self.context.picker_open() && day == self.context.cursor())
                .anchor(self.context.anchor() == Some(day))
                .in_range(self.context.is_in_draft_range(day))
                .disabled(!RangeSelector::is_selectable(day, today))
                .today(day == today);

            cursor.set_style_modifier(cell.style());
            write!(&mut cursor, "{}", cell).unwrap();
        }
    }
}
