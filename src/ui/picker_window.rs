use unsegen::widget::*;

use crate::selection::SelectorState;

use super::month_pane::MonthPane;
use super::util::Line;
use super::Context;

const HINTS: &str = "[enter] pick  [a] default span  [x] clear  [[/]] month  [esc] cancel";

/// The dropdown below the trigger line: month title, day grid, status and
/// hint lines, and the transient out-of-span notice.
pub fn picker_window<'w>(context: &'w Context, date_format: &'w str) -> impl Widget + 'w {
    let theme = context.theme();
    let index = context.visible();

    let title = format!("{} {}", index.month.name(), index.year);

    let status = match context.selector().state() {
        SelectorState::PickingStart => {
            if context.selector().single_day() {
                "pick a day".to_owned()
            } else {
                "pick a start date".to_owned()
            }
        }
        SelectorState::PickingEnd { anchor } => {
            format!("pick an end date (start {})", anchor.format(date_format))
        }
        SelectorState::Closed => String::new(),
    };

    let mut layout = VLayout::new()
        .widget(Line::new(title, theme.month_header_style))
        .widget(MonthPane::new(index, context))
        .widget(Line::new(status, theme.hint_style))
        .widget(Line::new(HINTS.to_owned(), theme.hint_style));

    if let Some(message) = &context.last_error_message {
        layout = layout.widget(Line::new(message.clone(), theme.notice_style));
    }

    layout
}
