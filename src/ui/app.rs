use unsegen::base::Terminal;
use unsegen::input::{Event as InputEvent, Key};
use unsegen::widget::*;

use crate::cmds::{Cmd, CmdError, CmdResult};
use crate::config::Config;
use crate::events::{Dispatcher, Event};
use crate::range::DateRange;
use crate::selection::ClickOutcome;

use super::picker_window::picker_window;
use super::util::Line;
use super::Context;

/// Invoked once per commit with the range bounds as ISO calendar-date
/// strings, or with two empty strings when the range is cleared.
pub type ChangeCallback<'a> = Box<dyn FnMut(&str, &str) + 'a>;

/// The host view. Owns the committed range (through its [`Context`]) and
/// forwards every change to the callback.
pub struct App<'a> {
    config: &'a Config,
    context: Context,
    on_change: ChangeCallback<'a>,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, on_change: ChangeCallback<'a>) -> App<'a> {
        App {
            config,
            context: Context::new(config),
            on_change,
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    fn map_key(&self, key: Key) -> Option<Cmd> {
        if self.context.picker_open() {
            match key {
                Key::Char('\n') => Some(Cmd::ClickDay),
                Key::Char('h') | Key::Left => Some(Cmd::PrevDay),
                Key::Char('l') | Key::Right => Some(Cmd::NextDay),
                Key::Char('k') | Key::Up => Some(Cmd::PrevWeek),
                Key::Char('j') | Key::Down => Some(Cmd::NextWeek),
                Key::Char('[') => Some(Cmd::PrevMonth),
                Key::Char(']') => Some(Cmd::NextMonth),
                Key::Char('a') => Some(Cmd::ApplySpan),
                Key::Char('x') => Some(Cmd::Clear),
                // any way of leaving the picker dismisses the draft
                Key::Esc | Key::Char('q') => Some(Cmd::Cancel),
                _ => None,
            }
        } else {
            match key {
                Key::Char('\n') | Key::Char('o') => Some(Cmd::OpenPicker),
                Key::Char('x') => Some(Cmd::Clear),
                Key::Char('q') => Some(Cmd::Exit),
                _ => None,
            }
        }
    }

    pub fn send_cmd(&mut self, cmd: &Cmd) -> CmdResult {
        match cmd {
            Cmd::Noop => Ok(Cmd::Noop),
            Cmd::Exit => Ok(Cmd::Exit),
            Cmd::OpenPicker => {
                if self.context.picker_open() {
                    return Err(CmdError::new("picker is already open"));
                }
                self.context.open_picker();
                Ok(Cmd::Noop)
            }
            Cmd::Cancel => {
                self.context.dismiss_picker();
                Ok(Cmd::Noop)
            }
            Cmd::Clear => {
                self.context.dismiss_picker();
                self.context.clear_committed();
                log::info!("range cleared");
                (self.on_change)("", "");
                Ok(Cmd::Noop)
            }
            Cmd::ClickDay => {
                if !self.context.picker_open() {
                    return Err(CmdError::new("picker is not open"));
                }
                match self.context.click_cursor() {
                    ClickOutcome::Ignored => {}
                    ClickOutcome::Anchored(_) => self.context.last_error_message = None,
                    ClickOutcome::Committed(range) => self.commit(range),
                    ClickOutcome::RejectedSpan { span, max_span } => {
                        self.context.last_error_message = Some(format!(
                            "a span of {} days exceeds the maximum of {} days",
                            span, max_span
                        ));
                    }
                }
                Ok(Cmd::Noop)
            }
            Cmd::ApplySpan => {
                if !self.context.picker_open() {
                    return Err(CmdError::new("picker is not open"));
                }
                if let Some(range) = self.context.apply_default_span() {
                    self.commit(range);
                }
                Ok(Cmd::Noop)
            }
            Cmd::NextDay => self.move_cursor(1),
            Cmd::PrevDay => self.move_cursor(-1),
            Cmd::NextWeek => self.move_cursor(7),
            Cmd::PrevWeek => self.move_cursor(-7),
            Cmd::NextMonth => {
                if !self.context.picker_open() {
                    return Err(CmdError::new("picker is not open"));
                }
                self.context.next_month();
                Ok(Cmd::Noop)
            }
            Cmd::PrevMonth => {
                if !self.context.picker_open() {
                    return Err(CmdError::new("picker is not open"));
                }
                self.context.prev_month();
                Ok(Cmd::Noop)
            }
        }
    }

    fn move_cursor(&mut self, days: i64) -> CmdResult {
        if !self.context.picker_open() {
            return Err(CmdError::new("picker is not open"));
        }
        self.context.move_cursor(days);
        Ok(Cmd::Noop)
    }

    fn commit(&mut self, range: DateRange) {
        let (start, end) = range.to_iso_pair();
        log::info!("range committed: {} – {}", start, end);
        self.context.set_committed(range);
        self.context.last_error_message = None;
        (self.on_change)(&start, &end);
    }

    fn trigger_line(&self) -> Line {
        Line::new(
            format!(
                " range: {} ",
                self.context.trigger_label(&self.config.date_format)
            ),
            self.context.theme().trigger_style,
        )
    }

    fn hint_line(&self) -> Line {
        Line::new(
            "[enter] open picker  [x] clear  [q] quit".to_owned(),
            self.context.theme().hint_style,
        )
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w
    where
        'a: 'w,
    {
        let mut layout = VLayout::new().widget(self.trigger_line());

        if self.context.picker_open() {
            layout = layout.widget(picker_window(&self.context, &self.config.date_format));
        } else {
            layout = layout.widget(self.hint_line());
        }

        layout
    }

    pub fn render(&self, term: &mut Terminal) {
        let root = term.create_root_window();
        self.as_widget().draw(root, RenderingHints::default());
        term.present();
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut run = true;

        while run {
            match dispatcher.next() {
                Ok(Event::Update) => self.context.update(),
                Ok(Event::Input(input)) => {
                    if let InputEvent::Key(key) = input.event {
                        if let Some(cmd) = self.map_key(key) {
                            match self.send_cmd(&cmd) {
                                Ok(Cmd::Exit) => run = false,
                                Ok(_) => {}
                                Err(err) => log::debug!("{}", err),
                            }
                        }
                    }
                }
                Err(_) => run = false,
            }

            self.render(&mut term);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    use chrono::{Duration, Local};

    use crate::calendar::MonthIndex;

    fn recording_app<'a>(
        config: &'a Config,
        changes: &'a RefCell<Vec<(String, String)>>,
    ) -> App<'a> {
        App::new(
            config,
            Box::new(move |start, end| {
                changes
                    .borrow_mut()
                    .push((start.to_owned(), end.to_owned()));
            }),
        )
    }

    fn iso(days_before_today: i64) -> String {
        (Local::now().date_naive() - Duration::days(days_before_today))
            .format("%Y-%m-%d")
            .to_string()
    }

    #[test]
    fn opening_resets_the_visible_month_to_today() {
        let config = Config::default();
        let changes = RefCell::new(Vec::new());
        let mut app = recording_app(&config, &changes);

        app.send_cmd(&Cmd::OpenPicker).unwrap();
        // wander off and reopen
        app.send_cmd(&Cmd::PrevMonth).unwrap();
        app.send_cmd(&Cmd::PrevMonth).unwrap();
        app.send_cmd(&Cmd::Cancel).unwrap();
        app.send_cmd(&Cmd::OpenPicker).unwrap();

        assert!(app.context().picker_open());
        assert_eq!(app.context().visible(), MonthIndex::default());
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn two_clicks_commit_and_notify_once() {
        let config = Config::default();
        let changes = RefCell::new(Vec::new());
        let mut app = recording_app(&config, &changes);

        app.send_cmd(&Cmd::OpenPicker).unwrap();
        // anchor on yesterday, end three days earlier, committed swapped
        app.send_cmd(&Cmd::ClickDay).unwrap();
        app.send_cmd(&Cmd::PrevDay).unwrap();
        app.send_cmd(&Cmd::PrevDay).unwrap();
        app.send_cmd(&Cmd::PrevDay).unwrap();
        app.send_cmd(&Cmd::ClickDay).unwrap();

        assert!(!app.context().picker_open());
        assert_eq!(changes.borrow().len(), 1);
        assert_eq!(changes.borrow()[0], (iso(4), iso(1)));

        let committed = app.context().committed().unwrap();
        assert_eq!(committed.span_days(), 4);
    }

    #[test]
    fn out_of_span_click_shows_a_notice_and_keeps_the_session() {
        let config = Config::default();
        let changes = RefCell::new(Vec::new());
        let mut app = recording_app(&config, &changes);

        app.send_cmd(&Cmd::OpenPicker).unwrap();
        app.send_cmd(&Cmd::PrevWeek).unwrap();
        app.send_cmd(&Cmd::PrevWeek).unwrap();
        app.send_cmd(&Cmd::ClickDay).unwrap(); // anchor 15 days back
        app.send_cmd(&Cmd::NextWeek).unwrap();
        app.send_cmd(&Cmd::NextWeek).unwrap(); // 14 days forward, span 15
        app.send_cmd(&Cmd::ClickDay).unwrap();

        assert!(app.context().picker_open());
        assert!(app.context().last_error_message.is_some());
        assert!(changes.borrow().is_empty());

        // moving the cursor clears the notice
        app.send_cmd(&Cmd::PrevDay).unwrap();
        assert!(app.context().last_error_message.is_none());
    }

    #[test]
    fn cancel_preserves_the_committed_range() {
        let config = Config::default();
        let changes = RefCell::new(Vec::new());
        let mut app = recording_app(&config, &changes);

        app.send_cmd(&Cmd::OpenPicker).unwrap();
        app.send_cmd(&Cmd::ClickDay).unwrap();
        app.send_cmd(&Cmd::ClickDay).unwrap(); // single day commit
        let committed = *app.context().committed().unwrap();

        app.send_cmd(&Cmd::OpenPicker).unwrap();
        app.send_cmd(&Cmd::ClickDay).unwrap(); // new anchor
        app.send_cmd(&Cmd::Cancel).unwrap();

        assert!(!app.context().picker_open());
        assert_eq!(app.context().committed(), Some(&committed));
        assert_eq!(changes.borrow().len(), 1);
    }

    #[test]
    fn clear_notifies_with_empty_bounds() {
        let config = Config::default();
        let changes = RefCell::new(Vec::new());
        let mut app = recording_app(&config, &changes);

        app.send_cmd(&Cmd::OpenPicker).unwrap();
        app.send_cmd(&Cmd::ClickDay).unwrap();
        app.send_cmd(&Cmd::ClickDay).unwrap();
        app.send_cmd(&Cmd::Clear).unwrap();

        assert_eq!(app.context().committed(), None);
        assert_eq!(
            changes.borrow().last(),
            Some(&(String::new(), String::new()))
        );
    }

    #[test]
    fn default_span_commits_from_the_anchor() {
        let config = Config::default();
        let changes = RefCell::new(Vec::new());
        let mut app = recording_app(&config, &changes);

        app.send_cmd(&Cmd::OpenPicker).unwrap();
        app.send_cmd(&Cmd::PrevWeek).unwrap();
        app.send_cmd(&Cmd::ClickDay).unwrap(); // anchor 8 days back
        app.send_cmd(&Cmd::ApplySpan).unwrap();

        assert!(!app.context().picker_open());
        assert_eq!(changes.borrow().len(), 1);
        assert_eq!(changes.borrow()[0], (iso(8), iso(2)));
        assert_eq!(app.context().committed().unwrap().span_days(), 7);
    }

    #[test]
    fn picker_commands_require_an_open_session() {
        let config = Config::default();
        let changes = RefCell::new(Vec::new());
        let mut app = recording_app(&config, &changes);

        assert!(app.send_cmd(&Cmd::ClickDay).is_err());
        assert!(app.send_cmd(&Cmd::NextDay).is_err());
        assert!(app.send_cmd(&Cmd::NextMonth).is_err());
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn trigger_label_shows_a_placeholder_until_a_commit() {
        let config = Config::default();
        let changes = RefCell::new(Vec::new());
        let mut app = recording_app(&config, &changes);

        assert_eq!(
            app.context().trigger_label(&config.date_format),
            "no range selected"
        );

        app.send_cmd(&Cmd::OpenPicker).unwrap();
        app.send_cmd(&Cmd::ClickDay).unwrap();
        app.send_cmd(&Cmd::ClickDay).unwrap();

        let label = app.context().trigger_label(&config.date_format);
        assert!(!label.contains('–'));
        assert_ne!(label, "no range selected");
    }
}
