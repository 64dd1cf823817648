use super::date::{parse_iso_date, CalendarDate};
use super::grid::MonthGrid;
use crate::cmds::Cmd;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    Closed,
    Open,
}

/// What a handled command amounts to. A date is emitted exactly once per
/// pick; closing without picking leaves the caller's selection unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    Pending,
    Picked(String),
    Cancelled,
}

/// The date picker state machine. Owns no persistent state: the view month
/// and cursor are re-derived from the caller-supplied selected value every
/// time the picker opens, and the grid is recomputed on demand.
pub struct DatePicker {
    state: PickerState,
    view: CalendarDate,
    cursor: CalendarDate,
    today: CalendarDate,
}

impl DatePicker {
    pub fn new(selected: Option<&str>) -> Self {
        Self::with_today(selected, CalendarDate::today())
    }

    /// Like `new` with an explicit "today", so behaviour around the
    /// current date is deterministic under test.
    pub fn with_today(selected: Option<&str>, today: CalendarDate) -> Self {
        let cursor = selected.and_then(parse_iso_date).unwrap_or(today);

        DatePicker {
            state: PickerState::Closed,
            view: cursor.start_of_month(),
            cursor,
            today,
        }
    }

    /// Transitions to `Open`, re-deriving view month and cursor from the
    /// selected value. A missing or malformed value falls back to today;
    /// this is the only place invalid input can show up and it is absorbed
    /// here, never raised.
    pub fn open(&mut self, selected: Option<&str>) {
        self.cursor = selected.and_then(parse_iso_date).unwrap_or(self.today);
        self.view = self.cursor.start_of_month();
        self.state = PickerState::Open;
    }

    pub fn is_open(&self) -> bool {
        self.state == PickerState::Open
    }

    pub fn view(&self) -> CalendarDate {
        self.view
    }

    pub fn cursor(&self) -> CalendarDate {
        self.cursor
    }

    pub fn today(&self) -> CalendarDate {
        self.today
    }

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::new(self.view)
    }

    pub fn handle(&mut self, cmd: Cmd) -> PickerOutcome {
        if self.state == PickerState::Closed {
            return PickerOutcome::Pending;
        }

        match cmd {
            Cmd::Noop => PickerOutcome::Pending,
            Cmd::NextDay => self.move_cursor(1),
            Cmd::PrevDay => self.move_cursor(-1),
            Cmd::NextWeek => self.move_cursor(7),
            Cmd::PrevWeek => self.move_cursor(-7),
            Cmd::NextMonth => self.move_month(1),
            Cmd::PrevMonth => self.move_month(-1),
            Cmd::Today => self.pick(self.today),
            Cmd::Select => self.pick(self.cursor),
            Cmd::Exit => {
                self.state = PickerState::Closed;
                PickerOutcome::Cancelled
            }
        }
    }

    fn move_cursor(&mut self, days: i64) -> PickerOutcome {
        self.cursor = self.cursor.add_days(days);
        self.view = self.cursor.start_of_month();
        PickerOutcome::Pending
    }

    fn move_month(&mut self, delta: i32) -> PickerOutcome {
        self.cursor = self.cursor.add_months(delta);
        self.view = self.cursor.start_of_month();
        PickerOutcome::Pending
    }

    fn pick(&mut self, date: CalendarDate) -> PickerOutcome {
        self.state = PickerState::Closed;
        PickerOutcome::Picked(date.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        parse_iso_date(s).expect(s)
    }

    #[test]
    fn opens_on_selected_month() {
        let mut picker = DatePicker::with_today(None, date("2026-03-15"));
        picker.open(Some("2026-01-04"));

        assert!(picker.is_open());
        assert_eq!(picker.view(), date("2026-01-01"));
        assert_eq!(picker.cursor(), date("2026-01-04"));
    }

    #[test]
    fn malformed_selection_falls_back_to_today() {
        let today = date("2026-03-15");

        for selected in &[None, Some("2026-1-4"), Some("not a date"), Some("2026-02-30")] {
            let mut picker = DatePicker::with_today(*selected, today);
            picker.open(*selected);

            assert_eq!(picker.view(), today.start_of_month());
            assert_eq!(picker.cursor(), today);
        }
    }

    #[test]
    fn picking_emits_iso_and_closes() {
        let mut picker = DatePicker::with_today(Some("2026-01-04"), date("2026-03-15"));
        picker.open(Some("2026-01-04"));

        assert_eq!(picker.handle(Cmd::NextDay), PickerOutcome::Pending);
        assert_eq!(
            picker.handle(Cmd::Select),
            PickerOutcome::Picked("2026-01-05".to_owned())
        );
        assert!(!picker.is_open());
    }

    #[test]
    fn jump_to_today_picks_today() {
        let mut picker = DatePicker::with_today(Some("2026-01-04"), date("2026-03-15"));
        picker.open(Some("2026-01-04"));

        assert_eq!(
            picker.handle(Cmd::Today),
            PickerOutcome::Picked("2026-03-15".to_owned())
        );
        assert!(!picker.is_open());
    }

    #[test]
    fn month_navigation_clamps_cursor() {
        let mut picker = DatePicker::with_today(Some("2025-01-31"), date("2025-01-31"));
        picker.open(Some("2025-01-31"));

        picker.handle(Cmd::NextMonth);
        assert_eq!(picker.cursor(), date("2025-02-28"));
        assert_eq!(picker.view(), date("2025-02-01"));

        picker.handle(Cmd::PrevMonth);
        assert_eq!(picker.cursor(), date("2025-01-28"));
    }

    #[test]
    fn cursor_drags_view_across_month_boundaries() {
        let mut picker = DatePicker::with_today(Some("2026-01-01"), date("2026-01-01"));
        picker.open(Some("2026-01-01"));

        picker.handle(Cmd::PrevDay);
        assert_eq!(picker.cursor(), date("2025-12-31"));
        assert_eq!(picker.view(), date("2025-12-01"));

        picker.handle(Cmd::NextWeek);
        assert_eq!(picker.cursor(), date("2026-01-07"));
        assert_eq!(picker.view(), date("2026-01-01"));
    }

    #[test]
    fn closing_emits_nothing() {
        let mut picker = DatePicker::with_today(Some("2026-01-04"), date("2026-03-15"));
        picker.open(Some("2026-01-04"));

        assert_eq!(picker.handle(Cmd::Exit), PickerOutcome::Cancelled);
        assert!(!picker.is_open());

        // Commands are ignored while closed.
        assert_eq!(picker.handle(Cmd::Select), PickerOutcome::Pending);
    }

    #[test]
    fn reopening_tracks_new_selection() {
        let mut picker = DatePicker::with_today(Some("2026-01-04"), date("2026-03-15"));
        picker.open(Some("2026-01-04"));
        picker.handle(Cmd::Exit);

        picker.open(Some("2027-06-20"));
        assert_eq!(picker.view(), date("2027-06-01"));
    }
}
