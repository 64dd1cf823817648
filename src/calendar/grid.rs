use super::date::CalendarDate;

pub const WEEKS: usize = 6;
pub const DAYS_PER_WEEK: usize = 7;
pub const CELLS: usize = WEEKS * DAYS_PER_WEEK;

/// A 6x7 month grid with a Monday-first week layout. The grid covers the
/// whole view month plus leading/trailing days from the adjacent months,
/// always exactly 42 consecutive calendar days. Cell (0, 0) is the Monday
/// on or before the 1st of the view month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    cells: [CalendarDate; CELLS],
}

impl MonthGrid {
    /// Builds the grid for the month containing `view`; the day of month
    /// is ignored.
    pub fn new(view: CalendarDate) -> Self {
        let first = view.start_of_month();
        let mut day = first.add_days(-(first.weekday_from_monday() as i64));

        let mut cells = [first; CELLS];
        for cell in cells.iter_mut() {
            *cell = day;
            day = day.succ();
        }

        MonthGrid {
            year: first.year(),
            month: first.month(),
            cells,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn cells(&self) -> &[CalendarDate] {
        &self.cells
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDate]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn first(&self) -> CalendarDate {
        self.cells[0]
    }

    pub fn last(&self) -> CalendarDate {
        self.cells[CELLS - 1]
    }

    /// Whether a cell belongs to the view month, as opposed to the
    /// leading/trailing fill. Presentation uses this for dimming.
    pub fn in_view_month(&self, date: &CalendarDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}
