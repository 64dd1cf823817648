mod date;
mod grid;
mod locale;
pub mod picker;

pub use date::{
    days_in_month, is_leap_year, is_valid_iso_date, monday_first_index, parse_iso_date,
    CalendarDate,
};
pub use grid::{MonthGrid, CELLS, DAYS_PER_WEEK, WEEKS};
pub use locale::{month_name, weekday_name, Locale};
