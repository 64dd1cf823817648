use itertools::Itertools;
use std::io::{self, Write};

use termion::{clear, color, cursor, style};

use crate::calendar::picker::DatePicker;
use crate::calendar::{month_name, weekday_name, Locale, MonthGrid};

const CELL_WIDTH: usize = 4;
const GRID_WIDTH: usize = 7 * CELL_WIDTH;

/// Draws the open picker into a raw-mode alternate screen. The cursor day
/// is inverted, today carries a marker, and days outside the view month
/// are dimmed; all 42 cells are always drawn.
pub fn draw_picker<W: Write>(w: &mut W, picker: &DatePicker, locale: Locale) -> io::Result<()> {
    let grid = picker.grid();

    write!(w, "{}{}", clear::All, cursor::Goto(1, 1))?;

    let title = format!("{} {}", month_name(grid.month(), locale), grid.year());
    write!(w, "{:^width$}", title, width = GRID_WIDTH)?;

    write!(w, "{}", cursor::Goto(1, 2))?;
    let header = (0..7)
        .map(|i| format!("{:<width$}", weekday_name(i, locale), width = CELL_WIDTH))
        .join("");
    write!(w, "{}{}{}", style::Bold, header, style::Reset)?;

    for (row, week) in grid.weeks().enumerate() {
        write!(w, "{}", cursor::Goto(1, 3 + row as u16))?;

        for day in week {
            let marker = if *day == picker.today() { '*' } else { ' ' };
            let label = format!("{:>2}{} ", day.day(), marker);

            if *day == picker.cursor() {
                write!(w, "{}{}{}", style::Invert, label, style::Reset)?;
            } else if !grid.in_view_month(day) {
                write!(
                    w,
                    "{}{}{}",
                    color::Fg(color::LightBlack),
                    label,
                    color::Fg(color::Reset)
                )?;
            } else {
                write!(w, "{}", label)?;
            }
        }
    }

    write!(w, "{}", cursor::Goto(1, 10))?;
    write!(
        w,
        "{}h/j/k/l move  p/n month  t today  enter pick  q quit{}",
        color::Fg(color::LightBlack),
        color::Fg(color::Reset)
    )?;

    w.flush()
}

/// Plain month grid for non-interactive output; no escape codes beyond
/// what println would emit.
pub fn print_month<W: Write>(w: &mut W, grid: &MonthGrid, locale: Locale) -> io::Result<()> {
    let title = format!("{} {}", month_name(grid.month(), locale), grid.year());
    writeln!(w, "{:^width$}", title, width = GRID_WIDTH)?;

    let header = (0..7)
        .map(|i| format!("{:<width$}", weekday_name(i, locale), width = CELL_WIDTH))
        .join("");
    writeln!(w, "{}", header.trim_end())?;

    for week in grid.weeks() {
        let line = week
            .iter()
            .map(|day| {
                if grid.in_view_month(day) {
                    format!("{:>2}  ", day.day())
                } else {
                    "    ".to_owned()
                }
            })
            .join("");
        writeln!(w, "{}", line.trim_end())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::parse_iso_date;

    #[test]
    fn plain_month_print() {
        let grid = MonthGrid::new(parse_iso_date("2026-01-15").unwrap());

        let mut out = Vec::new();
        print_month(&mut out, &grid, Locale::En).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        // Title, weekday header, six week rows.
        assert_eq!(lines.len(), 8);
        assert!(lines[0].contains("January 2026"));
        assert!(lines[1].starts_with("Mon"));
        // The 1st is a Thursday, so the first row starts with three
        // blanked-out fill days.
        assert!(lines[2].trim_start().starts_with("1"));
        // The last week is all February fill, so it renders blank.
        assert!(lines[7].trim_end().is_empty());
    }
}
