//! Plain-text rendering of core view data.

use positions_core::{BoardChip, CalendarGrid, DayPick, NumberStatus, ProgressSummary};
use std::fmt::Write;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CELL_WIDTH: usize = 9;
const BOARD_COLUMNS: usize = 15;

pub fn calendar(grid: &CalendarGrid) -> String {
    let mut out = format!("{}\n", grid.label);
    for name in WEEKDAYS {
        let _ = write!(out, "{name:<CELL_WIDTH$}");
    }
    out.push('\n');

    let mut column = 0;
    for _ in 0..grid.leading_blanks {
        let _ = write!(out, "{:<CELL_WIDTH$}", "");
        column += 1;
    }
    for cell in &grid.cells {
        let marker = if cell.is_today { "*" } else { "" };
        let text = match cell.pick {
            DayPick::Picked(number) => format!("{}{marker} #{number}", cell.day),
            DayPick::Available => format!("{}{marker}", cell.day),
        };
        let _ = write!(out, "{text:<CELL_WIDTH$}");
        column += 1;
        if column % 7 == 0 {
            out.push('\n');
        }
    }
    if column % 7 != 0 {
        out.push('\n');
    }
    out
}

pub fn board(chips: &[BoardChip]) -> String {
    let mut out = String::new();
    for row in chips.chunks(BOARD_COLUMNS) {
        let line: Vec<String> = row
            .iter()
            .map(|chip| {
                if chip.is_disabled() {
                    format!("[{:>3}]", chip.number)
                } else {
                    format!(" {:>3} ", chip.number)
                }
            })
            .collect();
        out.push_str(line.join(" ").trim_end());
        out.push('\n');
    }
    let _ = writeln!(out, "{} number(s); [n] = used", chips.len());
    out
}

pub fn status(progress: &ProgressSummary) -> String {
    let mut out = format!(
        "Picks: {}\nRemaining: {}\n",
        progress.picks, progress.remaining
    );
    match progress.last_pick {
        Some(entry) => {
            let _ = writeln!(out, "Last picked: {} -> #{}", entry.date_iso(), entry.number);
        }
        None => out.push_str("Last picked: -\n"),
    }
    if progress.used.is_empty() {
        out.push_str("No picks yet.\n");
    } else {
        for entry in &progress.used {
            let _ = writeln!(out, "#{:03} ({})", entry.number, entry.date_iso());
        }
    }
    out
}

pub fn hint(status: &NumberStatus) -> String {
    status
        .hint()
        .unwrap_or_else(|| "Enter a number to check.".to_string())
}
