use core::fmt::Write;
use minegrid_core::*;

/// `MM:SS`, minutes keep growing past an hour.
pub(crate) fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn glyph(view: CellView) -> char {
    use CellView::*;
    match view {
        Covered => '#',
        Blank => '.',
        Number(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        Mine => '*',
        Exploded => '@',
        Flag => 'F',
        IncorrectFlag => 'x',
    }
}

/// Status line, flag mode indicator and the grid with row/column labels.
pub(crate) fn draw(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let (rows, cols) = snapshot.size;

    let _ = writeln!(
        out,
        "⏱ {}   🚩 {} / {}",
        format_clock(snapshot.elapsed_secs),
        snapshot.flags_placed,
        snapshot.mine_count
    );
    let _ = writeln!(
        out,
        "{}",
        if snapshot.flag_mode {
            "flag mode: ON (r places flags)"
        } else {
            "flag mode: off"
        }
    );

    out.push_str("   ");
    for col in 0..cols {
        let _ = write!(out, "{:>3}", col);
    }
    out.push('\n');

    for row in 0..rows {
        let _ = write!(out, "{:>3}", row);
        for col in 0..cols {
            let view = snapshot.cell((row, col)).unwrap_or_default();
            let _ = write!(out, "{:>3}", glyph(view));
        }
        out.push('\n');
    }
    out
}

/// Message shown once the game is over.
pub(crate) fn end_message(summary: &GameSummary) -> String {
    let time = format_clock(summary.elapsed_secs);
    if summary.won {
        format!(
            "You cleared the grid in {}! You flagged {} mines correctly.",
            time, summary.correct_flags
        )
    } else {
        format!(
            "Boom, better luck next time. Time: {}. You flagged {} mines correctly.",
            time, summary.correct_flags
        )
    }
}
