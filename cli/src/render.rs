use sapper_core::{CellValue, CellView, GameStatus, Snapshot};

/// Terminal symbol for a cell as the player sees it.
pub(crate) fn glyph(view: CellView, triggered: bool) -> char {
    match view {
        CellView::Hidden => '#',
        CellView::Flagged => 'F',
        CellView::Opened(CellValue::Mine) if triggered => 'X',
        CellView::Opened(CellValue::Mine) => '*',
        CellView::Opened(CellValue::Count(0)) => '.',
        CellView::Opened(CellValue::Count(count)) => {
            char::from_digit(count.into(), 10).unwrap_or('?')
        }
    }
}

pub(crate) fn status_line(snapshot: &Snapshot) -> String {
    let message = match snapshot.status {
        GameStatus::InProgress => "",
        GameStatus::Won => "  You win! Type `new` to play again",
        GameStatus::Lost => "  You lose! Type `new` to play again",
    };
    format!("Mines left: {}{}", snapshot.mines_left, message)
}

/// The grid with column and row labels, then the status line.
pub(crate) fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let topology = snapshot.topology();

    out.push_str("   ");
    for col in 0..snapshot.width {
        out.push_str(&format!(" {}", col % 10));
    }
    out.push('\n');

    for (row, cells) in snapshot.rows().enumerate() {
        out.push_str(&format!("{:>3}", row));
        for (col, view) in cells.enumerate() {
            let index = row * usize::from(topology.width()) + col;
            out.push(' ');
            out.push(glyph(view, snapshot.triggered_mine == Some(index)));
        }
        out.push('\n');
    }

    out.push_str(&status_line(snapshot));
    out.push('\n');
    out
}
