use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Cell, Row};

use crate::roster::RosterStore;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Flatten a chained error into a single status-line message, outermost
/// context first.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

/// Plain cell values for the roster table: one row per recorded grade, or a
/// single row with `-` placeholders for a student without grades. The second
/// element of each tuple is the student's position in roster order.
pub(crate) fn roster_cells(roster: &RosterStore) -> Vec<([String; 5], usize)> {
    let mut rows = Vec::new();
    for (position, student) in roster.students().enumerate() {
        let id = student.id().to_string();
        let name = student.name().to_string();
        let gpa = format!("{:.2}", student.gpa());

        if student.grades().is_empty() {
            rows.push((
                [id, name, gpa, "-".to_string(), "-".to_string()],
                position,
            ));
            continue;
        }

        for (code, score) in student.grades() {
            rows.push((
                [
                    id.clone(),
                    name.clone(),
                    gpa.clone(),
                    code.clone(),
                    format!("{score:.1}"),
                ],
                position,
            ));
        }
    }
    rows
}

/// Style the table rows, highlighting every row belonging to the selected
/// student. Returns the rows plus the index of the selected student's first
/// row.
pub(crate) fn build_roster_rows(
    roster: &RosterStore,
    selected: usize,
) -> (Vec<Row<'static>>, Option<usize>) {
    let mut first_selected = None;
    let rows = roster_cells(roster)
        .into_iter()
        .enumerate()
        .map(|(row_idx, (cells, position))| {
            let style = if position == selected {
                if first_selected.is_none() {
                    first_selected = Some(row_idx);
                }
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(cells.into_iter().map(Cell::from)).style(style)
        })
        .collect();
    (rows, first_selected)
}
