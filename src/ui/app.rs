use std::mem;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

use anyhow::Result;

use crate::config::Config;
use crate::models::Student;
use crate::roster::RosterStore;
use crate::storage::{load_roster, save_roster, RosterLoad};

use super::forms::{ConfirmRemove, FormAction, InputForm, SearchKind};
use super::helpers::{build_roster_rows, centered_rect, surface_error};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height of the analytics summary panel under the roster table.
const SUMMARY_HEIGHT: u16 = 7;
/// Oldest summary lines are dropped past this many entries.
const SUMMARY_CAPACITY: usize = 50;

/// Fine-grained modes layered over the roster view.
enum Mode {
    Normal,
    Editing(InputForm),
    ConfirmRemove(ConfirmRemove),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. The roster is owned here;
/// every key press runs to completion before the next frame is drawn.
pub struct App {
    config: Config,
    roster: RosterStore,
    selected: usize,
    mode: Mode,
    status: Option<StatusMessage>,
    summary: Vec<String>,
}

impl App {
    pub fn new(config: Config, roster: RosterStore, load: RosterLoad) -> Self {
        let mut app = Self {
            config,
            roster,
            selected: 0,
            mode: Mode::Normal,
            status: None,
            summary: Vec::new(),
        };
        app.announce_load(&load);
        app
    }

    pub fn roster(&self) -> &RosterStore {
        &self.roster
    }

    /// Currently highlighted student, if the roster is not empty.
    pub fn selected_student(&self) -> Option<&Student> {
        self.roster.students().nth(self.selected)
    }

    /// Summary lines, oldest first.
    pub fn summary(&self) -> &[String] {
        &self.summary
    }

    /// Text of the footer status line, if any.
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    /// Route a key press to the active mode. Returns `true` when the user asked
    /// to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::Editing(form) => self.handle_form(code, form),
            Mode::ConfirmRemove(confirm) => self.handle_confirm_remove(code, confirm),
        };

        exit
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.roster.len().saturating_sub(1),
            KeyCode::Char('a') => return Mode::Editing(InputForm::add_student()),
            KeyCode::Char('e') => match self.selected_student() {
                Some(student) => return Mode::Editing(InputForm::rename(student)),
                None => self.set_status("No student selected.", StatusKind::Error),
            },
            KeyCode::Char('g') => {
                return Mode::Editing(InputForm::update_gpa(self.selected_student()))
            }
            KeyCode::Char('r') => {
                return Mode::Editing(InputForm::add_result(self.selected_student()))
            }
            KeyCode::Char('d') => match self.selected_student() {
                Some(student) => return Mode::ConfirmRemove(ConfirmRemove::from(student)),
                None => self.set_status("No student selected.", StatusKind::Error),
            },
            KeyCode::Char('/') => return Mode::Editing(InputForm::search(SearchKind::Linear)),
            KeyCode::Char('b') => return Mode::Editing(InputForm::search(SearchKind::Binary)),
            KeyCode::Char('n') => {
                self.sort_keeping_focus(RosterStore::sort_by_name);
                self.set_status("Sorted by name.", StatusKind::Info);
            }
            KeyCode::Char('p') => {
                self.sort_keeping_focus(RosterStore::sort_by_gpa_descending);
                self.set_status("Sorted by GPA, highest first.", StatusKind::Info);
            }
            KeyCode::Char('i') => {
                self.sort_keeping_focus(RosterStore::sort_by_id_ascending);
                self.set_status("Sorted by ID.", StatusKind::Info);
            }
            KeyCode::Char('c') => return Mode::Editing(InputForm::class_average()),
            KeyCode::Char('t') => {
                let top = self.roster.top_performer_by_gpa().map(ToString::to_string);
                self.report_top_performer("GPA", top);
            }
            KeyCode::Char('T') => {
                let top = self
                    .roster
                    .top_performer_by_average_score()
                    .map(ToString::to_string);
                self.report_top_performer("average score", top);
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_form(&mut self, code: KeyCode, mut form: InputForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status(format!("{} cancelled.", form.title()), StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.submit(&form) {
                Ok(()) => return Mode::Normal,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::Editing(form)
    }

    fn handle_confirm_remove(&mut self, code: KeyCode, confirm: ConfirmRemove) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Removal cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.roster.remove(&confirm.id);
                self.clamp_selection();
                self.set_status(format!("Removed {}.", confirm.display), StatusKind::Info);
                self.push_summary(format!("Removed student {}", confirm.id));
                Mode::Normal
            }
            _ => Mode::ConfirmRemove(confirm),
        }
    }

    /// Apply a submitted form to the roster. Errors leave the form open.
    fn submit(&mut self, form: &InputForm) -> Result<()> {
        match form.action {
            FormAction::AddStudent => {
                let id = form.text("ID")?;
                let name = form.text("Name")?;
                let gpa = form.decimal("GPA")?;
                self.roster.add_by_fields(id.as_str(), name.as_str(), gpa)?;
                self.focus(&id);
                self.set_status(format!("Student added: {name}"), StatusKind::Info);
                self.push_summary(format!("Added student: {name} (ID: {id}, GPA: {gpa:.2})"));
            }
            FormAction::Rename => {
                let id = form.text("ID")?;
                let name = form.text("Name")?;
                self.roster.rename(&id, name.as_str())?;
                self.set_status(format!("Renamed {id} to {name}."), StatusKind::Info);
            }
            FormAction::UpdateGpa => {
                let id = form.text("ID")?;
                let gpa = form.decimal("New GPA")?;
                self.roster.update_gpa(&id, gpa)?;
                self.focus(&id);
                self.set_status(format!("GPA updated for student {id}."), StatusKind::Info);
                self.push_summary(format!("Updated GPA for student {id} to {gpa:.2}"));
            }
            FormAction::AddResult => {
                let (id, course, score) = form.parse_result()?;
                self.roster.record_course_result(&id, &course, score)?;
                self.focus(&id);
                self.set_status(
                    format!("Recorded {} for student {id}.", course.code),
                    StatusKind::Info,
                );
                self.push_summary(format!("{id}: {} = {score:.1}", course.code));
            }
            FormAction::ClassAverage => {
                let code = form.text("Course Code")?;
                let average = self.roster.class_average(&code)?;
                self.set_status("Class average calculated.", StatusKind::Info);
                self.push_summary(format!("Class average for {code}: {average:.2}"));
            }
            FormAction::Search(kind) => {
                let id = form.text("Student ID")?;
                self.run_search(kind, &id);
            }
        }
        Ok(())
    }

    fn run_search(&mut self, kind: SearchKind, id: &str) {
        let found = match kind {
            SearchKind::Linear => self.roster.linear_search(id).map(ToString::to_string),
            SearchKind::Binary => self.roster.binary_search(id).map(ToString::to_string),
        };

        match found {
            Some(display) => {
                self.focus(id);
                self.push_summary(format!("{} search found: {display}", kind.label()));
                self.set_status(format!("Found student {id}."), StatusKind::Info);
            }
            None => {
                self.push_summary(format!("{} search for ID {id}: no results", kind.label()));
                self.set_status(format!("No student with ID {id}."), StatusKind::Error);
            }
        }

        if kind == SearchKind::Binary {
            self.push_summary("Roster re-sorted by ID for binary search".to_string());
        }
    }

    fn report_top_performer(&mut self, metric: &str, top: Option<String>) {
        match top {
            Some(display) => {
                self.push_summary(format!("Top performer by {metric}: {display}"));
                self.set_status("Top performer identified.", StatusKind::Info);
            }
            None => self.set_status("No students available.", StatusKind::Error),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(SUMMARY_HEIGHT),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_roster(frame, chunks[0]);
        self.draw_summary(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::Editing(form) => self.draw_form(frame, area, form),
            Mode::ConfirmRemove(confirm) => self.draw_confirm_remove(frame, area, confirm),
            Mode::Normal => {}
        }
    }

    /// Save both roster files, reporting the outcome in the footer.
    pub(crate) fn handle_ctrl_s(&mut self) {
        if !matches!(self.mode, Mode::Normal) {
            return;
        }
        match save_roster(&self.roster, &self.config) {
            Ok((students, results)) => {
                self.set_status(
                    format!("Saved {students} students and {results} results."),
                    StatusKind::Info,
                );
            }
            Err(err) => {
                let message = surface_error(&err);
                warn!(error = %message, "save failed");
                self.set_status(format!("Save failed: {message}"), StatusKind::Error);
            }
        }
    }

    /// Discard in-memory changes and reload both roster files.
    pub(crate) fn handle_ctrl_o(&mut self) {
        if !matches!(self.mode, Mode::Normal) {
            return;
        }
        match load_roster(&mut self.roster, &self.config) {
            Ok(load) => {
                self.clamp_selection();
                info!(students = self.roster.len(), "roster reloaded");
                self.announce_load(&load);
            }
            Err(err) => {
                let message = surface_error(&err);
                warn!(error = %message, "reload failed");
                self.set_status(format!("Load failed: {message}"), StatusKind::Error);
            }
        }
    }

    fn draw_roster(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Roster ({} students)", self.roster.len()));

        if self.roster.is_empty() {
            let message = Paragraph::new("No students yet. Press 'a' to add one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let (rows, first_selected) = build_roster_rows(&self.roster, self.selected);
        let header = Row::new(["ID", "Student Name", "GPA", "Course", "Score"])
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(1);
        let widths = [
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Length(7),
        ];
        let table = Table::new(rows, widths).header(header).block(block);

        let mut state = TableState::default().with_selected(first_selected);
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_summary(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Summary");
        let visible = block.inner(area).height as usize;
        let start = self.summary.len().saturating_sub(visible);
        let lines: Vec<Line> = self.summary[start..]
            .iter()
            .map(|entry| Line::from(entry.clone()))
            .collect();

        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = match &self.mode {
            Mode::Editing(_) => &[
                ("[Tab]", " Next field   "),
                ("[Enter]", " Submit   "),
                ("[Esc]", " Cancel"),
            ],
            Mode::ConfirmRemove(_) => &[("[Y]", " Remove   "), ("[N/Esc]", " Keep")],
            Mode::Normal => &[
                ("[a]", " Add  "),
                ("[e]", " Rename  "),
                ("[g]", " GPA  "),
                ("[r]", " Result  "),
                ("[d]", " Remove  "),
                ("[/ b]", " Search  "),
                ("[n p i]", " Sort  "),
                ("[c]", " Average  "),
                ("[t T]", " Top  "),
                ("[^S ^O]", " Save/Load  "),
                ("[q]", " Quit"),
            ],
        };

        Line::from(
            hints
                .iter()
                .flat_map(|(key, label)| {
                    [Span::styled(*key, key_style), Span::raw(*label)]
                })
                .collect::<Vec<_>>(),
        )
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect, form: &InputForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(form.title()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = (0..form.fields.len())
            .map(|idx| form.build_line(idx))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to submit • Tab to switch fields • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        frame.set_cursor_position((
            inner.x + form.cursor_offset(),
            inner.y + form.active as u16,
        ));
    }

    fn draw_confirm_remove(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmRemove) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Removal")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Remove {}?", confirm.display)),
            Line::from("All of the student's course results are discarded too."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn announce_load(&mut self, load: &RosterLoad) {
        let students = self.roster.len();
        if load.skipped() > 0 {
            self.set_status(
                format!(
                    "Loaded {students} students; skipped {} bad records (see {}).",
                    load.skipped(),
                    self.config.log_file.display()
                ),
                StatusKind::Error,
            );
        } else {
            self.set_status(format!("Loaded {students} students."), StatusKind::Info);
        }
    }

    /// Run a reordering and keep the highlight on the same student.
    fn sort_keeping_focus(&mut self, sort: fn(&mut RosterStore)) {
        let current = self.selected_student().map(|s| s.id().to_string());
        sort(&mut self.roster);
        if let Some(id) = current {
            self.focus(&id);
        }
    }

    fn focus(&mut self, id: &str) {
        if let Some(position) = self.roster.students().position(|s| s.id() == id) {
            self.selected = position;
        }
    }

    fn move_selection(&mut self, offset: isize) {
        let len = self.roster.len();
        if len == 0 {
            return;
        }
        let target = self.selected as isize + offset;
        self.selected = target.clamp(0, len as isize - 1) as usize;
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.roster.len() {
            self.selected = self.roster.len().saturating_sub(1);
        }
    }

    fn push_summary(&mut self, line: String) {
        self.summary.push(line);
        if self.summary.len() > SUMMARY_CAPACITY {
            let overflow = self.summary.len() - SUMMARY_CAPACITY;
            self.summary.drain(..overflow);
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }
}
