use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Course, Student};

/// Which characters a field accepts while typing.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum FieldKind {
    Text,
    Decimal,
    Integer,
}

/// One labelled input inside a modal form.
#[derive(Clone, Debug)]
pub(crate) struct FormField {
    pub(crate) label: &'static str,
    pub(crate) value: String,
    pub(crate) kind: FieldKind,
    pub(crate) required: bool,
}

impl FormField {
    fn required(label: &'static str, kind: FieldKind) -> Self {
        Self {
            label,
            value: String::new(),
            kind,
            required: true,
        }
    }

    fn optional(label: &'static str, kind: FieldKind) -> Self {
        Self {
            required: false,
            ..Self::required(label, kind)
        }
    }

    fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    fn accepts(&self, ch: char) -> bool {
        match self.kind {
            FieldKind::Text => !ch.is_control(),
            FieldKind::Decimal => ch.is_ascii_digit() || ch == '.' || ch == '-',
            FieldKind::Integer => ch.is_ascii_digit(),
        }
    }
}

/// What submitting a form does.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum FormAction {
    AddStudent,
    Rename,
    UpdateGpa,
    AddResult,
    ClassAverage,
    Search(SearchKind),
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum SearchKind {
    Linear,
    Binary,
}

impl SearchKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            SearchKind::Linear => "Linear",
            SearchKind::Binary => "Binary",
        }
    }
}

/// State of the modal input form. Parsing text into numbers happens here; the
/// range checks are left to the roster.
#[derive(Clone, Debug)]
pub(crate) struct InputForm {
    pub(crate) action: FormAction,
    pub(crate) fields: Vec<FormField>,
    pub(crate) active: usize,
    pub(crate) error: Option<String>,
}

impl InputForm {
    fn new(action: FormAction, fields: Vec<FormField>) -> Self {
        Self {
            action,
            fields,
            active: 0,
            error: None,
        }
    }

    pub(crate) fn add_student() -> Self {
        Self::new(
            FormAction::AddStudent,
            vec![
                FormField::required("ID", FieldKind::Text),
                FormField::required("Name", FieldKind::Text),
                FormField::required("GPA", FieldKind::Decimal),
            ],
        )
    }

    /// Rename the selected student; the id is fixed so focus starts on the
    /// name.
    pub(crate) fn rename(student: &Student) -> Self {
        let mut form = Self::new(
            FormAction::Rename,
            vec![
                FormField::required("ID", FieldKind::Text).with_value(student.id()),
                FormField::required("Name", FieldKind::Text).with_value(student.name()),
            ],
        );
        form.active = 1;
        form
    }

    pub(crate) fn update_gpa(selected: Option<&Student>) -> Self {
        let (id, gpa) = selected
            .map(|s| (s.id().to_string(), format!("{:.2}", s.gpa())))
            .unwrap_or_default();
        let mut form = Self::new(
            FormAction::UpdateGpa,
            vec![
                FormField::required("ID", FieldKind::Text).with_value(id),
                FormField::required("New GPA", FieldKind::Decimal).with_value(gpa),
            ],
        );
        if selected.is_some() {
            form.active = 1;
        }
        form
    }

    pub(crate) fn add_result(selected: Option<&Student>) -> Self {
        let id = selected.map(|s| s.id().to_string()).unwrap_or_default();
        let mut form = Self::new(
            FormAction::AddResult,
            vec![
                FormField::required("Student ID", FieldKind::Text).with_value(id),
                FormField::required("Course Code", FieldKind::Text),
                FormField::optional("Course Name", FieldKind::Text),
                FormField::optional("Credits", FieldKind::Integer),
                FormField::required("Score", FieldKind::Decimal),
            ],
        );
        if selected.is_some() {
            form.active = 1;
        }
        form
    }

    pub(crate) fn class_average() -> Self {
        Self::new(
            FormAction::ClassAverage,
            vec![FormField::required("Course Code", FieldKind::Text)],
        )
    }

    pub(crate) fn search(kind: SearchKind) -> Self {
        Self::new(
            FormAction::Search(kind),
            vec![FormField::required("Student ID", FieldKind::Text)],
        )
    }

    pub(crate) fn title(&self) -> String {
        match self.action {
            FormAction::AddStudent => "Add Student".to_string(),
            FormAction::Rename => "Rename Student".to_string(),
            FormAction::UpdateGpa => "Update GPA".to_string(),
            FormAction::AddResult => "Add Course Result".to_string(),
            FormAction::ClassAverage => "Class Average".to_string(),
            FormAction::Search(kind) => format!("{} Search", kind.label()),
        }
    }

    /// Move focus to the next field, wrapping around.
    pub(crate) fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.active = (self.active + 1) % self.fields.len();
        }
    }

    /// Move focus to the previous field, wrapping around.
    pub(crate) fn previous_field(&mut self) {
        if !self.fields.is_empty() {
            self.active = (self.active + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Append a character to the active field if its kind allows it.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.fields.get_mut(self.active) {
            Some(field) if field.accepts(ch) => {
                field.value.push(ch);
                true
            }
            _ => false,
        }
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.active) {
            field.value.pop();
        }
    }

    fn field(&self, label: &str) -> Result<&FormField> {
        self.fields
            .iter()
            .find(|field| field.label == label)
            .ok_or_else(|| anyhow!("Form has no {label} field."))
    }

    /// Trimmed text of a field; empty required fields are an error.
    pub(crate) fn text(&self, label: &str) -> Result<String> {
        let field = self.field(label)?;
        let value = field.value.trim();
        if field.required && value.is_empty() {
            return Err(anyhow!("{label} is required."));
        }
        Ok(value.to_string())
    }

    pub(crate) fn decimal(&self, label: &str) -> Result<f64> {
        let raw = self.text(label)?;
        raw.parse::<f64>()
            .map_err(|_| anyhow!("{label} must be a valid number."))
    }

    /// Integer value of an optional field, zero when left blank.
    pub(crate) fn integer(&self, label: &str) -> Result<u32> {
        let raw = self.text(label)?;
        if raw.is_empty() {
            return Ok(0);
        }
        raw.parse::<u32>()
            .map_err(|_| anyhow!("{label} must be a whole number."))
    }

    /// Collect the add-result fields into a course and score.
    pub(crate) fn parse_result(&self) -> Result<(String, Course, f64)> {
        let student_id = self.text("Student ID")?;
        let course = Course::new(
            self.text("Course Code")?,
            self.text("Course Name")?,
            self.integer("Credits")?,
        );
        let score = self.decimal("Score")?;
        Ok((student_id, course, score))
    }

    /// Render one form line, highlighting the focused field.
    pub(crate) fn build_line(&self, idx: usize) -> Line<'static> {
        let Some(field) = self.fields.get(idx) else {
            return Line::from("");
        };
        let is_active = idx == self.active;
        let placeholder = if field.required {
            "<required>"
        } else {
            "<optional>"
        };

        let display = if field.value.is_empty() {
            placeholder.to_string()
        } else {
            field.value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if field.value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label)),
            Span::styled(display, style),
        ])
    }

    /// Cursor column offset for the active field, label prefix included.
    pub(crate) fn cursor_offset(&self) -> u16 {
        self.fields
            .get(self.active)
            .map(|field| (field.label.len() + 2 + field.value.chars().count()) as u16)
            .unwrap_or(0)
    }
}

/// Pending removal awaiting a yes/no answer.
#[derive(Clone, Debug)]
pub(crate) struct ConfirmRemove {
    pub(crate) id: String,
    pub(crate) display: String,
}

impl From<&Student> for ConfirmRemove {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id().to_string(),
            display: student.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn type_str(form: &mut InputForm, text: &str) {
        for ch in text.chars() {
            form.push_char(ch);
        }
    }

    #[test]
    fn test_decimal_field_filters_letters() {
        let mut form = InputForm::add_student();
        form.active = 2;
        type_str(&mut form, "3a.5x");
        assert_eq!(form.fields[2].value, "3.5");
    }

    #[test]
    fn test_required_fields_are_checked() {
        let mut form = InputForm::add_student();
        type_str(&mut form, "S1");
        let err = form.text("Name").unwrap_err();
        assert_eq!(err.to_string(), "Name is required.");
    }

    #[test]
    fn test_decimal_rejects_garbage() {
        let mut form = InputForm::add_student();
        form.active = 2;
        type_str(&mut form, "1.2.3");
        let err = form.decimal("GPA").unwrap_err();
        assert_eq!(err.to_string(), "GPA must be a valid number.");
    }

    #[test]
    fn test_parse_result_defaults_optional_fields() {
        let mut form = InputForm::add_result(None);
        type_str(&mut form, "S1");
        form.next_field();
        type_str(&mut form, "CSC201");
        form.active = 4;
        type_str(&mut form, "88.5");

        let (id, course, score) = form.parse_result().unwrap();
        assert_eq!(id, "S1");
        assert_eq!(course, Course::new("CSC201", "", 0));
        assert_eq!(score, 88.5);
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut form = InputForm::class_average();
        form.next_field();
        assert_eq!(form.active, 0);

        let mut form = InputForm::add_student();
        form.previous_field();
        assert_eq!(form.active, 2);
    }

    #[test]
    fn test_update_gpa_prefills_selection() {
        let student = Student::new("S4", "Ife", 3.2).unwrap();
        let form = InputForm::update_gpa(Some(&student));
        assert_eq!(form.fields[0].value, "S4");
        assert_eq!(form.fields[1].value, "3.20");
        assert_eq!(form.active, 1);
    }

    #[test]
    fn test_confirm_remove_from_student() {
        let student = Student::new("S7", "Tolu", 2.5).unwrap();
        let confirm = ConfirmRemove::from(&student);
        assert_eq!(confirm.id, "S7");
        assert_eq!(confirm.display, "S7 - Tolu | GPA: 2.50");
    }
}
