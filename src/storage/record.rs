use std::num::ParseFloatError;

use thiserror::Error;

use crate::error::RosterError;

/// Why a single line of a roster file was skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("unterminated quoted field")]
    UnterminatedQuote,

    #[error("{field} is not a number: {source}")]
    Number {
        field: &'static str,
        source: ParseFloatError,
    },

    #[error(transparent)]
    Rejected(#[from] RosterError),
}

/// Split one comma-separated line into its fields. Double-quoted fields may
/// contain commas, and `""` inside them stands for a literal quote.
pub(crate) fn split_fields(line: &str) -> Result<Vec<String>, RecordError> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match (ch, in_quotes) {
            ('"', true) => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            ('"', false) if current.is_empty() => in_quotes = true,
            (',', false) => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }

    if in_quotes {
        return Err(RecordError::UnterminatedQuote);
    }
    fields.push(current);
    Ok(fields)
}

/// Whether `record` stops inside a quoted field, so the next physical line
/// belongs to the same record.
pub(crate) fn has_open_quote(record: &str) -> bool {
    matches!(split_fields(record), Err(RecordError::UnterminatedQuote))
}

/// Join fields into a line, quoting any field that would otherwise not split
/// back the same way. Fields are read verbatim, so surrounding whitespace is
/// quoted too.
pub(crate) fn join_fields<'a, I>(fields: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    fields
        .into_iter()
        .map(|field| {
            if field.contains([',', '"', '\n', '\r']) || field.trim() != field {
                format!("\"{}\"", field.replace('"', "\"\""))
            } else {
                field.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Split `line` and require exactly `N` fields.
pub(crate) fn expect_fields<const N: usize>(line: &str) -> Result<[String; N], RecordError> {
    let fields = split_fields(line)?;
    let found = fields.len();
    fields
        .try_into()
        .map_err(|_| RecordError::FieldCount { expected: N, found })
}

pub(crate) fn parse_number(field: &'static str, raw: &str) -> Result<f64, RecordError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|source| RecordError::Number { field, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_plain_and_quoted_fields() {
        assert_eq!(split_fields("S1,Ada,3.5").unwrap(), vec!["S1", "Ada", "3.5"]);
        assert_eq!(
            split_fields(r#"S2,"Lovelace, Ada",4.0"#).unwrap(),
            vec!["S2", "Lovelace, Ada", "4.0"]
        );
        assert_eq!(
            split_fields(r#"S3,"The ""Countess""",1"#).unwrap(),
            vec!["S3", r#"The "Countess""#, "1"]
        );
        assert_eq!(split_fields("a,,").unwrap(), vec!["a", "", ""]);
    }

    #[test]
    fn test_split_rejects_open_quote() {
        assert_eq!(
            split_fields(r#"S1,"Ada,3.5"#).unwrap_err(),
            RecordError::UnterminatedQuote
        );
    }

    #[test]
    fn test_join_quotes_only_when_needed() {
        let line = join_fields(["S2", "Lovelace, Ada", "say \"hi\"", "4.00"]);
        assert_eq!(line, r#"S2,"Lovelace, Ada","say ""hi""",4.00"#);
        assert_eq!(
            split_fields(&line).unwrap(),
            vec!["S2", "Lovelace, Ada", "say \"hi\"", "4.00"]
        );
    }

    #[test]
    fn test_join_quotes_padded_and_multiline_text() {
        let line = join_fields(["S1", " Ada ", "Ada\nLovelace", ""]);
        assert_eq!(line, "S1,\" Ada \",\"Ada\nLovelace\",");
        assert_eq!(
            split_fields(&line).unwrap(),
            vec!["S1", " Ada ", "Ada\nLovelace", ""]
        );
    }

    #[test]
    fn test_open_quote_spans_lines() {
        assert!(has_open_quote("S1,\"Ada\n"));
        assert!(!has_open_quote("S1,\"Ada\nLovelace\",3\n"));
        assert!(!has_open_quote("S1,Ada,3\n"));
    }

    #[test]
    fn test_expect_fields_counts() {
        let [a, b] = expect_fields::<2>("x,y").unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("x", "y"));
        assert_eq!(
            expect_fields::<3>("x,y").unwrap_err(),
            RecordError::FieldCount {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_parse_number_reports_field() {
        let err = parse_number("gpa", "abc").unwrap_err();
        assert!(err.to_string().starts_with("gpa is not a number"));
        assert_eq!(parse_number("gpa", " 3.25 ").unwrap(), 3.25);
    }
}
