use std::fmt;

use serde::{Deserialize, Serialize};

/// Response body sent when no file in any requested format matched.
pub const NO_MATCHES_SENTINEL: &str = "No matches found in any file type.\n";

/// The four content categories the service can search.
///
/// `ALL` is the canonical dispatch order; the `all` directive and the
/// no-directive default both expand to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    Text,
    Pdf,
    Spreadsheet,
    Html,
}

impl FormatTag {
    pub const ALL: [FormatTag; 4] = [Self::Text, Self::Pdf, Self::Spreadsheet, Self::Html];

    /// Parse one tag from a `filetype:` directive (already trimmed and
    /// lowercased). Unknown tags yield `None` and are dropped silently.
    pub fn parse(tag: &str) -> Option<FormatTag> {
        match tag {
            "txt" | "text" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            "excel" | "xlsx" | "spreadsheet" => Some(Self::Spreadsheet),
            "html" => Some(Self::Html),
            _ => None,
        }
    }
}

/// One matching location inside a file, rendered format-specifically in the
/// response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LocationMatch {
    /// Text file: 1-based line number and the trimmed line.
    Line { number: usize, text: String },
    /// PDF: 1-based page number, no excerpt.
    Page { number: usize },
    /// Spreadsheet: sheet name, 1-based row, column letter, cell value.
    Cell {
        sheet: String,
        row: usize,
        column: String,
        value: String,
    },
    /// HTML: the trimmed text fragment itself.
    Fragment { text: String },
}

impl fmt::Display for LocationMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line { number, text } => write!(f, "Line {number}: {text}"),
            Self::Page { number } => write!(f, "Page {number}"),
            Self::Cell {
                sheet,
                row,
                column,
                value,
            } => write!(f, "{sheet} - Row {row}, Column {column}: {value}"),
            Self::Fragment { text } => f.write_str(text),
        }
    }
}

/// All match locations for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDescriptor {
    pub file_name: String,
    pub locations: Vec<LocationMatch>,
}

impl MatchDescriptor {
    /// One response line: `File: <name>, Matches: <locations joined by "; ">`.
    pub fn summary_line(&self) -> String {
        let joined = self
            .locations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        format!("File: {}, Matches: {}", self.file_name, joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        assert_eq!(FormatTag::parse("txt"), Some(FormatTag::Text));
        assert_eq!(FormatTag::parse("text"), Some(FormatTag::Text));
        assert_eq!(FormatTag::parse("pdf"), Some(FormatTag::Pdf));
        assert_eq!(FormatTag::parse("excel"), Some(FormatTag::Spreadsheet));
        assert_eq!(FormatTag::parse("xlsx"), Some(FormatTag::Spreadsheet));
        assert_eq!(FormatTag::parse("html"), Some(FormatTag::Html));
    }

    #[test]
    fn test_parse_unknown_tags() {
        assert_eq!(FormatTag::parse("docx"), None);
        assert_eq!(FormatTag::parse(""), None);
        assert_eq!(FormatTag::parse("all"), None); // expanded by the query parser, not here
    }

    #[test]
    fn test_location_rendering() {
        let line = LocationMatch::Line {
            number: 3,
            text: "apple banana".into(),
        };
        assert_eq!(line.to_string(), "Line 3: apple banana");

        let page = LocationMatch::Page { number: 7 };
        assert_eq!(page.to_string(), "Page 7");

        let cell = LocationMatch::Cell {
            sheet: "Sheet1".into(),
            row: 2,
            column: "B".into(),
            value: "42".into(),
        };
        assert_eq!(cell.to_string(), "Sheet1 - Row 2, Column B: 42");

        let fragment = LocationMatch::Fragment {
            text: "short fragment".into(),
        };
        assert_eq!(fragment.to_string(), "short fragment");
    }

    #[test]
    fn test_summary_line() {
        let descriptor = MatchDescriptor {
            file_name: "notes.txt".into(),
            locations: vec![
                LocationMatch::Line {
                    number: 1,
                    text: "first".into(),
                },
                LocationMatch::Line {
                    number: 4,
                    text: "second".into(),
                },
            ],
        };
        assert_eq!(
            descriptor.summary_line(),
            "File: notes.txt, Matches: Line 1: first; Line 4: second"
        );
    }
}
