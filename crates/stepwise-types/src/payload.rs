//! Raw step arguments and the two multi-line payload shapes.
//!
//! A [`RawArgument`] is what the matcher hands over for one capture: plain
//! text, a multi-line payload, or a generic [`StepArgument`] wrapper that
//! contains a payload. Consumers discover the shape by matching on the
//! value, never through a separate type tag.

use serde::{Deserialize, Serialize};
use std::fmt;

// ══════════════════════════════════════════════════════════════════════════════
// Payloads
// ══════════════════════════════════════════════════════════════════════════════

/// A free-form multi-line text block attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocString {
    pub content: String,
    /// Media type written after the opening delimiter (e.g. `json`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl DocString {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            media_type: None,
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}

/// A single row of a [`DataTable`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<String>,
}

impl TableRow {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }
}

/// A tabular block (rows of cells) attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataTable {
    pub rows: Vec<TableRow>,
}

impl DataTable {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }

    /// Build a table from nested cell iterators.
    pub fn from_rows<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(TableRow::new).collect(),
        }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The first row, conventionally the header.
    pub fn headers(&self) -> Option<&[String]> {
        self.rows.first().map(|r| r.cells.as_slice())
    }

    /// Cell at (`row`, `col`), both 0-based.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(col))
            .map(String::as_str)
    }
}

impl fmt::Display for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "|")?;
            for cell in &row.cells {
                write!(f, " {cell} |")?;
            }
        }
        Ok(())
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Raw arguments
// ══════════════════════════════════════════════════════════════════════════════

/// Generic container for a step's multi-line argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepArgument {
    DocString(DocString),
    DataTable(DataTable),
}

impl StepArgument {
    pub fn doc_string(&self) -> Option<&DocString> {
        match self {
            Self::DocString(doc) => Some(doc),
            Self::DataTable(_) => None,
        }
    }

    pub fn data_table(&self) -> Option<&DataTable> {
        match self {
            Self::DataTable(table) => Some(table),
            Self::DocString(_) => None,
        }
    }
}

/// One untyped argument captured for a step, prior to coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "value", rename_all = "snake_case")]
pub enum RawArgument {
    /// A textual capture from the step text.
    Text(String),
    /// A wrapper holding one multi-line payload.
    Wrapped(StepArgument),
    /// An already-unwrapped doc string.
    DocString(DocString),
    /// An already-unwrapped data table.
    DataTable(DataTable),
}

impl RawArgument {
    /// The shape of this argument.
    pub fn kind(&self) -> RawKind {
        match self {
            Self::Text(_) => RawKind::Text,
            Self::Wrapped(StepArgument::DocString(_)) => RawKind::WrappedDocString,
            Self::Wrapped(StepArgument::DataTable(_)) => RawKind::WrappedDataTable,
            Self::DocString(_) => RawKind::DocString,
            Self::DataTable(_) => RawKind::DataTable,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The doc string this argument is or directly contains.
    pub fn doc_string(&self) -> Option<&DocString> {
        match self {
            Self::DocString(doc) => Some(doc),
            Self::Wrapped(arg) => arg.doc_string(),
            _ => None,
        }
    }

    /// The data table this argument is or directly contains.
    pub fn data_table(&self) -> Option<&DataTable> {
        match self {
            Self::DataTable(table) => Some(table),
            Self::Wrapped(arg) => arg.data_table(),
            _ => None,
        }
    }

    /// Render the argument's content for diagnostics.
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::DocString(doc) | Self::Wrapped(StepArgument::DocString(doc)) => {
                doc.content.clone()
            }
            Self::DataTable(table) | Self::Wrapped(StepArgument::DataTable(table)) => {
                table.to_string()
            }
        }
    }
}

impl From<String> for RawArgument {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for RawArgument {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<DocString> for RawArgument {
    fn from(doc: DocString) -> Self {
        Self::DocString(doc)
    }
}

impl From<DataTable> for RawArgument {
    fn from(table: DataTable) -> Self {
        Self::DataTable(table)
    }
}

impl From<StepArgument> for RawArgument {
    fn from(arg: StepArgument) -> Self {
        Self::Wrapped(arg)
    }
}

/// Shape of a [`RawArgument`], reported in conversion errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawKind {
    Text,
    DocString,
    DataTable,
    WrappedDocString,
    WrappedDataTable,
}

impl fmt::Display for RawKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::DocString => write!(f, "doc string"),
            Self::DataTable => write!(f, "data table"),
            Self::WrappedDocString => write!(f, "step argument (doc string)"),
            Self::WrappedDataTable => write!(f, "step argument (data table)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DataTable {
        DataTable::from_rows([["name", "count"], ["godogs", "12"]])
    }

    #[test]
    fn test_raw_kind_of_each_shape() {
        assert_eq!(RawArgument::from("x").kind(), RawKind::Text);
        assert_eq!(
            RawArgument::from(DocString::new("x")).kind(),
            RawKind::DocString
        );
        assert_eq!(RawArgument::from(table()).kind(), RawKind::DataTable);
        assert_eq!(
            RawArgument::from(StepArgument::DocString(DocString::new("x"))).kind(),
            RawKind::WrappedDocString
        );
        assert_eq!(
            RawArgument::from(StepArgument::DataTable(table())).kind(),
            RawKind::WrappedDataTable
        );
    }

    #[test]
    fn test_doc_string_reached_through_wrapper() {
        let doc = DocString::new("hello\nworld");
        let wrapped = RawArgument::from(StepArgument::DocString(doc.clone()));
        assert_eq!(wrapped.doc_string(), Some(&doc));
        assert_eq!(wrapped.data_table(), None);
    }

    #[test]
    fn test_wrapper_holding_table_has_no_doc_string() {
        let wrapped = RawArgument::from(StepArgument::DataTable(table()));
        assert!(wrapped.doc_string().is_none());
        assert_eq!(wrapped.data_table(), Some(&table()));
    }

    #[test]
    fn test_text_is_not_a_payload() {
        let raw = RawArgument::from("12");
        assert_eq!(raw.as_text(), Some("12"));
        assert!(raw.doc_string().is_none());
        assert!(raw.data_table().is_none());
    }

    #[test]
    fn test_table_accessors() {
        let t = table();
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.headers(), Some(&["name".to_string(), "count".to_string()][..]));
        assert_eq!(t.cell(1, 1), Some("12"));
        assert_eq!(t.cell(2, 0), None);
        assert_eq!(DataTable::default().headers(), None);
    }

    #[test]
    fn test_render_table() {
        assert_eq!(
            RawArgument::from(table()).render(),
            "| name | count |\n| godogs | 12 |"
        );
    }

    #[test]
    fn test_render_doc_string() {
        let raw = RawArgument::from(DocString::new("a\nb").with_media_type("text"));
        assert_eq!(raw.render(), "a\nb");
    }

    #[test]
    fn test_raw_argument_json_shape() {
        let json = serde_json::to_value(RawArgument::from("42")).unwrap();
        assert_eq!(json, serde_json::json!({"shape": "text", "value": "42"}));
    }
}
