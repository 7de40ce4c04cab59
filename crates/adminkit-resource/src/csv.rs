//! CSV export descriptor.
//!
//! A [`CsvBuilder`] lists the columns a resource exports. Records reach it as
//! serialized JSON objects; each column either reads an attribute or runs a
//! closure over the record.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use adminkit_core::utils::text;
use adminkit_core::AdminResult;
use serde_json::Value;

use crate::entity::EntityClass;

type Extractor = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Where a column's cell comes from.
#[derive(Clone)]
pub enum CsvValue {
    /// The record attribute with this name.
    Attribute(String),
    /// A closure over the whole record.
    Extractor(Extractor),
}

impl PartialEq for CsvValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Attribute(a), Self::Attribute(b)) => a == b,
            (Self::Extractor(a), Self::Extractor(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for CsvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute(name) => f.debug_tuple("Attribute").field(name).finish(),
            Self::Extractor(_) => f.write_str("Extractor(..)"),
        }
    }
}

/// One exported column.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvColumn {
    /// Header cell.
    pub name: String,
    /// Cell source.
    pub value: CsvValue,
}

impl CsvColumn {
    /// Creates an attribute column headed by the titleized attribute name.
    pub fn new(attribute: impl Into<String>) -> Self {
        let attribute = attribute.into();
        Self {
            name: text::titleize(&attribute),
            value: CsvValue::Attribute(attribute),
        }
    }

    /// Creates a column computed from the record.
    pub fn with<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            value: CsvValue::Extractor(Arc::new(f)),
        }
    }

    /// Overrides the header cell.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns this column's cell for `record`.
    pub fn value_for(&self, record: &Value) -> String {
        match &self.value {
            CsvValue::Attribute(attribute) => record.get(attribute).map_or_else(String::new, cell),
            CsvValue::Extractor(f) => f(record),
        }
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The ordered column list of a resource's CSV export.
///
/// # Examples
///
/// ```
/// use adminkit_resource::csv::CsvBuilder;
/// use serde_json::json;
///
/// let builder = CsvBuilder::new()
///     .column("id")
///     .column("title")
///     .column_with("Author", |r| r["author"]["name"].as_str().unwrap_or("").to_string());
///
/// assert_eq!(builder.header(), vec!["Id", "Title", "Author"]);
/// let row = builder.row(&json!({"id": 7, "title": "Hi", "author": {"name": "Ann"}}));
/// assert_eq!(row, vec!["7", "Hi", "Ann"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvBuilder {
    columns: Vec<CsvColumn>,
}

impl CsvBuilder {
    /// Creates a builder with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the default export for `class`: the primary key followed by
    /// every content column.
    pub fn default_for(class: &EntityClass) -> Self {
        std::iter::once(class.primary_key_name())
            .chain(class.content_columns().into_iter().map(|c| c.name.as_str()))
            .fold(Self::new(), |builder, name| builder.column(name))
    }

    /// Appends an attribute column.
    #[must_use]
    pub fn column(mut self, attribute: impl Into<String>) -> Self {
        self.columns.push(CsvColumn::new(attribute));
        self
    }

    /// Appends a computed column.
    #[must_use]
    pub fn column_with<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.columns.push(CsvColumn::with(name, f));
        self
    }

    /// Appends a prepared column.
    #[must_use]
    pub fn push(mut self, column: CsvColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Returns the columns in export order.
    pub fn columns(&self) -> &[CsvColumn] {
        &self.columns
    }

    /// Returns the header row.
    pub fn header(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Returns the cells of one record.
    pub fn row(&self, record: &Value) -> Vec<String> {
        self.columns.iter().map(|c| c.value_for(record)).collect()
    }

    /// Writes the header and one row per record as CSV.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::IoError`](adminkit_core::AdminError::IoError)
    /// when the writer fails.
    pub fn write<'a, W, I>(&self, records: I, writer: W) -> AdminResult<()>
    where
        W: Write,
        I: IntoIterator<Item = &'a Value>,
    {
        let mut csv = ::csv::Writer::from_writer(writer);
        csv.write_record(self.header()).map_err(std::io::Error::from)?;
        for record in records {
            csv.write_record(self.row(record)).map_err(std::io::Error::from)?;
        }
        csv.flush()?;
        Ok(())
    }
}
