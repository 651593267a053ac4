//! The consumed deck interface: ordered keywords with typed item records.
//!
//! Tokenizing the legacy text format is an external collaborator's job;
//! this crate only sees the structured form. Constructors below double as
//! the builder API used by callers (and tests) to assemble decks.

use crate::error::GridError;

/// A single typed value inside a deck record.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// Integer item.
    Int(i64),
    /// Floating-point item.
    Double(f64),
    /// String item (fault names, face directions, option flags).
    Str(String),
}

impl Item {
    /// Interpret the item as an integer.
    pub fn as_int(&self, keyword: &str) -> Result<i64, GridError> {
        match self {
            Item::Int(v) => Ok(*v),
            other => Err(GridError::BadItem {
                keyword: keyword.to_string(),
                message: format!("expected int, got {other:?}"),
            }),
        }
    }

    /// Interpret the item as a double; integer items promote.
    pub fn as_double(&self, keyword: &str) -> Result<f64, GridError> {
        match self {
            Item::Double(v) => Ok(*v),
            Item::Int(v) => Ok(*v as f64),
            other => Err(GridError::BadItem {
                keyword: keyword.to_string(),
                message: format!("expected number, got {other:?}"),
            }),
        }
    }

    /// Interpret the item as a string.
    pub fn as_str(&self, keyword: &str) -> Result<&str, GridError> {
        match self {
            Item::Str(s) => Ok(s),
            other => Err(GridError::BadItem {
                keyword: keyword.to_string(),
                message: format!("expected string, got {other:?}"),
            }),
        }
    }
}

/// One record of a keyword (one slash-terminated line in the source format).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record(
    /// The record's items in source order.
    pub Vec<Item>,
);

impl Record {
    /// Number of items in the record.
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// Whether the record carries no items.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Item at position `idx`, if present.
    pub fn item(&self, idx: usize) -> Option<&Item> {
        self.0.get(idx)
    }
}

/// A named keyword with its ordered records.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    name: String,
    records: Vec<Record>,
}

impl Keyword {
    /// A bare keyword with no records (section headers, ENDBOX, ...).
    pub fn flag(name: &str) -> Self {
        Self { name: name.to_string(), records: Vec::new() }
    }

    /// A data keyword carrying one flat record of doubles.
    pub fn data(name: &str, values: Vec<f64>) -> Self {
        let items = values.into_iter().map(Item::Double).collect();
        Self { name: name.to_string(), records: vec![Record(items)] }
    }

    /// A data keyword carrying one flat record of integers.
    pub fn int_data(name: &str, values: Vec<i64>) -> Self {
        let items = values.into_iter().map(Item::Int).collect();
        Self { name: name.to_string(), records: vec![Record(items)] }
    }

    /// A keyword with explicit records (FAULTS, MULTFLT, EQUALS, ...).
    pub fn with_records(name: &str, records: Vec<Record>) -> Self {
        Self { name: name.to_string(), records }
    }

    /// Keyword name, upper case by convention of the source format.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All records in deck order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Flatten the keyword's records into a single vector of doubles.
    /// Integer items promote; string items are an error.
    pub fn data_f64(&self) -> Result<Vec<f64>, GridError> {
        let mut out = Vec::new();
        for rec in &self.records {
            for item in &rec.0 {
                out.push(item.as_double(&self.name)?);
            }
        }
        Ok(out)
    }

    /// Flatten the keyword's records into a single vector of integers.
    pub fn data_i64(&self) -> Result<Vec<i64>, GridError> {
        let mut out = Vec::new();
        for rec in &self.records {
            for item in &rec.0 {
                out.push(item.as_int(&self.name)?);
            }
        }
        Ok(out)
    }
}

/// An ordered sequence of keywords, as produced by the external parser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deck {
    keywords: Vec<Keyword>,
}

impl Deck {
    /// An empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a keyword, preserving file order.
    pub fn push(&mut self, kw: Keyword) -> &mut Self {
        self.keywords.push(kw);
        self
    }

    /// Whether any keyword with this name is present.
    pub fn has_keyword(&self, name: &str) -> bool {
        self.keywords.iter().any(|kw| kw.name == name)
    }

    /// The last occurrence of a keyword (later definitions win in the
    /// source format), or `None`.
    pub fn keyword(&self, name: &str) -> Option<&Keyword> {
        self.keywords.iter().rev().find(|kw| kw.name == name)
    }

    /// All keywords in file order.
    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.keywords.iter()
    }

    /// All occurrences of a named keyword, in file order.
    pub fn keywords_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Keyword> + 'a {
        self.keywords.iter().filter(move |kw| kw.name == name)
    }
}
