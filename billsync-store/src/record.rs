//! Wire model of the remote record store.
//!
//! A record is one entity instance with typed fields; field values use one
//! wrapper per value kind (title, rich text, date, single-select, number,
//! relation-by-identity, server-computed rollup). The serde shapes mirror the
//! store's JSON exactly, e.g.
//!
//! ```json
//! { "type": "title",  "title": [ { "text": { "content": "B-001" } } ] }
//! { "type": "number", "number": 75.0 }
//! { "type": "rollup", "rollup": { "type": "number", "number": 2 } }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Identity of a collection ("database") in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionId(pub String);

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for CollectionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CollectionId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Identity of a single record ("page"), assigned by the store on create.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Field values
// ---------------------------------------------------------------------------

/// One text fragment inside a title or rich-text field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    pub text: TextContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

impl TextFragment {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            text: TextContent {
                content: content.into(),
            },
        }
    }
}

/// A date value; `start` is an ISO-8601 date or datetime string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// A single-select option, addressed by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectValue {
    pub name: String,
}

/// A relation entry pointing at another record's identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationRef {
    pub id: RecordId,
}

/// A server-computed rollup value. Read-only; never written by this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RollupValue {
    Number { number: Option<f64> },
    /// Any rollup kind this client does not model (arrays, dates, ...).
    #[serde(other)]
    Unsupported,
}

/// A typed field value, tagged by kind exactly as on the wire.
///
/// `date`, `select` and `number` are nullable on read: the store sends
/// `null` for a cleared field and decoding must not reject the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldValue {
    Title { title: Vec<TextFragment> },
    RichText { rich_text: Vec<TextFragment> },
    Date { date: Option<DateValue> },
    Select { select: Option<SelectValue> },
    Number { number: Option<f64> },
    Relation { relation: Vec<RelationRef> },
    Rollup { rollup: RollupValue },
    /// Any field kind this client does not model; tolerated on read so a
    /// collection with extra columns does not break record decoding.
    #[serde(other)]
    Unsupported,
}

impl FieldValue {
    pub fn title(content: impl Into<String>) -> Self {
        FieldValue::Title {
            title: vec![TextFragment::new(content)],
        }
    }

    pub fn rich_text(content: impl Into<String>) -> Self {
        FieldValue::RichText {
            rich_text: vec![TextFragment::new(content)],
        }
    }

    pub fn date(start: impl Into<String>) -> Self {
        FieldValue::Date {
            date: Some(DateValue {
                start: start.into(),
                end: None,
            }),
        }
    }

    pub fn select(name: impl Into<String>) -> Self {
        FieldValue::Select {
            select: Some(SelectValue { name: name.into() }),
        }
    }

    pub fn number(value: f64) -> Self {
        FieldValue::Number {
            number: Some(value),
        }
    }

    pub fn relation(id: RecordId) -> Self {
        FieldValue::Relation {
            relation: vec![RelationRef { id }],
        }
    }

    /// Joined text of a title or rich-text field; `None` for other kinds.
    pub fn plain_text(&self) -> Option<String> {
        let fragments = match self {
            FieldValue::Title { title } => title,
            FieldValue::RichText { rich_text } => rich_text,
            _ => return None,
        };
        Some(
            fragments
                .iter()
                .map(|f| f.text.content.as_str())
                .collect::<String>(),
        )
    }

    /// The numeric value of a rollup field, if it is a computed number.
    pub fn rollup_number(&self) -> Option<f64> {
        match self {
            FieldValue::Rollup {
                rollup: RollupValue::Number { number },
            } => *number,
            _ => None,
        }
    }

    pub fn select_name(&self) -> Option<&str> {
        match self {
            FieldValue::Select { select } => select.as_ref().map(|s| s.name.as_str()),
            _ => None,
        }
    }
}

/// Field values keyed by field name, as sent to `create` / `patch`.
pub type FieldMap = BTreeMap<String, FieldValue>;

// ---------------------------------------------------------------------------
// Records and filters
// ---------------------------------------------------------------------------

/// One record of a collection, as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default)]
    pub properties: FieldMap,
}

/// An equality filter on a designated title/key field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub property: String,
    pub equals: String,
}

impl Filter {
    pub fn title_equals(property: impl Into<String>, equals: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            equals: equals.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
