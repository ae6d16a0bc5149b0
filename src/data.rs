use crate::{error::RosterResult, validator::FormSchema};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{
    collections::BTreeMap,
    fmt::{self, Debug, Display, Formatter},
};

pub mod course;
pub mod student;

/// Raw textual form values, keyed by wire field name.
pub type FieldValues = BTreeMap<&'static str, String>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Student,
    Course,
}

impl RecordKind {
    /// Path segment used both by the backend (`/api/<segment>`) and by our own routes.
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Student => "students",
            Self::Course => "courses",
        }
    }

    /// Key the backend wraps a listed collection in.
    pub const fn collection_key(self) -> &'static str {
        self.segment()
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Course => "Course",
        }
    }

    pub const fn plural_title(self) -> &'static str {
        match self {
            Self::Student => "Students",
            Self::Course => "Courses",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Course => write!(f, "course"),
        }
    }
}

///unreserved characters from RFC 3986 stay as they are
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Server-assigned identifier. Opaque to us.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    #[cfg(test)]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id escaped for use as one URL path segment, in our routes and the backend's.
    pub fn path_segment(&self) -> String {
        utf8_percent_encode(self.as_str(), PATH_SEGMENT).to_string()
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A record as the backend returns it: its identifier plus the editable fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Persisted<T> {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: T,
}

/// The editable part of one record kind - exactly what gets sent on create and update.
pub trait RecordFields:
    Serialize + DeserializeOwned + Clone + Debug + PartialEq + Send + Sync + 'static
{
    const KIND: RecordKind;

    fn schema() -> &'static FormSchema;

    /// Values an empty "create" draft starts with.
    fn blank_values() -> FieldValues {
        Self::schema()
            .fields
            .iter()
            .map(|spec| (spec.name, String::new()))
            .collect()
    }

    fn to_values(&self) -> FieldValues;

    ///only ever called on values the schema has already accepted
    fn from_values(values: &FieldValues) -> RosterResult<Self>;

    /// The field that identifies a record to people, and can't change after creation.
    fn key_field() -> &'static str;

    fn display_key(&self) -> String;
}

pub(crate) fn value_of<'a>(values: &'a FieldValues, name: &'static str) -> &'a str {
    values.get(name).map_or("", String::as_str)
}
