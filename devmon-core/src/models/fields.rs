/// Field lookup shared by the device configuration records
///
/// Device-config records are read generically by downstream code that only
/// knows column names. Two accessors are offered:
///
/// - [`DeviceRecord::get`] takes any string and answers `None` for names
///   the record doesn't define, so a typo reads as missing data.
/// - Each record's closed field enum parses with a hard [`UnknownField`]
///   error and feeds a typed `field()` accessor.
///
/// A defined column holding NULL comes back as `Some(FieldValue::Text(None))`,
/// which is distinct from the absent sentinel `None`.

use serde::Serialize;
use std::fmt;

/// Value of a single record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue<'a> {
    /// The auto-increment primary key
    Id(i32),

    /// A nullable text column
    Text(Option<&'a str>),
}

impl<'a> FieldValue<'a> {
    /// The text payload, if this is a non-NULL text field
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            FieldValue::Text(value) => *value,
            FieldValue::Id(_) => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Id(id) => write!(f, "{}", id),
            FieldValue::Text(Some(value)) => f.write_str(value),
            FieldValue::Text(None) => f.write_str("None"),
        }
    }
}

/// A field name that the record type doesn't define
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field '{field}' for table {table}")]
pub struct UnknownField {
    /// Table that was queried
    pub table: &'static str,

    /// The rejected name
    pub field: String,
}

/// Error type for device configuration writes
#[derive(Debug, thiserror::Error)]
pub enum DeviceConfigError {
    /// Input failed validation
    #[error("Invalid device configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Common surface of `ProjectInfo`, `AnalogInfo` and `DigitInfo`
pub trait DeviceRecord {
    /// Backing table name
    const TABLE: &'static str;

    /// Column names in declaration order
    const FIELDS: &'static [&'static str];

    /// Primary key
    fn id(&self) -> i32;

    /// Logical reference to the owning device
    fn device_id(&self) -> Option<&str>;

    /// Value of the named field, or None if the name isn't a field
    fn get(&self, field: &str) -> Option<FieldValue<'_>>;
}
