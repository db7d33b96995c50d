/// Digital channel definitions
///
/// A digital channel reports a discrete state. `mapper` describes how raw
/// values translate into states; like every other field it is opaque text.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE digit_info (
///     id SERIAL PRIMARY KEY,
///     device_id VARCHAR(5),
///     name VARCHAR(64),
///     ratio VARCHAR(64),
///     mapper VARCHAR(64),
///     command VARCHAR(64),
///     cmd_param VARCHAR(64),
///     cmd_length VARCHAR(2)
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::str::FromStr;
use validator::Validate;

use super::fields::{DeviceConfigError, DeviceRecord, FieldValue, UnknownField};

const DIGIT_COLUMNS: &str = "id, device_id, name, ratio, mapper, command, cmd_param, cmd_length";

/// One digital channel of a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DigitInfo {
    /// Auto-increment id
    pub id: i32,
    /// Device this row describes (up to 5 characters)
    pub device_id: Option<String>,
    /// Channel name
    pub name: Option<String>,
    /// Scaling factor applied to the raw reading
    pub ratio: Option<String>,
    /// Raw value to state mapping
    pub mapper: Option<String>,
    /// Command sent to read the channel
    pub command: Option<String>,
    /// Parameter appended to the command
    pub cmd_param: Option<String>,
    /// Length of the command frame, at most two characters
    pub cmd_length: Option<String>,
}

/// Columns of `digit_info`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigitField {
    /// `id`
    Id,
    /// `device_id`
    DeviceId,
    /// `name`
    Name,
    /// `ratio`
    Ratio,
    /// `mapper`
    Mapper,
    /// `command`
    Command,
    /// `cmd_param`
    CmdParam,
    /// `cmd_length`
    CmdLength,
}

impl DigitField {
    /// Column name as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            DigitField::Id => "id",
            DigitField::DeviceId => "device_id",
            DigitField::Name => "name",
            DigitField::Ratio => "ratio",
            DigitField::Mapper => "mapper",
            DigitField::Command => "command",
            DigitField::CmdParam => "cmd_param",
            DigitField::CmdLength => "cmd_length",
        }
    }
}

impl FromStr for DigitField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(DigitField::Id),
            "device_id" => Ok(DigitField::DeviceId),
            "name" => Ok(DigitField::Name),
            "ratio" => Ok(DigitField::Ratio),
            "mapper" => Ok(DigitField::Mapper),
            "command" => Ok(DigitField::Command),
            "cmd_param" => Ok(DigitField::CmdParam),
            "cmd_length" => Ok(DigitField::CmdLength),
            _ => Err(UnknownField {
                table: DigitInfo::TABLE,
                field: s.to_string(),
            }),
        }
    }
}

/// Input for creating a digital channel
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewDigitInfo {
    #[validate(length(max = 5))]
    pub device_id: Option<String>,
    #[validate(length(max = 64))]
    pub name: Option<String>,
    #[validate(length(max = 64))]
    pub ratio: Option<String>,
    #[validate(length(max = 64))]
    pub mapper: Option<String>,
    #[validate(length(max = 64))]
    pub command: Option<String>,
    #[validate(length(max = 64))]
    pub cmd_param: Option<String>,
    #[validate(length(max = 2))]
    pub cmd_length: Option<String>,
}

impl DigitInfo {
    /// Typed field accessor
    pub fn field(&self, field: DigitField) -> FieldValue<'_> {
        match field {
            DigitField::Id => FieldValue::Id(self.id),
            DigitField::DeviceId => FieldValue::Text(self.device_id.as_deref()),
            DigitField::Name => FieldValue::Text(self.name.as_deref()),
            DigitField::Ratio => FieldValue::Text(self.ratio.as_deref()),
            DigitField::Mapper => FieldValue::Text(self.mapper.as_deref()),
            DigitField::Command => FieldValue::Text(self.command.as_deref()),
            DigitField::CmdParam => FieldValue::Text(self.cmd_param.as_deref()),
            DigitField::CmdLength => FieldValue::Text(self.cmd_length.as_deref()),
        }
    }

    /// Inserts a digital channel
    pub async fn create(pool: &PgPool, data: NewDigitInfo) -> Result<Self, DeviceConfigError> {
        data.validate()?;

        let channel = sqlx::query_as::<_, DigitInfo>(&format!(
            "INSERT INTO digit_info (device_id, name, ratio, mapper, command, cmd_param, cmd_length)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            DIGIT_COLUMNS
        ))
        .bind(data.device_id)
        .bind(data.name)
        .bind(data.ratio)
        .bind(data.mapper)
        .bind(data.command)
        .bind(data.cmd_param)
        .bind(data.cmd_length)
        .fetch_one(pool)
        .await?;

        Ok(channel)
    }

    /// Finds a digital channel by id
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, DigitInfo>(&format!(
            "SELECT {} FROM digit_info WHERE id = $1",
            DIGIT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Channels of one device, in insertion order
    pub async fn list_by_device(pool: &PgPool, device_id: &str) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, DigitInfo>(&format!(
            "SELECT {} FROM digit_info WHERE device_id = $1 ORDER BY id",
            DIGIT_COLUMNS
        ))
        .bind(device_id)
        .fetch_all(pool)
        .await
    }

    /// Lists all digital channels ordered by id
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, DigitInfo>(&format!("SELECT {} FROM digit_info ORDER BY id", DIGIT_COLUMNS))
            .fetch_all(pool)
            .await
    }

    /// Deletes a digital channel
    ///
    /// # Returns
    ///
    /// True if a row was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM digit_info WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl DeviceRecord for DigitInfo {
    const TABLE: &'static str = "digit_info";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "device_id",
        "name",
        "ratio",
        "mapper",
        "command",
        "cmd_param",
        "cmd_length",
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    fn get(&self, field: &str) -> Option<FieldValue<'_>> {
        field.parse::<DigitField>().ok().map(|f| self.field(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DigitInfo {
        DigitInfo {
            id: 5,
            device_id: Some("D0002".to_string()),
            name: Some("door".to_string()),
            ratio: None,
            mapper: Some("0:closed,1:open".to_string()),
            command: Some("01".to_string()),
            cmd_param: Some("0001".to_string()),
            cmd_length: Some("8".to_string()),
        }
    }

    #[test]
    fn test_get_known_fields() {
        let d = sample();
        assert_eq!(d.get("mapper"), Some(FieldValue::Text(Some("0:closed,1:open"))));
        assert_eq!(d.get("ratio"), Some(FieldValue::Text(None)));
        assert_eq!(d.get("id"), Some(FieldValue::Id(5)));
    }

    #[test]
    fn test_get_unknown_field() {
        let d = sample();
        // analog-only columns are not digital fields
        assert_eq!(d.get("unit"), None);
        assert_eq!(d.get("min_value"), None);
    }

    #[test]
    fn test_every_declared_field_resolves() {
        let d = sample();
        for name in DigitInfo::FIELDS {
            assert!(d.get(name).is_some(), "{} should resolve", name);
            assert_eq!(name.parse::<DigitField>().unwrap().as_str(), *name);
        }
        assert!("unit".parse::<DigitField>().is_err());
    }

    #[test]
    fn test_new_digit_validation() {
        let long_cmd = NewDigitInfo {
            cmd_length: Some("123".to_string()),
            ..Default::default()
        };
        assert!(long_cmd.validate().is_err());
        assert!(NewDigitInfo::default().validate().is_ok());
    }
}
