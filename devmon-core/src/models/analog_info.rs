/// Analog channel definitions
///
/// An analog channel is a measured quantity on a device: how to read it
/// (`command`, `cmd_param`, `cmd_length`), how to scale it (`ratio`,
/// `precision`), and its expected range. Every quantity is stored as text;
/// parsing and range checks belong to whoever talks to the device.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE analog_info (
///     id SERIAL PRIMARY KEY,
///     device_id VARCHAR(5),
///     name VARCHAR(64),
///     unit VARCHAR(64),
///     value_type VARCHAR(64),
///     precision VARCHAR(64),
///     min_value VARCHAR(64),
///     max_value VARCHAR(64),
///     ratio VARCHAR(64),
///     command VARCHAR(64),
///     cmd_param VARCHAR(64),
///     cmd_length VARCHAR(2)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use devmon_core::models::analog_info::AnalogInfo;
/// use devmon_core::models::fields::DeviceRecord;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// for channel in AnalogInfo::list_by_device(&pool, "D0001").await? {
///     let unit = channel.get("unit");
///     println!("{:?} {:?}", channel.name, unit);
/// }
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::str::FromStr;
use validator::Validate;

use super::fields::{DeviceConfigError, DeviceRecord, FieldValue, UnknownField};

const ANALOG_COLUMNS: &str = "id, device_id, name, unit, value_type, precision, min_value, \
                              max_value, ratio, command, cmd_param, cmd_length";

/// One analog channel of a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AnalogInfo {
    /// Auto-increment id
    pub id: i32,
    /// Device this row describes (up to 5 characters)
    pub device_id: Option<String>,
    /// Channel name
    pub name: Option<String>,
    /// Engineering unit of the reading
    pub unit: Option<String>,
    /// Declared type of the reading
    pub value_type: Option<String>,
    /// Number of decimal places to display
    pub precision: Option<String>,
    /// Lower bound of the expected range
    pub min_value: Option<String>,
    /// Upper bound of the expected range
    pub max_value: Option<String>,
    /// Scaling factor applied to the raw reading
    pub ratio: Option<String>,
    /// Command sent to read the channel
    pub command: Option<String>,
    /// Parameter appended to the command
    pub cmd_param: Option<String>,
    /// Length of the command frame, at most two characters
    pub cmd_length: Option<String>,
}

/// Columns of `analog_info`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalogField {
    /// `id`
    Id,
    /// `device_id`
    DeviceId,
    /// `name`
    Name,
    /// `unit`
    Unit,
    /// `value_type`
    ValueType,
    /// `precision`
    Precision,
    /// `min_value`
    MinValue,
    /// `max_value`
    MaxValue,
    /// `ratio`
    Ratio,
    /// `command`
    Command,
    /// `cmd_param`
    CmdParam,
    /// `cmd_length`
    CmdLength,
}

impl AnalogField {
    /// Column name as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalogField::Id => "id",
            AnalogField::DeviceId => "device_id",
            AnalogField::Name => "name",
            AnalogField::Unit => "unit",
            AnalogField::ValueType => "value_type",
            AnalogField::Precision => "precision",
            AnalogField::MinValue => "min_value",
            AnalogField::MaxValue => "max_value",
            AnalogField::Ratio => "ratio",
            AnalogField::Command => "command",
            AnalogField::CmdParam => "cmd_param",
            AnalogField::CmdLength => "cmd_length",
        }
    }
}

impl FromStr for AnalogField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(AnalogField::Id),
            "device_id" => Ok(AnalogField::DeviceId),
            "name" => Ok(AnalogField::Name),
            "unit" => Ok(AnalogField::Unit),
            "value_type" => Ok(AnalogField::ValueType),
            "precision" => Ok(AnalogField::Precision),
            "min_value" => Ok(AnalogField::MinValue),
            "max_value" => Ok(AnalogField::MaxValue),
            "ratio" => Ok(AnalogField::Ratio),
            "command" => Ok(AnalogField::Command),
            "cmd_param" => Ok(AnalogField::CmdParam),
            "cmd_length" => Ok(AnalogField::CmdLength),
            _ => Err(UnknownField {
                table: AnalogInfo::TABLE,
                field: s.to_string(),
            }),
        }
    }
}

/// Input for creating an analog channel
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewAnalogInfo {
    #[validate(length(max = 5))]
    pub device_id: Option<String>,
    #[validate(length(max = 64))]
    pub name: Option<String>,
    #[validate(length(max = 64))]
    pub unit: Option<String>,
    #[validate(length(max = 64))]
    pub value_type: Option<String>,
    #[validate(length(max = 64))]
    pub precision: Option<String>,
    #[validate(length(max = 64))]
    pub min_value: Option<String>,
    #[validate(length(max = 64))]
    pub max_value: Option<String>,
    #[validate(length(max = 64))]
    pub ratio: Option<String>,
    #[validate(length(max = 64))]
    pub command: Option<String>,
    #[validate(length(max = 64))]
    pub cmd_param: Option<String>,
    #[validate(length(max = 2))]
    pub cmd_length: Option<String>,
}

impl AnalogInfo {
    /// Typed field accessor
    pub fn field(&self, field: AnalogField) -> FieldValue<'_> {
        match field {
            AnalogField::Id => FieldValue::Id(self.id),
            AnalogField::DeviceId => FieldValue::Text(self.device_id.as_deref()),
            AnalogField::Name => FieldValue::Text(self.name.as_deref()),
            AnalogField::Unit => FieldValue::Text(self.unit.as_deref()),
            AnalogField::ValueType => FieldValue::Text(self.value_type.as_deref()),
            AnalogField::Precision => FieldValue::Text(self.precision.as_deref()),
            AnalogField::MinValue => FieldValue::Text(self.min_value.as_deref()),
            AnalogField::MaxValue => FieldValue::Text(self.max_value.as_deref()),
            AnalogField::Ratio => FieldValue::Text(self.ratio.as_deref()),
            AnalogField::Command => FieldValue::Text(self.command.as_deref()),
            AnalogField::CmdParam => FieldValue::Text(self.cmd_param.as_deref()),
            AnalogField::CmdLength => FieldValue::Text(self.cmd_length.as_deref()),
        }
    }

    /// Inserts an analog channel
    ///
    /// # Errors
    ///
    /// `DeviceConfigError::Validation` if `device_id` exceeds 5 characters,
    /// `cmd_length` exceeds 2, or any other field exceeds 64
    pub async fn create(pool: &PgPool, data: NewAnalogInfo) -> Result<Self, DeviceConfigError> {
        data.validate()?;

        let channel = sqlx::query_as::<_, AnalogInfo>(&format!(
            "INSERT INTO analog_info (device_id, name, unit, value_type, precision, min_value,
                                      max_value, ratio, command, cmd_param, cmd_length)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {}",
            ANALOG_COLUMNS
        ))
        .bind(data.device_id)
        .bind(data.name)
        .bind(data.unit)
        .bind(data.value_type)
        .bind(data.precision)
        .bind(data.min_value)
        .bind(data.max_value)
        .bind(data.ratio)
        .bind(data.command)
        .bind(data.cmd_param)
        .bind(data.cmd_length)
        .fetch_one(pool)
        .await?;

        Ok(channel)
    }

    /// Finds a analog channel by id
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, AnalogInfo>(&format!(
            "SELECT {} FROM analog_info WHERE id = $1",
            ANALOG_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Channels of one device, in insertion order
    pub async fn list_by_device(pool: &PgPool, device_id: &str) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, AnalogInfo>(&format!(
            "SELECT {} FROM analog_info WHERE device_id = $1 ORDER BY id",
            ANALOG_COLUMNS
        ))
        .bind(device_id)
        .fetch_all(pool)
        .await
    }

    /// Lists all analog channels ordered by id
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, AnalogInfo>(&format!(
            "SELECT {} FROM analog_info ORDER BY id",
            ANALOG_COLUMNS
        ))
        .fetch_all(pool)
        .await
    }

    /// Deletes a analog channel
    ///
    /// # Returns
    ///
    /// True if a row was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM analog_info WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl DeviceRecord for AnalogInfo {
    const TABLE: &'static str = "analog_info";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "device_id",
        "name",
        "unit",
        "value_type",
        "precision",
        "min_value",
        "max_value",
        "ratio",
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
        field.parse::<AnalogField>().ok().map(|f| self.field(f))
    }
}
