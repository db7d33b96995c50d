/// Project info: which device belongs to which project
///
/// # Schema
///
/// ```sql
/// CREATE TABLE project_info (
///     id SERIAL PRIMARY KEY,
///     device_id VARCHAR(5),
///     device_name VARCHAR(64),
///     project_name VARCHAR(64),
///     device_com VARCHAR(64),
///     protocol VARCHAR(64)
/// );
/// ```
///
/// `device_id` is a logical reference; nothing enforces that it is unique
/// or that channels exist for it.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use super::fields::{DeviceConfigError, DeviceRecord, FieldValue, UnknownField};

const PROJECT_COLUMNS: &str = "id, device_id, device_name, project_name, device_com, protocol";

/// A monitored device and the project it is deployed in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectInfo {
    /// Auto-increment id
    pub id: i32,
    /// Device this row describes (up to 5 characters)
    pub device_id: Option<String>,
    /// Human-readable device name
    pub device_name: Option<String>,
    /// Project the device is deployed in
    pub project_name: Option<String>,
    /// Communication port the device is reached on
    pub device_com: Option<String>,
    /// Wire protocol spoken on that port
    pub protocol: Option<String>,
}

/// Columns of `project_info`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectField {
    /// `id`
    Id,
    /// `device_id`
    DeviceId,
    /// `device_name`
    DeviceName,
    /// `project_name`
    ProjectName,
    /// `device_com`
    DeviceCom,
    /// `protocol`
    Protocol,
}

impl ProjectField {
    /// Column name as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectField::Id => "id",
            ProjectField::DeviceId => "device_id",
            ProjectField::DeviceName => "device_name",
            ProjectField::ProjectName => "project_name",
            ProjectField::DeviceCom => "device_com",
            ProjectField::Protocol => "protocol",
        }
    }
}

impl FromStr for ProjectField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(ProjectField::Id),
            "device_id" => Ok(ProjectField::DeviceId),
            "device_name" => Ok(ProjectField::DeviceName),
            "project_name" => Ok(ProjectField::ProjectName),
            "device_com" => Ok(ProjectField::DeviceCom),
            "protocol" => Ok(ProjectField::Protocol),
            _ => Err(UnknownField {
                table: ProjectInfo::TABLE,
                field: s.to_string(),
            }),
        }
    }
}

/// Input for creating a project entry
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewProjectInfo {
    #[validate(length(max = 5))]
    pub device_id: Option<String>,
    #[validate(length(max = 64))]
    pub device_name: Option<String>,
    #[validate(length(max = 64))]
    pub project_name: Option<String>,
    #[validate(length(max = 64))]
    pub device_com: Option<String>,
    #[validate(length(max = 64))]
    pub protocol: Option<String>,
}

impl ProjectInfo {
    /// Typed field accessor
    pub fn field(&self, field: ProjectField) -> FieldValue<'_> {
        match field {
            ProjectField::Id => FieldValue::Id(self.id),
            ProjectField::DeviceId => FieldValue::Text(self.device_id.as_deref()),
            ProjectField::DeviceName => FieldValue::Text(self.device_name.as_deref()),
            ProjectField::ProjectName => FieldValue::Text(self.project_name.as_deref()),
            ProjectField::DeviceCom => FieldValue::Text(self.device_com.as_deref()),
            ProjectField::Protocol => FieldValue::Text(self.protocol.as_deref()),
        }
    }

    /// Inserts a project entry
    pub async fn create(pool: &PgPool, data: NewProjectInfo) -> Result<Self, DeviceConfigError> {
        data.validate()?;

        let project = sqlx::query_as::<_, ProjectInfo>(&format!(
            "INSERT INTO project_info (device_id, device_name, project_name, device_com, protocol)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            PROJECT_COLUMNS
        ))
        .bind(data.device_id)
        .bind(data.device_name)
        .bind(data.project_name)
        .bind(data.device_com)
        .bind(data.protocol)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project entry by id
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, ProjectInfo>(&format!(
            "SELECT {} FROM project_info WHERE id = $1",
            PROJECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// First project entry (lowest id) naming `device_id`
    pub async fn find_by_device(pool: &PgPool, device_id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, ProjectInfo>(&format!(
            "SELECT {} FROM project_info WHERE device_id = $1 ORDER BY id LIMIT 1",
            PROJECT_COLUMNS
        ))
        .bind(device_id)
        .fetch_optional(pool)
        .await
    }

    /// All project entries naming `device_id`
    pub async fn list_by_device(pool: &PgPool, device_id: &str) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ProjectInfo>(&format!(
            "SELECT {} FROM project_info WHERE device_id = $1 ORDER BY id",
            PROJECT_COLUMNS
        ))
        .bind(device_id)
        .fetch_all(pool)
        .await
    }

    /// Lists all project entries ordered by id
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ProjectInfo>(&format!(
            "SELECT {} FROM project_info ORDER BY id",
            PROJECT_COLUMNS
        ))
        .fetch_all(pool)
        .await
    }

    /// Deletes a project entry
    ///
    /// # Returns
    ///
    /// True if a row was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_info WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl DeviceRecord for ProjectInfo {
    const TABLE: &'static str = "project_info";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "device_id",
        "device_name",
        "project_name",
        "device_com",
        "protocol",
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    fn get(&self, field: &str) -> Option<FieldValue<'_>> {
        field.parse::<ProjectField>().ok().map(|f| self.field(f))
    }
}

impl fmt::Display for ProjectInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.device_id {
            Some(device_id) => write!(f, "<device_id '{}'>", device_id),
            None => write!(f, "<device_id None>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProjectInfo {
        ProjectInfo {
            id: 1,
            device_id: Some("D0001".to_string()),
            device_name: Some("boiler".to_string()),
            project_name: Some("plant-a".to_string()),
            device_com: Some("COM3".to_string()),
            protocol: None,
        }
    }

    #[test]
    fn test_get_known_fields() {
        let p = sample();
        assert_eq!(p.get("id"), Some(FieldValue::Id(1)));
        assert_eq!(p.get("device_id"), Some(FieldValue::Text(Some("D0001"))));
        assert_eq!(p.get("device_com"), Some(FieldValue::Text(Some("COM3"))));
        assert_eq!(p.get("protocol"), Some(FieldValue::Text(None)));
    }

    #[test]
    fn test_get_unknown_field() {
        let p = sample();
        assert_eq!(p.get("relation_table"), None);
        assert_eq!(p.get("Device_Id"), None);
        assert_eq!(p.get(""), None);
    }

    #[test]
    fn test_field_names_round_trip() {
        for name in ProjectInfo::FIELDS {
            let field: ProjectField = name.parse().expect("declared field should parse");
            assert_eq!(field.as_str(), *name);
        }
        assert!("nope".parse::<ProjectField>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "<device_id 'D0001'>");
    }

    #[test]
    fn test_new_project_validation() {
        let ok = NewProjectInfo {
            device_id: Some("D0001".to_string()),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let long_id = NewProjectInfo {
            device_id: Some("D00001".to_string()),
            ..Default::default()
        };
        assert!(long_id.validate().is_err());
    }
}
