/// Role model and database operations
///
/// A role groups users; each user references at most one role through the
/// nullable `users.role_id` column. The relationship is resolved on demand
/// with [`Role::users`] rather than loaded eagerly.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE roles (
///     id SERIAL PRIMARY KEY,
///     name VARCHAR(64) UNIQUE
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use devmon_core::models::role::Role;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let admin = Role::create(&pool, "admin").await?;
/// let members = admin.users(&pool).await?;
/// println!("{} has {} users", admin, members.len());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;

use super::user::User;

/// A named group of users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Role {
    /// Auto-increment id
    pub id: i32,

    /// Unique role name
    pub name: Option<String>,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "<Role '{}'>", name),
            None => write!(f, "<Role None>"),
        }
    }
}

impl Role {
    /// Creates a role
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken (unique constraint violation)
    /// or the database is unreachable
    pub async fn create(pool: &PgPool, name: &str) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Role>("INSERT INTO roles (name) VALUES ($1) RETURNING id, name")
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Finds a role by id
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Role>("SELECT id, name FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Finds a role by its unique name
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Role>("SELECT id, name FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Lists all roles ordered by id
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Role>("SELECT id, name FROM roles ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Users that reference this role
    pub async fn users(&self, pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        User::list_by_role(pool, self.id).await
    }

    /// Deletes a role
    ///
    /// Fails with a foreign key violation while users still reference it.
    ///
    /// # Returns
    ///
    /// True if a role was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
