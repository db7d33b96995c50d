/// Database layer
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with health checks
/// - `migrations`: embedded schema migrations
///
/// Record types and their queries live in [`crate::models`].

pub mod migrations;
pub mod pool;
