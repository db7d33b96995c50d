/// Database models
///
/// # Account store
///
/// - `role`: named user groups
/// - `user`: accounts, credentials and email confirmation
///
/// # Device configuration store
///
/// - `project_info`: device to project assignment
/// - `analog_info`: analog channel definitions
/// - `digit_info`: digital channel definitions
/// - `fields`: field lookup shared by the three record types
///
/// The two stores are independent. The only reference between records is
/// `users.role_id`; device records point at devices through the soft
/// `device_id` key.

pub mod analog_info;
pub mod digit_info;
pub mod fields;
pub mod project_info;
pub mod role;
pub mod user;
