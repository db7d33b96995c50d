//! # Devmon Core
//!
//! Persistence layer for the device monitoring application: user accounts
//! with roles and email confirmation, and the configuration records that
//! describe monitored devices and their analog and digital channels.
//!
//! ## Module Organization
//!
//! - `config`: Configuration loaded from the environment
//! - `db`: Connection pool and embedded migrations
//! - `auth`: Password hashing and confirmation tokens
//! - `models`: Database models and their queries

pub mod auth;
pub mod config;
pub mod db;
pub mod models;

/// Current version of the devmon core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
