//! Core library for the NuclearVet clinic console.
//!
//! The console is a thin client over the NuclearVet REST backend. This crate
//! holds everything below the presentation layer:
//!
//! - [`storage`]: durable key/value storage for session data
//! - [`auth`]: the session store and remembered credentials
//! - [`api`]: the authenticated HTTP client
//! - [`services`]: typed calls for patients, appointments, inventory,
//!   notifications and users
//! - [`models`]: backend entities
//! - [`config`]: backend URL and local paths

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use api::{ApiClient, ApiError, RequestOptions, SessionInvalidated, LOGIN_PATH};
pub use auth::{SessionState, SessionStore};
pub use config::Config;
pub use storage::{FileStorage, MemoryStorage, Storage};
