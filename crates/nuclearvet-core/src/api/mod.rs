//! REST API client module for the NuclearVet backend.
//!
//! This module provides the `ApiClient` that every feature service calls.
//! Requests carry the session's JWT as a bearer token; a 401 response ends
//! the session and triggers the injected `SessionInvalidated` hook.

pub mod client;
pub mod error;
pub mod options;

pub use client::{ApiClient, SessionInvalidated, LOGIN_PATH, NO_BODY};
pub use error::ApiError;
pub use options::RequestOptions;
pub use reqwest::StatusCode;
