//! Authentication state for the console.
//!
//! This module provides:
//! - `SessionStore`: the logged-in identity, persisted through durable storage
//!   and restored on startup
//! - `CredentialStore`: optional remembered passwords in the OS keychain
//!
//! A session is cleared by an explicit logout or by any 401 the API client sees.

pub mod credentials;
pub mod session;

pub use credentials::CredentialStore;
pub use session::{SessionError, SessionState, SessionStore};
