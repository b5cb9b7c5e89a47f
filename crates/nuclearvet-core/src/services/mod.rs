//! Typed wrappers over `ApiClient`, one per console module.
//!
//! Services hold a clone of the client, so they share its connection pool,
//! session and 401 handling. Payloads are accepted bare or inside the
//! backend's `{exitoso, mensaje, data}` envelope.

pub mod appointments;
pub mod auth;
pub mod billing;
pub mod inventory;
pub mod notifications;
pub mod patients;
pub mod users;

pub use appointments::AppointmentService;
pub use auth::AuthService;
pub use billing::BillingService;
pub use inventory::InventoryService;
pub use notifications::NotificationService;
pub use patients::PatientService;
pub use users::UserService;
