//! Data models for NuclearVet backend entities.
//!
//! Field names are English on the Rust side and renamed to the backend's
//! wire names with serde:
//!
//! - `AuthenticatedUser`, `UserUpdate`, `User`: identities and accounts
//! - `Patient`: clinic patients and their owners
//! - `Appointment`: scheduled visits
//! - `Product`, `InventoryMovement`: stock
//! - `Notification`: messages sent to staff and clients
//! - `Invoice`, `Payment`: billing
//! - `ApiResponse`, `Payload`, `ErrorBody`: envelopes shared by all endpoints

pub mod appointment;
pub mod billing;
pub mod common;
pub mod inventory;
pub mod notification;
pub mod patient;
pub mod user;

pub use appointment::{
    Appointment, AppointmentFilters, AppointmentForm, AppointmentStatus, AppointmentSummary,
    AppointmentType,
};
pub use billing::{
    Invoice, InvoiceItem, InvoiceItemRequest, InvoiceItemType, InvoiceRequest, InvoiceStatus,
    Payment, PaymentMethod, PaymentRequest,
};
pub use common::{ApiResponse, ErrorBody, Payload};
pub use inventory::{
    InventoryMovement, InventorySummary, MovementType, Product, ProductCategory, ProductFilters,
    ProductForm, StockMovementRequest, StockStatus,
};
pub use notification::{Notification, NotificationChannel, NotificationStatus, NotificationType};
pub use patient::{Patient, PatientFilters, PatientForm, PatientStatus, Sex, Species};
pub use user::{AuthResponse, AuthenticatedUser, LoginRequest, User, UserRole, UserUpdate};
