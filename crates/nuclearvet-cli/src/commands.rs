//! Subcommand handlers.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use nuclearvet_core::api::{ApiClient, ApiError, SessionInvalidated};
use nuclearvet_core::auth::{CredentialStore, SessionStore};
use nuclearvet_core::models::{
    AppointmentFilters, AppointmentStatus, PatientFilters, PatientStatus, PaymentMethod,
    PaymentRequest, Species, UserRole,
};
use nuclearvet_core::services::{
    AppointmentService, AuthService, BillingService, InventoryService, NotificationService,
    PatientService, UserService,
};
use nuclearvet_core::{Config, FileStorage};

use crate::render;

/// Printed when the backend rejects the stored token mid-command
const SESSION_EXPIRED_NOTICE: &str = "Session expired. Run `nuclearvet login` to sign in again.";

pub struct Console {
    config: Config,
    session: Arc<SessionStore>,
    api: ApiClient,
}

impl Console {
    /// Restore the persisted session and build a client for the configured backend.
    pub fn open(api_url: Option<String>) -> Result<Self> {
        let config = Config::load().context("Failed to load config")?;
        let storage_path = config.storage_path()?;
        let session = Arc::new(SessionStore::restore(Arc::new(FileStorage::open(
            storage_path,
        ))));

        let api = match api_url.filter(|u| !u.trim().is_empty()) {
            Some(url) => ApiClient::new(url, session.clone()),
            None => ApiClient::from_config(&config, session.clone()),
        }
        .context("Failed to create API client")?;
        debug!(base_url = api.base_url(), authenticated = session.is_authenticated(), "Console ready");

        let on_expired: Arc<dyn SessionInvalidated> = Arc::new(|_login_path: &str| {
            eprintln!("{}", SESSION_EXPIRED_NOTICE);
        });
        let api = api.with_session_invalidated(on_expired);

        Ok(Self {
            config,
            session,
            api,
        })
    }

    fn require_session(&self) -> Result<()> {
        if !self.session.is_authenticated() {
            bail!("Not logged in. Run `nuclearvet login` first.");
        }
        Ok(())
    }

    // ===== Session =====

    pub async fn login(mut self, email: Option<String>, remember: bool) -> Result<()> {
        let email = match email.or_else(|| self.config.last_email.clone()) {
            Some(email) => email,
            None => prompt_email()?,
        };
        if email.is_empty() {
            bail!("Email required");
        }

        let (password, from_keychain) = match CredentialStore::get_password(&email) {
            Ok(password) => (password, true),
            Err(e) => {
                debug!(error = %e, "No remembered password");
                (rpassword::prompt_password("Password: ")?, false)
            }
        };
        if password.is_empty() {
            bail!("Password required");
        }

        // A rejected password is reported below, not as an expired session
        let quiet: Arc<dyn SessionInvalidated> = Arc::new(|_login_path: &str| {});
        let auth = AuthService::new(self.api.clone().with_session_invalidated(quiet));
        let user = match auth.login(&email, &password).await {
            Ok(user) => user,
            Err(e) => {
                error!(error = %e, "Login failed");
                if from_keychain && e.is_unauthorized() {
                    // The remembered password no longer works
                    if let Err(e) = CredentialStore::delete(&email) {
                        warn!(error = %e, "Failed to delete stale credentials");
                    }
                }
                bail!(login_failure_message(&e, self.api.base_url()));
            }
        };

        if remember && !from_keychain {
            if let Err(e) = CredentialStore::store(&email, &password) {
                warn!(error = %e, "Failed to store credentials");
            }
        }

        self.config.last_email = Some(email);
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        }

        info!("Login successful");
        println!("Logged in as {} ({})", user.full_name(), user.role);
        Ok(())
    }

    pub fn logout(self) -> Result<()> {
        let email = self
            .session
            .current_user()
            .map(|u| u.email)
            .or_else(|| self.config.last_email.clone());

        AuthService::new(self.api.clone()).logout();

        if let Some(email) = email {
            if CredentialStore::has_credentials(&email) {
                if let Err(e) = CredentialStore::delete(&email) {
                    warn!(error = %e, "Failed to delete credentials");
                }
            }
        }

        println!("Logged out");
        Ok(())
    }

    pub fn whoami(&self) -> Result<()> {
        match self.session.current_user() {
            Some(user) => println!("{}", render::session_user(&user)),
            None => println!("Not logged in"),
        }
        Ok(())
    }

    pub async fn profile(&self) -> Result<()> {
        self.require_session()?;
        let user = AuthService::new(self.api.clone()).profile().await?;
        println!("{}", render::profile(&user));
        Ok(())
    }

    // ===== Patients =====

    pub async fn patients(
        &self,
        search: Option<String>,
        species: Option<Species>,
        status: Option<PatientStatus>,
        owner_id: Option<i64>,
    ) -> Result<()> {
        self.require_session()?;
        let filters = PatientFilters {
            search,
            species,
            status,
            owner_id,
        };
        let patients = PatientService::new(self.api.clone()).list(&filters).await?;
        println!("{}", render::patients(&patients));
        Ok(())
    }

    pub async fn patient(&self, id: i64) -> Result<()> {
        self.require_session()?;
        let service = PatientService::new(self.api.clone());
        let (patient, history) =
            futures::try_join!(service.get(id), service.medical_history(id))?;
        println!("{}", render::patient_detail(&patient, &history));
        Ok(())
    }

    // ===== Appointments =====

    pub async fn appointments(
        &self,
        date: Option<String>,
        status: Option<AppointmentStatus>,
        vet_id: Option<i64>,
    ) -> Result<()> {
        self.require_session()?;
        if let Some(date) = &date {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", date))?;
        }
        let filters = AppointmentFilters {
            date,
            status,
            vet_id,
            ..Default::default()
        };
        let appointments = AppointmentService::new(self.api.clone())
            .list(&filters)
            .await?;
        println!("{}", render::appointments(&appointments));
        Ok(())
    }

    pub async fn today(&self) -> Result<()> {
        self.require_session()?;
        let service = AppointmentService::new(self.api.clone());
        let (appointments, summary) = futures::try_join!(service.today(), service.summary())?;
        println!("{}\n", render::appointment_summary(&summary));
        println!("{}", render::appointments(&appointments));
        Ok(())
    }

    // ===== Inventory =====

    pub async fn inventory(&self, low_stock: bool, expiring: Option<u32>) -> Result<()> {
        self.require_session()?;
        let service = InventoryService::new(self.api.clone());
        let products = if low_stock {
            service.low_stock().await?
        } else if let Some(days) = expiring {
            service.expiring(Some(days)).await?
        } else {
            service.list(&Default::default()).await?
        };
        println!("{}", render::products(&products));
        Ok(())
    }

    pub async fn inventory_summary(&self) -> Result<()> {
        self.require_session()?;
        let summary = InventoryService::new(self.api.clone()).summary().await?;
        println!("{}", render::inventory_summary(&summary));
        Ok(())
    }

    // ===== Billing =====

    pub async fn invoices(&self, client_id: Option<i64>, overdue: bool) -> Result<()> {
        self.require_session()?;
        let service = BillingService::new(self.api.clone());
        let invoices = match client_id {
            Some(id) => service.invoices_by_client(id).await?,
            None if overdue => service.overdue().await?,
            None => service.pending().await?,
        };
        println!("{}", render::invoices(&invoices));
        Ok(())
    }

    pub async fn pay(
        &self,
        invoice_id: i64,
        amount: f64,
        method: PaymentMethod,
        reference: Option<String>,
    ) -> Result<()> {
        self.require_session()?;
        let cashier = self
            .session
            .current_user()
            .context("No user in the current session")?;
        let mut request = PaymentRequest::new(invoice_id, amount, method, cashier.id);
        request.transaction_reference = reference;
        request.validate().map_err(anyhow::Error::msg)?;

        let payment = BillingService::new(self.api.clone())
            .register_payment(&request)
            .await
            .map_err(|e| anyhow::anyhow!("Payment rejected: {}", e.message()))?;
        info!(invoice_id, payment_id = payment.id, "Payment registered");
        println!("{}", render::payment(&payment));
        Ok(())
    }

    // ===== Notifications & users =====

    pub async fn notifications(&self, recipient_id: i64, unread_only: bool) -> Result<()> {
        self.require_session()?;
        let service = NotificationService::new(self.api.clone());
        let listing = async {
            if unread_only {
                service.unread(recipient_id).await
            } else {
                service.for_recipient(recipient_id).await
            }
        };
        let (notifications, unread_count) =
            futures::try_join!(listing, service.unread_count(recipient_id))?;
        println!("{}", render::notifications(&notifications, unread_count));
        Ok(())
    }

    pub async fn users(&self, role: Option<UserRole>) -> Result<()> {
        self.require_session()?;
        let service = UserService::new(self.api.clone());
        let users = match role {
            Some(role) => service.by_role(&role).await?,
            None => service.list().await?,
        };
        println!("{}", render::users(&users));
        Ok(())
    }
}

fn prompt_email() -> Result<String> {
    print!("Email: ");
    io::stdout().flush()?;

    let mut email = String::new();
    io::stdin().read_line(&mut email)?;
    Ok(email.trim().to_string())
}

/// User-facing explanation for a failed login
fn login_failure_message(err: &ApiError, base_url: &str) -> String {
    match err {
        ApiError::Unauthorized { .. } => "Invalid email or password".to_string(),
        ApiError::Network(e) if e.is_timeout() => {
            "Connection timed out. Please try again.".to_string()
        }
        ApiError::Network(_) => format!(
            "Unable to connect to {}. Check that the backend is running.",
            base_url
        ),
        other => format!("Login failed: {}", other.message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nuclearvet_core::api::StatusCode;

    #[test]
    fn test_login_failure_messages() {
        let unauthorized = ApiError::from_status(StatusCode::UNAUTHORIZED, "");
        assert_eq!(
            login_failure_message(&unauthorized, "http://localhost:8080/api"),
            "Invalid email or password"
        );

        let locked = ApiError::from_status(StatusCode::FORBIDDEN, r#"{"mensaje":"Cuenta bloqueada"}"#);
        assert_eq!(
            login_failure_message(&locked, "http://localhost:8080/api"),
            "Login failed: Cuenta bloqueada"
        );
    }
}
