//! NuclearVet console - a terminal client for the NuclearVet clinic backend.
//!
//! Each subcommand restores the persisted session, performs its calls through
//! the authenticated API client and prints the result.

mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use nuclearvet_core::models::{AppointmentStatus, PatientStatus, PaymentMethod, Species, UserRole};

use commands::Console;

#[derive(Debug, Parser)]
#[command(name = "nuclearvet", version, about = "NuclearVet clinic console")]
struct Cli {
    /// Backend base URL (overrides NUCLEARVET_API_URL and the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and start a session
    Login {
        #[arg(long)]
        email: Option<String>,
        /// Keep the password in the OS keychain for the next login
        #[arg(long, default_value_t = false)]
        remember: bool,
    },
    /// End the session and forget remembered credentials
    Logout,
    /// Show the logged-in user from the local session
    Whoami,
    /// Fetch the logged-in user's profile from the backend
    Profile,
    /// List patients
    Patients {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        species: Option<Species>,
        #[arg(long)]
        status: Option<PatientStatus>,
        #[arg(long)]
        owner: Option<i64>,
    },
    /// Show one patient with their medical history
    Patient { id: i64 },
    /// List appointments
    Appointments {
        /// Day in YYYY-MM-DD form
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        status: Option<AppointmentStatus>,
        #[arg(long)]
        vet: Option<i64>,
    },
    /// Today's appointments and the appointment summary
    Today,
    /// List inventory products
    Inventory {
        #[arg(long, conflicts_with = "expiring")]
        low_stock: bool,
        /// Products expiring within this many days
        #[arg(long)]
        expiring: Option<u32>,
    },
    /// Inventory totals
    InventorySummary,
    /// List invoices for a client, or the pending queue (default) or the overdue one
    Invoices {
        #[arg(long, conflicts_with_all = ["pending", "overdue"])]
        client: Option<i64>,
        #[arg(long, conflicts_with = "overdue")]
        pending: bool,
        #[arg(long)]
        overdue: bool,
    },
    /// Record a payment against an invoice
    Pay {
        invoice: i64,
        amount: f64,
        #[arg(long, default_value = "efectivo")]
        method: PaymentMethod,
        /// Card voucher or transfer reference
        #[arg(long)]
        reference: Option<String>,
    },
    /// Notifications for a recipient
    Notifications {
        recipient: i64,
        #[arg(long)]
        unread: bool,
    },
    /// List console users
    Users {
        #[arg(long)]
        role: Option<UserRole>,
    },
}

/// Initialize the tracing subscriber for logging.
///
/// Output goes to stderr through a non-blocking writer; the returned guard
/// flushes it on drop and must live until exit.
fn init_tracing() -> WorkerGuard {
    // RUST_LOG controls the level (e.g., RUST_LOG=nuclearvet_core=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_target(false))
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _guard = init_tracing();
    let cli = Cli::parse();
    info!(command = ?cli.command, "NuclearVet console starting");

    let console = Console::open(cli.api_url)?;
    match cli.command {
        Command::Login { email, remember } => console.login(email, remember).await,
        Command::Logout => console.logout(),
        Command::Whoami => console.whoami(),
        Command::Profile => console.profile().await,
        Command::Patients {
            search,
            species,
            status,
            owner,
        } => console.patients(search, species, status, owner).await,
        Command::Patient { id } => console.patient(id).await,
        Command::Appointments { date, status, vet } => {
            console.appointments(date, status, vet).await
        }
        Command::Today => console.today().await,
        Command::Inventory {
            low_stock,
            expiring,
        } => console.inventory(low_stock, expiring).await,
        Command::InventorySummary => console.inventory_summary().await,
        Command::Invoices {
            client,
            pending: _,
            overdue,
        } => console.invoices(client, overdue).await,
        Command::Pay {
            invoice,
            amount,
            method,
            reference,
        } => console.pay(invoice, amount, method, reference).await,
        Command::Notifications { recipient, unread } => {
            console.notifications(recipient, unread).await
        }
        Command::Users { role } => console.users(role).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login() {
        let cli = Cli::try_parse_from(["nuclearvet", "login", "--email", "ana@nuclearvet.co", "--remember"])
            .unwrap();
        match cli.command {
            Command::Login { email, remember } => {
                assert_eq!(email.as_deref(), Some("ana@nuclearvet.co"));
                assert!(remember);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_api_url_is_global() {
        let cli = Cli::try_parse_from(["nuclearvet", "today", "--api-url", "http://vet:9000/api"]).unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://vet:9000/api"));
    }

    #[test]
    fn test_parse_filters() {
        let cli = Cli::try_parse_from([
            "nuclearvet", "patients", "--species", "gato", "--status", "ACTIVO", "--owner", "3",
        ])
        .unwrap();
        match cli.command {
            Command::Patients {
                species,
                status,
                owner,
                search,
            } => {
                assert_eq!(species, Some(Species::Gato));
                assert_eq!(status, Some(PatientStatus::Activo));
                assert_eq!(owner, Some(3));
                assert!(search.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["nuclearvet", "appointments", "--status", "maybe"]).is_err());
    }

    #[test]
    fn test_inventory_modes_conflict() {
        assert!(
            Cli::try_parse_from(["nuclearvet", "inventory", "--low-stock", "--expiring", "7"]).is_err()
        );
    }

    #[test]
    fn test_parse_role() {
        let cli = Cli::try_parse_from(["nuclearvet", "users", "--role", "recepcionista"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Users {
                role: Some(UserRole::Recepcionista)
            }
        ));
    }

    #[test]
    fn test_parse_payment() {
        let cli = Cli::try_parse_from([
            "nuclearvet", "pay", "31", "69000", "--method", "tarjeta-credito", "--reference", "VOU-7",
        ])
        .unwrap();
        match cli.command {
            Command::Pay {
                invoice,
                amount,
                method,
                reference,
            } => {
                assert_eq!(invoice, 31);
                assert_eq!(amount, 69000.0);
                assert_eq!(method, PaymentMethod::TarjetaCredito);
                assert_eq!(reference.as_deref(), Some("VOU-7"));
            }
            other => panic!("unexpected command {:?}", other),
        }

        let cli = Cli::try_parse_from(["nuclearvet", "pay", "31", "10"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Pay {
                method: PaymentMethod::Efectivo,
                ..
            }
        ));
    }

    #[test]
    fn test_invoice_queues_conflict() {
        assert!(Cli::try_parse_from(["nuclearvet", "invoices", "--pending", "--overdue"]).is_err());
        assert!(Cli::try_parse_from(["nuclearvet", "invoices", "--client", "3", "--overdue"]).is_err());
        let cli = Cli::try_parse_from(["nuclearvet", "invoices", "--client", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Invoices {
                client: Some(3),
                overdue: false,
                ..
            }
        ));
    }
}
