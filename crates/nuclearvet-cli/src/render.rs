//! Plain-text rendering of backend entities for the terminal.

use std::fmt::Write;

use nuclearvet_core::models::{
    Appointment, AppointmentSummary, AuthenticatedUser, InventorySummary, Invoice, Notification,
    Patient, Payment, Product, StockStatus, User,
};
use nuclearvet_core::utils::{format_date, format_money, format_optional, truncate_string};

// Column widths
const NAME_WIDTH: usize = 24;
const REASON_WIDTH: usize = 28;
const SUBJECT_WIDTH: usize = 40;

pub fn session_user(user: &AuthenticatedUser) -> String {
    format!(
        "{} <{}>\nRole: {}\nUser id: {}",
        user.full_name(),
        user.email,
        user.role,
        user.id
    )
}

pub fn profile(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} <{}>", user.display_name(), user.email);
    let _ = writeln!(out, "Roles: {}", user.roles.join(", "));
    let _ = writeln!(out, "Phone: {}", format_optional(&user.phone, "-"));
    let _ = writeln!(out, "Document: {}", format_optional(&user.id_document, "-"));
    let last_access = user
        .last_access
        .as_deref()
        .map(format_date)
        .unwrap_or_else(|| "never".to_string());
    let _ = write!(out, "Last access: {}", last_access);
    out
}

pub fn patients(patients: &[Patient]) -> String {
    if patients.is_empty() {
        return "No patients found".to_string();
    }
    let mut out = format!(
        "{:>6}  {:<w$}  {:<8}  {:<12}  {}\n",
        "ID",
        "NAME",
        "SPECIES",
        "STATUS",
        "OWNER",
        w = NAME_WIDTH
    );
    for p in patients {
        let owner = p
            .owner_name
            .clone()
            .unwrap_or_else(|| format!("#{}", p.owner_id));
        let _ = writeln!(
            out,
            "{:>6}  {:<w$}  {:<8}  {:<12}  {}",
            p.id,
            truncate_string(&p.name, NAME_WIDTH),
            p.species.as_str(),
            p.status.as_str(),
            owner,
            w = NAME_WIDTH
        );
    }
    out.trim_end().to_string()
}

pub fn patient_detail(patient: &Patient, history: &serde_json::Value) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", patient.name, patient.id);
    let _ = writeln!(
        out,
        "Species: {}  Breed: {}",
        patient.species.as_str(),
        format_optional(&patient.breed, "-")
    );
    if let Some(age) = patient.age {
        let _ = writeln!(out, "Age: {}", age);
    }
    if let Some(weight) = patient.weight {
        let _ = writeln!(out, "Weight: {:.1} kg", weight);
    }
    let _ = writeln!(out, "Status: {}", patient.status.as_str());
    let _ = writeln!(
        out,
        "Owner: {} ({})",
        patient
            .owner_name
            .clone()
            .unwrap_or_else(|| format!("#{}", patient.owner_id)),
        format_optional(&patient.owner_phone, "no phone")
    );
    if let Some(record) = &patient.medical_record_number {
        let _ = writeln!(out, "Record: {}", record);
    }

    let _ = writeln!(out, "\nMedical history:");
    match history {
        serde_json::Value::Null => out.push_str("  (none)"),
        serde_json::Value::Array(entries) if entries.is_empty() => out.push_str("  (none)"),
        other => {
            let pretty = serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string());
            out.push_str(&pretty);
        }
    }
    out
}

pub fn appointments(appointments: &[Appointment]) -> String {
    if appointments.is_empty() {
        return "No appointments".to_string();
    }
    let mut out = format!(
        "{:>6}  {:<12}  {:<5}  {:<w$}  {:<12}  {}\n",
        "ID",
        "DATE",
        "TIME",
        "PATIENT",
        "STATUS",
        "REASON",
        w = NAME_WIDTH
    );
    for a in appointments {
        let patient = a
            .patient_name
            .clone()
            .unwrap_or_else(|| format!("#{}", a.patient_id));
        let _ = writeln!(
            out,
            "{:>6}  {:<12}  {:<5}  {:<w$}  {:<12}  {}",
            a.id,
            format_date(&a.date),
            truncate_string(&a.time, 5),
            truncate_string(&patient, NAME_WIDTH),
            a.status.as_str(),
            truncate_string(&format_optional(&a.reason, ""), REASON_WIDTH),
            w = NAME_WIDTH
        );
    }
    out.trim_end().to_string()
}

pub fn appointment_summary(summary: &AppointmentSummary) -> String {
    format!(
        "Today: {}  Confirmed: {}  Pending: {}  Urgent: {}  Total: {}",
        summary.today, summary.confirmed, summary.pending, summary.urgent, summary.total
    )
}

fn stock_marker(status: StockStatus) -> &'static str {
    match status {
        StockStatus::Normal => "",
        StockStatus::Bajo => "low",
        StockStatus::Critico => "CRITICAL",
        StockStatus::Agotado => "OUT",
    }
}

pub fn products(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products found".to_string();
    }
    let mut out = format!(
        "{:>6}  {:<w$}  {:<12}  {:>6}  {:>10}  {:<10}  {}\n",
        "ID",
        "NAME",
        "CATEGORY",
        "STOCK",
        "PRICE",
        "EXPIRES",
        "ALERT",
        w = NAME_WIDTH
    );
    for p in products {
        let expires = p
            .expires_on
            .as_deref()
            .map(format_date)
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:>6}  {:<w$}  {:<12}  {:>6}  {:>10}  {:<10}  {}",
            p.id,
            truncate_string(&p.name, NAME_WIDTH),
            p.category.as_str(),
            p.stock,
            format_money(p.price),
            truncate_string(&expires, 12),
            stock_marker(p.stock_status()),
            w = NAME_WIDTH
        );
    }
    out.trim_end().to_string()
}

pub fn inventory_summary(summary: &InventorySummary) -> String {
    format!(
        "Products: {}\nLow stock: {}\nCritical stock: {}\nExpiring soon: {}\nTotal value: {}",
        summary.total_products,
        summary.low_stock,
        summary.critical_stock,
        summary.expiring_soon,
        format_money(summary.total_value)
    )
}

pub fn invoices(invoices: &[Invoice]) -> String {
    if invoices.is_empty() {
        return "No invoices found".to_string();
    }
    let mut out = format!(
        "{:>6}  {:<16}  {:<w$}  {:<10}  {:<10}  {:>14}  {:>14}\n",
        "ID",
        "NUMBER",
        "CLIENT",
        "STATUS",
        "DUE",
        "TOTAL",
        "BALANCE",
        w = NAME_WIDTH
    );
    let mut outstanding = 0.0;
    for i in invoices {
        let client = i
            .client_name
            .clone()
            .unwrap_or_else(|| format!("#{}", i.client_id));
        let due = i
            .due_on
            .as_deref()
            .map(format_date)
            .unwrap_or_else(|| "-".to_string());
        outstanding += i.outstanding();
        let _ = writeln!(
            out,
            "{:>6}  {:<16}  {:<w$}  {:<10}  {:<10}  {:>14}  {:>14}",
            i.id,
            truncate_string(&i.number, 16),
            truncate_string(&client, NAME_WIDTH),
            i.status.as_str(),
            truncate_string(&due, 12),
            format_money(i.total),
            format_money(i.outstanding()),
            w = NAME_WIDTH
        );
    }
    let _ = write!(out, "Outstanding: {}", format_money(outstanding));
    out
}

pub fn payment(payment: &Payment) -> String {
    let receipt = payment
        .receipt_number
        .clone()
        .unwrap_or_else(|| format!("#{}", payment.id));
    let mut out = format!(
        "Payment {} recorded: {} by {} on invoice #{}",
        receipt,
        format_money(payment.amount),
        payment.method.as_str(),
        payment.invoice_id
    );
    if let Some(reference) = &payment.transaction_reference {
        let _ = write!(out, " (ref {})", reference);
    }
    out
}

pub fn notifications(notifications: &[Notification], unread_count: u64) -> String {
    let mut out = String::new();
    for n in notifications {
        let subject = n
            .subject
            .clone()
            .or_else(|| n.message.clone())
            .unwrap_or_else(|| n.kind.label().to_string());
        let when = n
            .created_at
            .as_deref()
            .map(format_date)
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{} {:>6}  {:<22}  {:<w$}  {}",
            if n.is_read() { " " } else { "*" },
            n.id,
            n.kind.label(),
            truncate_string(&subject, SUBJECT_WIDTH),
            when,
            w = SUBJECT_WIDTH
        );
    }
    if notifications.is_empty() {
        out.push_str("No notifications\n");
    }
    let _ = write!(out, "{} unread", unread_count);
    out
}

pub fn users(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found".to_string();
    }
    let mut out = String::new();
    for u in users {
        let active = match u.active {
            Some(false) => "  (inactive)",
            _ => "",
        };
        let _ = writeln!(
            out,
            "{:>6}  {:<w$}  {:<14}  {}{}",
            u.id,
            truncate_string(&u.display_name(), NAME_WIDTH),
            u.primary_role(),
            u.email,
            active,
            w = NAME_WIDTH
        );
    }
    out.trim_end().to_string()
}
