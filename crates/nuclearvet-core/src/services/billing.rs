use chrono::NaiveDate;

use crate::api::{ApiClient, ApiError, RequestOptions};
use crate::models::{Invoice, InvoiceRequest, InvoiceStatus, Payload, Payment, PaymentMethod, PaymentRequest};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn range(from: NaiveDate, to: NaiveDate) -> RequestOptions {
    RequestOptions::new()
        .query("fechaInicio", from.format(DATE_FORMAT))
        .query("fechaFin", to.format(DATE_FORMAT))
}

/// Invoices (`/facturas`) and the payments recorded against them (`/pagos`).
#[derive(Clone)]
pub struct BillingService {
    api: ApiClient,
}

impl BillingService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    // ===== Invoices =====

    pub async fn create_invoice(&self, request: &InvoiceRequest) -> Result<Invoice, ApiError> {
        let invoice: Payload<Invoice> = self.api.post("/facturas", Some(request), None).await?;
        Ok(invoice.into_inner())
    }

    pub async fn invoice(&self, id: i64) -> Result<Invoice, ApiError> {
        let invoice: Payload<Invoice> = self.api.get(&format!("/facturas/{}", id), None).await?;
        Ok(invoice.into_inner())
    }

    pub async fn invoice_by_number(&self, number: &str) -> Result<Invoice, ApiError> {
        let invoice: Payload<Invoice> = self
            .api
            .get(&format!("/facturas/numero/{}", number), None)
            .await?;
        Ok(invoice.into_inner())
    }

    /// Invoices billed to a pet owner
    pub async fn invoices_by_client(&self, client_id: i64) -> Result<Vec<Invoice>, ApiError> {
        self.list(&format!("/facturas/cliente/{}", client_id), None).await
    }

    pub async fn invoices_by_patient(&self, patient_id: i64) -> Result<Vec<Invoice>, ApiError> {
        self.list(&format!("/facturas/paciente/{}", patient_id), None).await
    }

    pub async fn invoices_by_consultation(&self, consultation_id: i64) -> Result<Vec<Invoice>, ApiError> {
        self.list(&format!("/facturas/consulta/{}", consultation_id), None).await
    }

    pub async fn invoices_by_status(&self, status: InvoiceStatus) -> Result<Vec<Invoice>, ApiError> {
        self.list(&format!("/facturas/estado/{}", status.as_str()), None).await
    }

    /// Invoices issued between `from` and `to`, both inclusive
    pub async fn invoices_in_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Invoice>, ApiError> {
        self.list("/facturas/rango", Some(range(from, to))).await
    }

    pub async fn pending(&self) -> Result<Vec<Invoice>, ApiError> {
        self.list("/facturas/pendientes", None).await
    }

    /// Open invoices past their due date
    pub async fn overdue(&self) -> Result<Vec<Invoice>, ApiError> {
        self.list("/facturas/vencidas", None).await
    }

    pub async fn total_billed(&self, from: NaiveDate, to: NaiveDate) -> Result<f64, ApiError> {
        let total: Payload<f64> = self
            .api
            .get("/facturas/reportes/facturado", Some(range(from, to)))
            .await?;
        Ok(total.into_inner())
    }

    pub async fn total_collected(&self, from: NaiveDate, to: NaiveDate) -> Result<f64, ApiError> {
        let total: Payload<f64> = self
            .api
            .get("/facturas/reportes/recaudado", Some(range(from, to)))
            .await?;
        Ok(total.into_inner())
    }

    async fn list(&self, path: &str, options: Option<RequestOptions>) -> Result<Vec<Invoice>, ApiError> {
        let invoices: Payload<Vec<Invoice>> = self.api.get(path, options).await?;
        Ok(invoices.into_inner())
    }

    // ===== Payments =====

    pub async fn register_payment(&self, request: &PaymentRequest) -> Result<Payment, ApiError> {
        let payment: Payload<Payment> = self.api.post("/pagos", Some(request), None).await?;
        Ok(payment.into_inner())
    }

    pub async fn payment(&self, id: i64) -> Result<Payment, ApiError> {
        let payment: Payload<Payment> = self.api.get(&format!("/pagos/{}", id), None).await?;
        Ok(payment.into_inner())
    }

    pub async fn payments_for_invoice(&self, invoice_id: i64) -> Result<Vec<Payment>, ApiError> {
        let payments: Payload<Vec<Payment>> = self
            .api
            .get(&format!("/pagos/factura/{}", invoice_id), None)
            .await?;
        Ok(payments.into_inner())
    }

    pub async fn payments_by_method(&self, method: PaymentMethod) -> Result<Vec<Payment>, ApiError> {
        let payments: Payload<Vec<Payment>> = self
            .api
            .get(&format!("/pagos/metodo/{}", method.as_str()), None)
            .await?;
        Ok(payments.into_inner())
    }

    pub async fn payments_in_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Payment>, ApiError> {
        let payments: Payload<Vec<Payment>> = self.api.get("/pagos/rango", Some(range(from, to))).await?;
        Ok(payments.into_inner())
    }
}
