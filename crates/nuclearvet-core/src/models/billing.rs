use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Pendiente,
    Pagada,
    Parcial,
    Vencida,
    Cancelada,
    #[serde(other)]
    Unknown,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pendiente => "PENDIENTE",
            InvoiceStatus::Pagada => "PAGADA",
            InvoiceStatus::Parcial => "PARCIAL",
            InvoiceStatus::Vencida => "VENCIDA",
            InvoiceStatus::Cancelada => "CANCELADA",
            InvoiceStatus::Unknown => "UNKNOWN",
        }
    }

    /// Whether the invoice can still take payments
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            InvoiceStatus::Pendiente | InvoiceStatus::Parcial | InvoiceStatus::Vencida
        )
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDIENTE" => Ok(InvoiceStatus::Pendiente),
            "PAGADA" => Ok(InvoiceStatus::Pagada),
            "PARCIAL" => Ok(InvoiceStatus::Parcial),
            "VENCIDA" => Ok(InvoiceStatus::Vencida),
            "CANCELADA" => Ok(InvoiceStatus::Cancelada),
            other => Err(format!("unknown invoice status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Efectivo,
    TarjetaDebito,
    TarjetaCredito,
    Transferencia,
    Cheque,
    #[serde(other)]
    Otro,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Efectivo => "EFECTIVO",
            PaymentMethod::TarjetaDebito => "TARJETA_DEBITO",
            PaymentMethod::TarjetaCredito => "TARJETA_CREDITO",
            PaymentMethod::Transferencia => "TRANSFERENCIA",
            PaymentMethod::Cheque => "CHEQUE",
            PaymentMethod::Otro => "OTRO",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "EFECTIVO" => Ok(PaymentMethod::Efectivo),
            "TARJETA_DEBITO" => Ok(PaymentMethod::TarjetaDebito),
            "TARJETA_CREDITO" => Ok(PaymentMethod::TarjetaCredito),
            "TRANSFERENCIA" => Ok(PaymentMethod::Transferencia),
            "CHEQUE" => Ok(PaymentMethod::Cheque),
            "OTRO" => Ok(PaymentMethod::Otro),
            other => Err(format!("unknown payment method: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceItemType {
    Consulta,
    Producto,
    Servicio,
    Procedimiento,
    Hospedaje,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "tipo")]
    pub kind: InvoiceItemType,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "productoId", default)]
    pub product_id: Option<i64>,
    #[serde(rename = "productoNombre", default)]
    pub product_name: Option<String>,
    #[serde(rename = "cantidad", default)]
    pub quantity: u32,
    #[serde(rename = "precioUnitario", default)]
    pub unit_price: f64,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    #[serde(rename = "facturaId")]
    pub invoice_id: i64,
    #[serde(rename = "numeroRecibo", default)]
    pub receipt_number: Option<String>,
    /// Backend timestamp, `YYYY-MM-DDTHH:MM:SS`
    #[serde(rename = "fechaPago", default)]
    pub paid_at: Option<String>,
    #[serde(rename = "monto")]
    pub amount: f64,
    #[serde(rename = "metodoPago")]
    pub method: PaymentMethod,
    #[serde(rename = "referenciaTransaccion", default)]
    pub transaction_reference: Option<String>,
    #[serde(rename = "banco", default)]
    pub bank: Option<String>,
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
    #[serde(rename = "recibidoPorId", default)]
    pub received_by_id: Option<i64>,
    #[serde(rename = "recibidoPorNombre", default)]
    pub received_by_name: Option<String>,
    #[serde(rename = "activo", default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    #[serde(rename = "numeroFactura")]
    pub number: String,
    #[serde(rename = "pacienteId", default)]
    pub patient_id: Option<i64>,
    #[serde(rename = "pacienteNombre", default)]
    pub patient_name: Option<String>,
    #[serde(rename = "propietarioId")]
    pub client_id: i64,
    #[serde(rename = "propietarioNombre", default)]
    pub client_name: Option<String>,
    #[serde(rename = "consultaId", default)]
    pub consultation_id: Option<i64>,
    #[serde(rename = "fechaEmision", default)]
    pub issued_on: Option<String>,
    #[serde(rename = "fechaVencimiento", default)]
    pub due_on: Option<String>,
    #[serde(rename = "estado")]
    pub status: InvoiceStatus,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(rename = "porcentajeImpuesto", default)]
    pub tax_rate: f64,
    #[serde(rename = "valorImpuesto", default)]
    pub tax: f64,
    #[serde(rename = "descuento", default)]
    pub discount: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(rename = "totalPagado", default)]
    pub paid: f64,
    #[serde(rename = "saldoPendiente", default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    #[serde(rename = "pagos", default)]
    pub payments: Vec<Payment>,
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
    #[serde(rename = "emitidaPorId", default)]
    pub issued_by_id: Option<i64>,
    #[serde(rename = "emitidaPorNombre", default)]
    pub issued_by_name: Option<String>,
    #[serde(rename = "activo", default)]
    pub active: Option<bool>,
}

impl Invoice {
    /// Amount still owed. Falls back to `total - paid` when the backend
    /// omits the balance.
    pub fn outstanding(&self) -> f64 {
        self.balance
            .unwrap_or(self.total - self.paid)
            .max(0.0)
    }

    pub fn is_settled(&self) -> bool {
        self.status == InvoiceStatus::Pagada || self.outstanding() < 0.005
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceItemRequest {
    #[serde(rename = "tipo")]
    pub kind: InvoiceItemType,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "productoId", skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "precioUnitario")]
    pub unit_price: f64,
    #[serde(rename = "observaciones", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoiceRequest {
    #[serde(rename = "pacienteId")]
    pub patient_id: i64,
    #[serde(rename = "propietarioId")]
    pub client_id: i64,
    #[serde(rename = "consultaId", skip_serializing_if = "Option::is_none")]
    pub consultation_id: Option<i64>,
    /// `YYYY-MM-DD`; the backend uses today when absent
    #[serde(rename = "fechaEmision", skip_serializing_if = "Option::is_none")]
    pub issued_on: Option<String>,
    #[serde(rename = "fechaVencimiento", skip_serializing_if = "Option::is_none")]
    pub due_on: Option<String>,
    #[serde(rename = "porcentajeImpuesto", skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
    #[serde(rename = "descuento", skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    pub items: Vec<InvoiceItemRequest>,
    #[serde(rename = "observaciones", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "emitidaPorId")]
    pub issued_by_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentRequest {
    #[serde(rename = "facturaId")]
    pub invoice_id: i64,
    #[serde(rename = "fechaPago", skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<NaiveDateTime>,
    #[serde(rename = "monto")]
    pub amount: f64,
    #[serde(rename = "metodoPago")]
    pub method: PaymentMethod,
    #[serde(rename = "referenciaTransaccion", skip_serializing_if = "Option::is_none")]
    pub transaction_reference: Option<String>,
    #[serde(rename = "banco", skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(rename = "observaciones", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "recibidoPorId")]
    pub received_by_id: i64,
}

impl PaymentRequest {
    pub fn new(invoice_id: i64, amount: f64, method: PaymentMethod, received_by_id: i64) -> Self {
        Self {
            invoice_id,
            paid_at: None,
            amount,
            method,
            transaction_reference: None,
            bank: None,
            notes: None,
            received_by_id,
        }
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.transaction_reference = Some(reference.into());
        self
    }

    /// Checked locally before the request goes out
    pub fn validate(&self) -> Result<(), String> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(format!("payment amount must be positive, got {}", self.amount));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_parse_invoice() {
        let invoice: Invoice = serde_json::from_value(json!({
            "id": 31,
            "numeroFactura": "FAC-2024-0031",
            "pacienteId": 12,
            "pacienteNombre": "Max",
            "propietarioId": 3,
            "estado": "PARCIAL",
            "subtotal": 100000.0,
            "porcentajeImpuesto": 19.0,
            "valorImpuesto": 19000.0,
            "total": 119000.0,
            "totalPagado": 50000.0,
            "items": [{
                "tipo": "CONSULTA",
                "descripcion": "Consulta general",
                "cantidad": 1,
                "precioUnitario": 100000.0,
                "subtotal": 100000.0
            }],
            "pagos": [{
                "id": 8,
                "facturaId": 31,
                "monto": 50000.0,
                "metodoPago": "TARJETA_DEBITO"
            }]
        }))
        .unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Parcial);
        assert_eq!(invoice.items[0].kind, InvoiceItemType::Consulta);
        assert_eq!(invoice.payments[0].method, PaymentMethod::TarjetaDebito);
        // No saldoPendiente on the wire
        assert_eq!(invoice.outstanding(), 69000.0);
        assert!(!invoice.is_settled());
        assert!(invoice.status.is_open());
    }

    #[test]
    fn test_unrecognized_billing_values_do_not_reject_invoice() {
        let invoice: Invoice = serde_json::from_value(json!({
            "id": 1,
            "numeroFactura": "FAC-1",
            "propietarioId": 3,
            "estado": "ANULADA",
            "total": 10.0,
            "saldoPendiente": 0.0,
            "items": [{"tipo": "GUARDERIA", "descripcion": "Dia"}],
            "pagos": [{"id": 2, "facturaId": 1, "monto": 10.0, "metodoPago": "CRIPTO"}]
        }))
        .unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Unknown);
        assert_eq!(invoice.items[0].kind, InvoiceItemType::Unknown);
        assert_eq!(invoice.payments[0].method, PaymentMethod::Otro);
        assert!(invoice.is_settled());
        assert!(!invoice.status.is_open());
    }

    #[test]
    fn test_payment_request_wire_shape() {
        let paid_at = NaiveDate::from_ymd_opt(2024, 5, 2)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap();
        let mut request = PaymentRequest::new(31, 69000.0, PaymentMethod::Transferencia, 4)
            .reference("TRX-991");
        request.paid_at = Some(paid_at);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["facturaId"], 31);
        assert_eq!(body["metodoPago"], "TRANSFERENCIA");
        assert_eq!(body["fechaPago"], "2024-05-02T10:15:00");
        assert_eq!(body["referenciaTransaccion"], "TRX-991");
        assert_eq!(body["recibidoPorId"], 4);
        assert!(body.get("banco").is_none());
    }

    #[test]
    fn test_payment_amount_must_be_positive() {
        assert!(PaymentRequest::new(1, 10.0, PaymentMethod::Efectivo, 4).validate().is_ok());
        assert!(PaymentRequest::new(1, 0.0, PaymentMethod::Efectivo, 4).validate().is_err());
        assert!(PaymentRequest::new(1, -5.0, PaymentMethod::Efectivo, 4).validate().is_err());
        assert!(PaymentRequest::new(1, f64::NAN, PaymentMethod::Efectivo, 4).validate().is_err());
    }

    #[test]
    fn test_payment_method_from_cli() {
        assert_eq!("tarjeta-credito".parse(), Ok(PaymentMethod::TarjetaCredito));
        assert_eq!("efectivo".parse(), Ok(PaymentMethod::Efectivo));
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }
}
