use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    RecordatorioCita,
    ConfirmacionCita,
    CancelacionCita,
    RecordatorioVacuna,
    AlertaMedicamento,
    AlertaStock,
    ResultadoExamenes,
    #[serde(other)]
    NotificacionGeneral,
}

impl NotificationType {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationType::RecordatorioCita => "Appointment reminder",
            NotificationType::ConfirmacionCita => "Appointment confirmed",
            NotificationType::CancelacionCita => "Appointment cancelled",
            NotificationType::RecordatorioVacuna => "Vaccination reminder",
            NotificationType::AlertaMedicamento => "Medication expiring",
            NotificationType::AlertaStock => "Low stock",
            NotificationType::ResultadoExamenes => "Exam results",
            NotificationType::NotificacionGeneral => "General",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationChannel {
    Email,
    Sms,
    InApp,
    Push,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationStatus {
    Pendiente,
    Enviada,
    Leida,
    Error,
    Cancelada,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "destinatarioId")]
    pub recipient_id: i64,
    #[serde(rename = "destinatarioNombre", default)]
    pub recipient_name: Option<String>,
    #[serde(rename = "tipo")]
    pub kind: NotificationType,
    #[serde(rename = "canal", default)]
    pub channel: Option<NotificationChannel>,
    #[serde(rename = "estado")]
    pub status: NotificationStatus,
    #[serde(rename = "asunto", default)]
    pub subject: Option<String>,
    #[serde(rename = "mensaje", default)]
    pub message: Option<String>,
    #[serde(rename = "fechaProgramada", default)]
    pub scheduled_at: Option<String>,
    #[serde(rename = "fechaEnviada", default)]
    pub sent_at: Option<String>,
    #[serde(rename = "fechaLeida", default)]
    pub read_at: Option<String>,
    #[serde(rename = "intentosEnvio", default)]
    pub send_attempts: Option<u32>,
    #[serde(rename = "fechaCreacion", default)]
    pub created_at: Option<String>,
}

impl Notification {
    pub fn is_read(&self) -> bool {
        self.status == NotificationStatus::Leida || self.read_at.is_some()
    }
}
