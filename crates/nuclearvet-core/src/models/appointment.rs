use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pendiente,
    Confirmada,
    EnCurso,
    Completada,
    Cancelada,
    Urgente,
    #[serde(other)]
    Unknown,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pendiente => "PENDIENTE",
            AppointmentStatus::Confirmada => "CONFIRMADA",
            AppointmentStatus::EnCurso => "EN_CURSO",
            AppointmentStatus::Completada => "COMPLETADA",
            AppointmentStatus::Cancelada => "CANCELADA",
            AppointmentStatus::Urgente => "URGENTE",
            AppointmentStatus::Unknown => "UNKNOWN",
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDIENTE" => Ok(AppointmentStatus::Pendiente),
            "CONFIRMADA" => Ok(AppointmentStatus::Confirmada),
            "EN_CURSO" => Ok(AppointmentStatus::EnCurso),
            "COMPLETADA" => Ok(AppointmentStatus::Completada),
            "CANCELADA" => Ok(AppointmentStatus::Cancelada),
            "URGENTE" => Ok(AppointmentStatus::Urgente),
            other => Err(format!("unknown appointment status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentType {
    Consulta,
    Vacunacion,
    Cirugia,
    Urgencia,
    Revision,
    #[serde(other)]
    Otros,
}

impl AppointmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::Consulta => "CONSULTA",
            AppointmentType::Vacunacion => "VACUNACION",
            AppointmentType::Cirugia => "CIRUGIA",
            AppointmentType::Urgencia => "URGENCIA",
            AppointmentType::Revision => "REVISION",
            AppointmentType::Otros => "OTROS",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "hora")]
    pub time: String,
    #[serde(rename = "pacienteId")]
    pub patient_id: i64,
    #[serde(rename = "pacienteNombre", default)]
    pub patient_name: Option<String>,
    #[serde(rename = "pacienteEspecie", default)]
    pub patient_species: Option<String>,
    #[serde(rename = "propietarioId", default)]
    pub owner_id: Option<i64>,
    #[serde(rename = "propietarioNombre", default)]
    pub owner_name: Option<String>,
    #[serde(rename = "propietarioTelefono", default)]
    pub owner_phone: Option<String>,
    #[serde(rename = "veterinarioId")]
    pub vet_id: i64,
    #[serde(rename = "veterinarioNombre", default)]
    pub vet_name: Option<String>,
    #[serde(rename = "tipo")]
    pub kind: AppointmentType,
    #[serde(rename = "motivo", default)]
    pub reason: Option<String>,
    #[serde(rename = "estado")]
    pub status: AppointmentStatus,
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
    /// Minutes.
    #[serde(rename = "duracionEstimada", default)]
    pub estimated_duration: Option<u32>,
    #[serde(rename = "fechaCreacion", default)]
    pub created_at: Option<String>,
    #[serde(rename = "fechaActualizacion", default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AppointmentForm {
    #[serde(rename = "fecha", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "hora", skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(rename = "pacienteId", skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<i64>,
    #[serde(rename = "veterinarioId", skip_serializing_if = "Option::is_none")]
    pub vet_id: Option<i64>,
    #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AppointmentType>,
    #[serde(rename = "motivo", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(rename = "observaciones", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "duracionEstimada", skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentFilters {
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub vet_id: Option<i64>,
    pub patient_id: Option<i64>,
    pub kind: Option<AppointmentType>,
}

impl AppointmentFilters {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(ref date) = self.date {
            query.push(("fecha".to_string(), date.clone()));
        }
        if let Some(status) = self.status {
            query.push(("estado".to_string(), status.as_str().to_string()));
        }
        if let Some(vet_id) = self.vet_id {
            query.push(("veterinarioId".to_string(), vet_id.to_string()));
        }
        if let Some(patient_id) = self.patient_id {
            query.push(("pacienteId".to_string(), patient_id.to_string()));
        }
        if let Some(kind) = self.kind {
            query.push(("tipo".to_string(), kind.as_str().to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentSummary {
    pub total: u32,
    #[serde(rename = "hoy")]
    pub today: u32,
    #[serde(rename = "confirmadas")]
    pub confirmed: u32,
    #[serde(rename = "pendientes")]
    pub pending: u32,
    #[serde(rename = "urgentes")]
    pub urgent: u32,
}
