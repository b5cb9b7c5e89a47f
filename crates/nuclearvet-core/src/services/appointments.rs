use chrono::Local;

use crate::api::{ApiClient, ApiError, RequestOptions, NO_BODY};
use crate::models::{
    Appointment, AppointmentFilters, AppointmentForm, AppointmentSummary, Payload,
};

#[derive(Clone)]
pub struct AppointmentService {
    api: ApiClient,
}

impl AppointmentService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, filters: &AppointmentFilters) -> Result<Vec<Appointment>, ApiError> {
        let options = RequestOptions::new().queries(filters.to_query());
        let appointments: Payload<Vec<Appointment>> = self.api.get("/citas", Some(options)).await?;
        Ok(appointments.into_inner())
    }

    pub async fn get(&self, id: i64) -> Result<Appointment, ApiError> {
        let appointment: Payload<Appointment> = self.api.get(&format!("/citas/{}", id), None).await?;
        Ok(appointment.into_inner())
    }

    pub async fn create(&self, form: &AppointmentForm) -> Result<Appointment, ApiError> {
        let appointment: Payload<Appointment> = self.api.post("/citas", Some(form), None).await?;
        Ok(appointment.into_inner())
    }

    pub async fn update(&self, id: i64, form: &AppointmentForm) -> Result<Appointment, ApiError> {
        let appointment: Payload<Appointment> = self
            .api
            .put(&format!("/citas/{}", id), Some(form), None)
            .await?;
        Ok(appointment.into_inner())
    }

    pub async fn cancel(&self, id: i64, reason: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "motivo": reason });
        let _: Payload<Option<serde_json::Value>> = self
            .api
            .patch(&format!("/citas/{}/cancelar", id), Some(&body), None)
            .await?;
        Ok(())
    }

    pub async fn confirm(&self, id: i64) -> Result<Appointment, ApiError> {
        let appointment: Payload<Appointment> = self
            .api
            .patch(&format!("/citas/{}/confirmar", id), NO_BODY, None)
            .await?;
        Ok(appointment.into_inner())
    }

    pub async fn summary(&self) -> Result<AppointmentSummary, ApiError> {
        let summary: Payload<AppointmentSummary> = self.api.get("/citas/resumen", None).await?;
        Ok(summary.into_inner())
    }

    /// Appointments scheduled for the local calendar day
    pub async fn today(&self) -> Result<Vec<Appointment>, ApiError> {
        let filters = AppointmentFilters {
            date: Some(Local::now().format("%Y-%m-%d").to_string()),
            ..Default::default()
        };
        self.list(&filters).await
    }

    /// Free slots for a vet on `date` (`YYYY-MM-DD`)
    pub async fn availability(&self, date: &str, vet_id: i64) -> Result<serde_json::Value, ApiError> {
        let options = RequestOptions::new()
            .query("fecha", date)
            .query("veterinarioId", vet_id);
        let slots: Payload<serde_json::Value> =
            self.api.get("/citas/disponibilidad", Some(options)).await?;
        Ok(slots.into_inner())
    }
}
