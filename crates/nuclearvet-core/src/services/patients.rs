use crate::api::{ApiClient, ApiError, RequestOptions};
use crate::models::{Patient, PatientFilters, PatientForm, Payload};

#[derive(Clone)]
pub struct PatientService {
    api: ApiClient,
}

impl PatientService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, filters: &PatientFilters) -> Result<Vec<Patient>, ApiError> {
        let options = RequestOptions::new().queries(filters.to_query());
        let patients: Payload<Vec<Patient>> = self.api.get("/pacientes", Some(options)).await?;
        Ok(patients.into_inner())
    }

    pub async fn get(&self, id: i64) -> Result<Patient, ApiError> {
        let patient: Payload<Patient> = self.api.get(&format!("/pacientes/{}", id), None).await?;
        Ok(patient.into_inner())
    }

    pub async fn create(&self, form: &PatientForm) -> Result<Patient, ApiError> {
        let patient: Payload<Patient> = self.api.post("/pacientes", Some(form), None).await?;
        Ok(patient.into_inner())
    }

    pub async fn update(&self, id: i64, form: &PatientForm) -> Result<Patient, ApiError> {
        let patient: Payload<Patient> = self
            .api
            .put(&format!("/pacientes/{}", id), Some(form), None)
            .await?;
        Ok(patient.into_inner())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let _: Payload<Option<serde_json::Value>> =
            self.api.delete(&format!("/pacientes/{}", id), None).await?;
        Ok(())
    }

    /// Medical history entries; the shape varies by record type so it is
    /// returned as raw JSON.
    pub async fn medical_history(&self, id: i64) -> Result<serde_json::Value, ApiError> {
        let history: Payload<serde_json::Value> = self
            .api
            .get(&format!("/pacientes/{}/historial", id), None)
            .await?;
        Ok(history.into_inner())
    }

    pub async fn by_owner(&self, owner_id: i64) -> Result<Vec<Patient>, ApiError> {
        let patients: Payload<Vec<Patient>> = self
            .api
            .get(&format!("/pacientes/propietario/{}", owner_id), None)
            .await?;
        Ok(patients.into_inner())
    }
}
