use crate::api::{ApiClient, ApiError};
use crate::models::{Payload, User, UserRole};

/// Staff and client accounts (admin screens).
#[derive(Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        let users: Payload<Vec<User>> = self.api.get("/usuarios", None).await?;
        Ok(users.into_inner())
    }

    pub async fn get(&self, id: i64) -> Result<User, ApiError> {
        let user: Payload<User> = self.api.get(&format!("/usuarios/{}", id), None).await?;
        Ok(user.into_inner())
    }

    pub async fn by_role(&self, role: &UserRole) -> Result<Vec<User>, ApiError> {
        let users: Payload<Vec<User>> = self
            .api
            .get(&format!("/usuarios/rol/{}", role.as_str()), None)
            .await?;
        Ok(users.into_inner())
    }

    /// Deactivate an account. The backend keeps the record.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let _: Payload<Option<serde_json::Value>> =
            self.api.delete(&format!("/usuarios/{}", id), None).await?;
        Ok(())
    }
}
