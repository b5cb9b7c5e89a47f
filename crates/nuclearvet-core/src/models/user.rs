use serde::{Deserialize, Serialize};

/// Role names as the backend spells them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Veterinario,
    Recepcionista,
    Cliente,
    #[serde(other)]
    Unknown,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Veterinario => "VETERINARIO",
            UserRole::Recepcionista => "RECEPCIONISTA",
            UserRole::Cliente => "CLIENTE",
            UserRole::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(UserRole::Admin),
            "VETERINARIO" => Ok(UserRole::Veterinario),
            "RECEPCIONISTA" => Ok(UserRole::Recepcionista),
            "CLIENTE" => Ok(UserRole::Cliente),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// The identity held by the session: who is logged in, and their token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "rol")]
    pub role: String,
    pub token: String,
}

impl AuthenticatedUser {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Partial user fields for a profile update.
///
/// Has no token field, so merging an update never replaces the session
/// credential.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "rol", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.role.is_none()
    }

    /// Shallow-merge the present fields into `user`. The token is left alone.
    pub fn apply_to(&self, user: &mut AuthenticatedUser) {
        if let Some(id) = self.id {
            user.id = id;
        }
        if let Some(ref first_name) = self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(ref last_name) = self.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(ref email) = self.email {
            user.email = email.clone();
        }
        if let Some(ref role) = self.role {
            user.role = role.clone();
        }
    }
}

/// A user account as returned by the `/usuarios` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "nombreCompleto", default)]
    pub full_name: Option<String>,
    pub email: String,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "documentoIdentidad", default)]
    pub id_document: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(rename = "activo", default)]
    pub active: Option<bool>,
    #[serde(rename = "ultimoAcceso", default)]
    pub last_access: Option<String>,
    #[serde(rename = "fechaCreacion", default)]
    pub created_at: Option<String>,
}

impl User {
    pub fn display_name(&self) -> String {
        self.full_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("{} {}", self.first_name, self.last_name))
    }

    /// First role the backend lists, which the console treats as primary.
    pub fn primary_role(&self) -> &str {
        self.roles
            .first()
            .map(String::as_str)
            .unwrap_or(UserRole::Cliente.as_str())
    }
}

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(rename = "tipo", default)]
    pub token_type: Option<String>,
    #[serde(rename = "usuario")]
    pub user: User,
}

impl AuthResponse {
    pub fn into_authenticated_user(self) -> AuthenticatedUser {
        let role = self.user.primary_role().to_string();
        AuthenticatedUser {
            id: self.user.id,
            first_name: self.user.first_name,
            last_name: self.user.last_name,
            email: self.user.email,
            role,
            token: self.token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            id: 7,
            first_name: "Ana".to_string(),
            last_name: "Gomez".to_string(),
            email: "ana@nuclearvet.co".to_string(),
            role: "VETERINARIO".to_string(),
            token: "abc123".to_string(),
        }
    }

    #[test]
    fn test_authenticated_user_wire_names() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert_eq!(json["nombre"], "Ana");
        assert_eq!(json["apellido"], "Gomez");
        assert_eq!(json["rol"], "VETERINARIO");
        assert_eq!(json["token"], "abc123");
    }

    #[test]
    fn test_update_merges_only_present_fields() {
        let mut user = sample_user();
        let update = UserUpdate {
            email: Some("x".to_string()),
            ..Default::default()
        };
        update.apply_to(&mut user);

        let expected = AuthenticatedUser {
            email: "x".to_string(),
            ..sample_user()
        };
        assert_eq!(user, expected);
    }

    #[test]
    fn test_update_serializes_only_present_fields() {
        let update = UserUpdate {
            first_name: Some("Luisa".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"nombre":"Luisa"}"#);
        assert!(!update.is_empty());
        assert!(UserUpdate::default().is_empty());
    }

    #[test]
    fn test_auth_response_into_user() {
        let json = r#"{
            "token": "jwt-token",
            "tipo": "Bearer",
            "usuario": {
                "id": 3,
                "nombre": "Carlos",
                "apellido": "Ruiz",
                "nombreCompleto": "Carlos Ruiz",
                "email": "carlos@nuclearvet.co",
                "roles": ["RECEPCIONISTA"],
                "activo": true
            }
        }"#;
        let resp: AuthResponse = serde_json::from_str(json).unwrap();
        let user = resp.into_authenticated_user();
        assert_eq!(user.id, 3);
        assert_eq!(user.role, "RECEPCIONISTA");
        assert_eq!(user.token, "jwt-token");
        assert_eq!(user.full_name(), "Carlos Ruiz");
    }

    #[test]
    fn test_primary_role_defaults_to_client() {
        let json = r#"{"id": 1, "nombre": "A", "apellido": "B", "email": "a@b.c"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.primary_role(), "CLIENTE");
        assert_eq!(user.display_name(), "A B");
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("veterinario".parse::<UserRole>(), Ok(UserRole::Veterinario));
        assert!("jefe".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_unknown_role_decodes() {
        let role: UserRole = serde_json::from_str(r#""AUDITOR""#).unwrap();
        assert_eq!(role, UserRole::Unknown);
    }
}
