use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Success envelope the backend wraps some payloads in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(rename = "exitoso", default)]
    pub success: bool,
    #[serde(rename = "mensaje", default)]
    pub message: Option<String>,
    pub data: T,
}

/// A payload that some endpoints wrap in [`ApiResponse`] and others send bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Payload<T> {
    Enveloped(ApiResponse<T>),
    Bare(T),
}

impl<T> Payload<T> {
    pub fn into_inner(self) -> T {
        match self {
            Payload::Enveloped(envelope) => envelope.data,
            Payload::Bare(data) => data,
        }
    }
}

/// Error body the backend sends with failed requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(rename = "mensaje", default)]
    pub message: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(rename = "detalles", default)]
    pub details: Option<HashMap<String, String>>,
}

impl ErrorBody {
    /// Parse an error body, returning `None` for anything that isn't one.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str::<Self>(body)
            .ok()
            .filter(|b| b.message.is_some() || b.error.is_some())
    }
}
