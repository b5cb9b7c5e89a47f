use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Species {
    Perro,
    Gato,
    Ave,
    Roedor,
    Reptil,
    #[serde(other)]
    Otro,
}

impl Species {
    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Perro => "PERRO",
            Species::Gato => "GATO",
            Species::Ave => "AVE",
            Species::Roedor => "ROEDOR",
            Species::Reptil => "REPTIL",
            Species::Otro => "OTRO",
        }
    }
}

impl std::str::FromStr for Species {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PERRO" => Ok(Species::Perro),
            "GATO" => Ok(Species::Gato),
            "AVE" => Ok(Species::Ave),
            "ROEDOR" => Ok(Species::Roedor),
            "REPTIL" => Ok(Species::Reptil),
            "OTRO" => Ok(Species::Otro),
            other => Err(format!("unknown species: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatientStatus {
    Activo,
    Tratamiento,
    Inactivo,
    Fallecido,
    #[serde(other)]
    Unknown,
}

impl PatientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Activo => "ACTIVO",
            PatientStatus::Tratamiento => "TRATAMIENTO",
            PatientStatus::Inactivo => "INACTIVO",
            PatientStatus::Fallecido => "FALLECIDO",
            PatientStatus::Unknown => "UNKNOWN",
        }
    }
}

impl std::str::FromStr for PatientStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVO" => Ok(PatientStatus::Activo),
            "TRATAMIENTO" => Ok(PatientStatus::Tratamiento),
            "INACTIVO" => Ok(PatientStatus::Inactivo),
            "FALLECIDO" => Ok(PatientStatus::Fallecido),
            other => Err(format!("unknown patient status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sex {
    // Older records store the capitalized form
    #[serde(alias = "Macho")]
    Macho,
    #[serde(alias = "Hembra")]
    Hembra,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "especie")]
    pub species: Species,
    #[serde(rename = "raza", default)]
    pub breed: Option<String>,
    #[serde(rename = "edad", default)]
    pub age: Option<u32>,
    #[serde(rename = "peso", default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(rename = "sexo", default)]
    pub sex: Option<Sex>,
    #[serde(rename = "propietarioId")]
    pub owner_id: i64,
    #[serde(rename = "propietarioNombre", default)]
    pub owner_name: Option<String>,
    #[serde(rename = "propietarioTelefono", default)]
    pub owner_phone: Option<String>,
    #[serde(rename = "propietarioEmail", default)]
    pub owner_email: Option<String>,
    #[serde(rename = "estado")]
    pub status: PatientStatus,
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
    #[serde(rename = "fotoUrl", default)]
    pub photo_url: Option<String>,
    #[serde(rename = "fechaRegistro", default)]
    pub registered_at: Option<String>,
    #[serde(rename = "ultimaVisita", default)]
    pub last_visit: Option<String>,
    #[serde(rename = "numeroHistoriaClinica", default)]
    pub medical_record_number: Option<String>,
}

/// Body for creating or updating a patient.
///
/// All fields are optional so the same type serves partial updates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatientForm {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "especie", skip_serializing_if = "Option::is_none")]
    pub species: Option<Species>,
    #[serde(rename = "raza", skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(rename = "edad", skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(rename = "peso", skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "sexo", skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(rename = "propietarioId", skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<PatientStatus>,
    #[serde(rename = "observaciones", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "fotoUrl", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PatientFilters {
    pub search: Option<String>,
    pub species: Option<Species>,
    pub status: Option<PatientStatus>,
    pub owner_id: Option<i64>,
}

impl PatientFilters {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(ref search) = self.search {
            query.push(("busqueda".to_string(), search.clone()));
        }
        if let Some(species) = self.species {
            query.push(("especie".to_string(), species.as_str().to_string()));
        }
        if let Some(status) = self.status {
            query.push(("estado".to_string(), status.as_str().to_string()));
        }
        if let Some(owner_id) = self.owner_id {
            query.push(("propietarioId".to_string(), owner_id.to_string()));
        }
        query
    }
}
