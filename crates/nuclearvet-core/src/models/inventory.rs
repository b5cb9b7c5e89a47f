use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    Medicamento,
    Vacuna,
    Alimento,
    Accesorio,
    Instrumental,
    #[serde(other)]
    Otros,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Medicamento => "MEDICAMENTO",
            ProductCategory::Vacuna => "VACUNA",
            ProductCategory::Alimento => "ALIMENTO",
            ProductCategory::Accesorio => "ACCESORIO",
            ProductCategory::Instrumental => "INSTRUMENTAL",
            ProductCategory::Otros => "OTROS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    Normal,
    Bajo,
    Critico,
    Agotado,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Normal => "NORMAL",
            StockStatus::Bajo => "BAJO",
            StockStatus::Critico => "CRITICO",
            StockStatus::Agotado => "AGOTADO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    Entrada,
    Salida,
    Ajuste,
    Vencimiento,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "codigo", default)]
    pub code: Option<String>,
    #[serde(rename = "categoria")]
    pub category: ProductCategory,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "precio", default)]
    pub price: f64,
    #[serde(rename = "stockActual", default)]
    pub stock: i64,
    #[serde(rename = "stockMinimo", default)]
    pub min_stock: i64,
    #[serde(rename = "stockMaximo", default)]
    pub max_stock: i64,
    #[serde(rename = "unidadMedida", default)]
    pub unit: Option<String>,
    #[serde(rename = "proveedor", default)]
    pub supplier: Option<String>,
    #[serde(rename = "lote", default)]
    pub batch: Option<String>,
    #[serde(rename = "fechaVencimiento", default)]
    pub expires_on: Option<String>,
    #[serde(rename = "ubicacion", default)]
    pub location: Option<String>,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
    #[serde(rename = "fechaRegistro", default)]
    pub registered_at: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Stock level relative to the product's configured minimum.
    pub fn stock_status(&self) -> StockStatus {
        if self.stock <= 0 {
            StockStatus::Agotado
        } else if self.stock <= self.min_stock / 2 {
            StockStatus::Critico
        } else if self.stock <= self.min_stock {
            StockStatus::Bajo
        } else {
            StockStatus::Normal
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductForm {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "codigo", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "precio", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "stockActual", skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(rename = "stockMinimo", skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
    #[serde(rename = "stockMaximo", skip_serializing_if = "Option::is_none")]
    pub max_stock: Option<i64>,
    #[serde(rename = "unidadMedida", skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "proveedor", skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(rename = "lote", skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
    #[serde(rename = "fechaVencimiento", skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<String>,
    #[serde(rename = "ubicacion", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilters {
    pub search: Option<String>,
    pub category: Option<ProductCategory>,
    pub stock_status: Option<StockStatus>,
    pub active: Option<bool>,
}

impl ProductFilters {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(ref search) = self.search {
            query.push(("busqueda".to_string(), search.clone()));
        }
        if let Some(category) = self.category {
            query.push(("categoria".to_string(), category.as_str().to_string()));
        }
        if let Some(status) = self.stock_status {
            query.push(("estadoStock".to_string(), status.as_str().to_string()));
        }
        if let Some(active) = self.active {
            query.push(("activo".to_string(), active.to_string()));
        }
        query
    }
}

/// Body for `POST /inventario/movimientos/{entrada|salida}`.
#[derive(Debug, Clone, Serialize)]
pub struct StockMovementRequest {
    #[serde(rename = "productoId")]
    pub product_id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "motivo")]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryMovement {
    pub id: i64,
    #[serde(rename = "productoId")]
    pub product_id: i64,
    #[serde(rename = "productoNombre", default)]
    pub product_name: Option<String>,
    #[serde(rename = "tipo")]
    pub kind: MovementType,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "precioUnitario", default)]
    pub unit_price: Option<f64>,
    #[serde(rename = "motivo", default)]
    pub reason: Option<String>,
    #[serde(rename = "usuarioId", default)]
    pub user_id: Option<i64>,
    #[serde(rename = "usuarioNombre", default)]
    pub user_name: Option<String>,
    #[serde(rename = "fecha", default)]
    pub date: Option<String>,
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventorySummary {
    #[serde(rename = "totalProductos")]
    pub total_products: u32,
    #[serde(rename = "stockBajo")]
    pub low_stock: u32,
    #[serde(rename = "stockCritico")]
    pub critical_stock: u32,
    #[serde(rename = "valorTotal")]
    pub total_value: f64,
    #[serde(rename = "proximosVencer")]
    pub expiring_soon: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i64, min_stock: i64) -> Product {
        Product {
            id: 1,
            name: "Amoxicilina 250mg".to_string(),
            code: None,
            category: ProductCategory::Medicamento,
            description: None,
            price: 12.5,
            stock,
            min_stock,
            max_stock: 100,
            unit: None,
            supplier: None,
            batch: None,
            expires_on: None,
            location: None,
            active: true,
            registered_at: None,
        }
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(product(0, 10).stock_status(), StockStatus::Agotado);
        assert_eq!(product(4, 10).stock_status(), StockStatus::Critico);
        assert_eq!(product(8, 10).stock_status(), StockStatus::Bajo);
        assert_eq!(product(50, 10).stock_status(), StockStatus::Normal);
    }

    #[test]
    fn test_parse_product_defaults() {
        let json = r#"{"id": 9, "nombre": "Vacuna antirrábica", "categoria": "VACUNA"}"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert!(p.active);
        assert_eq!(p.stock, 0);
        assert_eq!(p.category, ProductCategory::Vacuna);
    }

    #[test]
    fn test_filters_serialize_bool() {
        let filters = ProductFilters {
            active: Some(false),
            stock_status: Some(StockStatus::Critico),
            ..Default::default()
        };
        assert_eq!(
            filters.to_query(),
            vec![
                ("estadoStock".to_string(), "CRITICO".to_string()),
                ("activo".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn test_movement_request_wire_names() {
        let req = StockMovementRequest {
            product_id: 4,
            quantity: 10,
            reason: "Compra".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["productoId"], 4);
        assert_eq!(json["cantidad"], 10);
        assert_eq!(json["motivo"], "Compra");
    }
}
