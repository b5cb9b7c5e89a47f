use crate::api::{ApiClient, ApiError, RequestOptions};
use crate::models::{
    InventoryMovement, InventorySummary, Payload, Product, ProductFilters, ProductForm,
    StockMovementRequest,
};

/// Days ahead `expiring` looks when the caller has no preference
pub const DEFAULT_EXPIRY_WINDOW_DAYS: u32 = 30;

#[derive(Clone)]
pub struct InventoryService {
    api: ApiClient,
}

impl InventoryService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, filters: &ProductFilters) -> Result<Vec<Product>, ApiError> {
        let options = RequestOptions::new().queries(filters.to_query());
        let products: Payload<Vec<Product>> =
            self.api.get("/inventario/productos", Some(options)).await?;
        Ok(products.into_inner())
    }

    pub async fn get(&self, id: i64) -> Result<Product, ApiError> {
        let product: Payload<Product> = self
            .api
            .get(&format!("/inventario/productos/{}", id), None)
            .await?;
        Ok(product.into_inner())
    }

    pub async fn create(&self, form: &ProductForm) -> Result<Product, ApiError> {
        let product: Payload<Product> = self
            .api
            .post("/inventario/productos", Some(form), None)
            .await?;
        Ok(product.into_inner())
    }

    pub async fn update(&self, id: i64, form: &ProductForm) -> Result<Product, ApiError> {
        let product: Payload<Product> = self
            .api
            .put(&format!("/inventario/productos/{}", id), Some(form), None)
            .await?;
        Ok(product.into_inner())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let _: Payload<Option<serde_json::Value>> = self
            .api
            .delete(&format!("/inventario/productos/{}", id), None)
            .await?;
        Ok(())
    }

    pub async fn summary(&self) -> Result<InventorySummary, ApiError> {
        let summary: Payload<InventorySummary> = self.api.get("/inventario/resumen", None).await?;
        Ok(summary.into_inner())
    }

    pub async fn register_entry(
        &self,
        product_id: i64,
        quantity: i64,
        reason: &str,
    ) -> Result<InventoryMovement, ApiError> {
        self.register_movement("entrada", product_id, quantity, reason).await
    }

    pub async fn register_exit(
        &self,
        product_id: i64,
        quantity: i64,
        reason: &str,
    ) -> Result<InventoryMovement, ApiError> {
        self.register_movement("salida", product_id, quantity, reason).await
    }

    async fn register_movement(
        &self,
        direction: &str,
        product_id: i64,
        quantity: i64,
        reason: &str,
    ) -> Result<InventoryMovement, ApiError> {
        let request = StockMovementRequest {
            product_id,
            quantity,
            reason: reason.to_string(),
        };
        let movement: Payload<InventoryMovement> = self
            .api
            .post(
                &format!("/inventario/movimientos/{}", direction),
                Some(&request),
                None,
            )
            .await?;
        Ok(movement.into_inner())
    }

    /// Stock movements, optionally for a single product
    pub async fn movements(&self, product_id: Option<i64>) -> Result<Vec<InventoryMovement>, ApiError> {
        let mut options = RequestOptions::new();
        if let Some(id) = product_id {
            options = options.query("productoId", id);
        }
        let movements: Payload<Vec<InventoryMovement>> =
            self.api.get("/inventario/movimientos", Some(options)).await?;
        Ok(movements.into_inner())
    }

    pub async fn low_stock(&self) -> Result<Vec<Product>, ApiError> {
        let products: Payload<Vec<Product>> = self
            .api
            .get("/inventario/productos/stock-bajo", None)
            .await?;
        Ok(products.into_inner())
    }

    /// Products expiring within `days` (30 when `None`)
    pub async fn expiring(&self, days: Option<u32>) -> Result<Vec<Product>, ApiError> {
        let options = RequestOptions::new().query("dias", days.unwrap_or(DEFAULT_EXPIRY_WINDOW_DAYS));
        let products: Payload<Vec<Product>> = self
            .api
            .get("/inventario/productos/proximos-vencer", Some(options))
            .await?;
        Ok(products.into_inner())
    }
}
