use super::{ClientError, HttpClient};
use async_trait::async_trait;
use catalog_models::{
    Product, ProductPayload, Region, RegisterRequest, TherapeuticArea,
    TokenResponse, User,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Query parameters of `GET /products`, in wire order.
pub type QueryParams = Vec<(&'static str, String)>;

/// Endpoints of the catalog service.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Credential exchange (`POST /users/token`, form encoded).
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, ClientError>;

    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<Value, ClientError>;

    async fn current_user(&self) -> Result<User, ClientError>;

    /// `Ok(None)` when the service answered with something other than an
    /// array.
    async fn list_products(
        &self,
        params: &QueryParams,
    ) -> Result<Option<Vec<Product>>, ClientError>;

    async fn get_product(&self, id: i64) -> Result<Product, ClientError>;

    async fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<Value, ClientError>;

    async fn update_product(
        &self,
        id: i64,
        payload: &ProductPayload,
    ) -> Result<Value, ClientError>;

    async fn delete_product(&self, id: i64) -> Result<(), ClientError>;

    async fn therapeutic_areas(
        &self,
    ) -> Result<Vec<TherapeuticArea>, ClientError>;

    async fn regions(&self) -> Result<Vec<Region>, ClientError>;
}

fn decode<T: DeserializeOwned>(body: Option<Value>) -> Result<T, ClientError> {
    Ok(serde_json::from_value(body.unwrap_or(Value::Null))?)
}

/// A body-less write (204) reads as `{"success": true}`.
fn success_or_body(body: Option<Value>) -> Value {
    body.unwrap_or_else(|| serde_json::json!({ "success": true }))
}

#[async_trait]
impl CatalogApi for HttpClient {
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, ClientError> {
        let form = [("username", username), ("password", password)];
        let body = self.post_form("/users/token", &form).await?;
        decode(body)
    }

    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<Value, ClientError> {
        let body = self.post("/users/register", request).await?;
        Ok(success_or_body(body))
    }

    async fn current_user(&self) -> Result<User, ClientError> {
        decode(self.get("/users/me", &[]).await?)
    }

    async fn list_products(
        &self,
        params: &QueryParams,
    ) -> Result<Option<Vec<Product>>, ClientError> {
        match self.get("/products", params).await? {
            Some(items @ Value::Array(_)) => {
                Ok(Some(serde_json::from_value(items)?))
            }
            _ => Ok(None),
        }
    }

    async fn get_product(&self, id: i64) -> Result<Product, ClientError> {
        decode(self.get(&format!("/products/{id}"), &[]).await?)
    }

    async fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<Value, ClientError> {
        Ok(success_or_body(self.post("/products", payload).await?))
    }

    async fn update_product(
        &self,
        id: i64,
        payload: &ProductPayload,
    ) -> Result<Value, ClientError> {
        let body = self.put(&format!("/products/{id}"), payload).await?;
        Ok(success_or_body(body))
    }

    async fn delete_product(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/products/{id}")).await?;
        Ok(())
    }

    async fn therapeutic_areas(
        &self,
    ) -> Result<Vec<TherapeuticArea>, ClientError> {
        decode(self.get("/products/therapeutic-areas/", &[]).await?)
    }

    async fn regions(&self) -> Result<Vec<Region>, ClientError> {
        decode(self.get("/products/regions/", &[]).await?)
    }
}
