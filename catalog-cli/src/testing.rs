//! In-memory stand-ins for the catalog service.

use crate::client::{CatalogApi, ClientError, QueryParams};
use async_trait::async_trait;
use catalog_models::{
    Product, ProductPayload, Region, RegisterRequest, TherapeuticArea,
    TokenResponse, User,
};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String),
    Register(String),
    CurrentUser,
    List(QueryParams),
    Get(i64),
    Create(ProductPayload),
    Update(i64, ProductPayload),
    Delete(i64),
    Areas,
    Regions,
}

#[derive(Debug, Clone)]
pub enum ListReply {
    Items(Vec<Product>),
    NotArray,
    Fail(u16, String),
}

impl ListReply {
    pub fn items(ids: impl IntoIterator<Item = i64>) -> Self {
        Self::Items(ids.into_iter().map(|id| product(id, 1)).collect())
    }

    pub fn queue(replies: Vec<ListReply>) -> Mutex<VecDeque<ListReply>> {
        Mutex::new(replies.into())
    }
}

pub fn product(id: i64, creator_id: i64) -> Product {
    Product {
        id,
        name: format!("Product {id}"),
        ingredient: "paracetamol".into(),
        description: format!("Description {id}"),
        therapeutic_area_id: Some(1),
        therapeutic_area: TherapeuticArea {
            id: 1,
            name: "Analgesics".into(),
        },
        regions: vec![Region {
            id: 2,
            name: "EU".into(),
        }],
        creation_date: "2024-05-01".into(),
        creator_id: Some(creator_id),
        creator: User {
            id: creator_id,
            name: Some(format!("User {creator_id}")),
            ..Default::default()
        },
    }
}

fn fail(status: u16, message: &str) -> ClientError {
    ClientError::api_error(status, message)
}

/// Scripted [`CatalogApi`] that records every call it receives.
#[derive(Debug, Default)]
pub struct FakeApi {
    pub issued_token: Option<String>,
    pub login_error: Option<(u16, String)>,
    pub user: Option<User>,
    /// Failure for `current_user` other than the missing-user 401.
    pub user_error: Option<(u16, String)>,
    /// Replies for successive `list_products` calls; an empty queue answers
    /// with an empty list.
    pub list_replies: Mutex<VecDeque<ListReply>>,
    pub products: Vec<Product>,
    pub write_error: Option<(u16, String)>,
    /// Body returned by `register` instead of the default created user.
    pub register_reply: Option<Value>,
    /// Makes both reference lookups (areas, regions) fail.
    pub reference_error: Option<(u16, String)>,
    pub regions: Vec<Region>,
    pub areas: Vec<TherapeuticArea>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn with_user(id: i64) -> Self {
        Self {
            user: Some(User {
                id,
                username: Some(format!("user{id}")),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn listing(replies: Vec<ListReply>) -> Self {
        Self {
            list_replies: ListReply::queue(replies),
            ..Default::default()
        }
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_queries(&self) -> Vec<QueryParams> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::List(q) => Some(q),
                _ => None,
            })
            .collect()
    }

    fn check_reference(&self) -> Result<(), ClientError> {
        match &self.reference_error {
            Some((status, message)) => Err(fail(*status, message)),
            None => Ok(()),
        }
    }

    fn check_write(&self) -> Result<(), ClientError> {
        match &self.write_error {
            Some((status, message)) => Err(fail(*status, message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogApi for FakeApi {
    async fn login(
        &self,
        username: &str,
        _password: &str,
    ) -> Result<TokenResponse, ClientError> {
        self.record(Call::Login(username.to_string()));
        if let Some((status, message)) = &self.login_error {
            return Err(fail(*status, message));
        }
        Ok(TokenResponse {
            access_token: self.issued_token.clone(),
            token_type: Some("bearer".into()),
        })
    }

    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<Value, ClientError> {
        self.record(Call::Register(request.username.clone()));
        self.check_write()?;
        Ok(self.register_reply.clone().unwrap_or_else(|| {
            json!({"id": 99, "email": request.email, "name": request.name})
        }))
    }

    async fn current_user(&self) -> Result<User, ClientError> {
        self.record(Call::CurrentUser);
        if let Some((status, message)) = &self.user_error {
            return Err(fail(*status, message));
        }
        self.user
            .clone()
            .ok_or_else(|| fail(401, "Could not validate credentials"))
    }

    async fn list_products(
        &self,
        params: &QueryParams,
    ) -> Result<Option<Vec<Product>>, ClientError> {
        self.record(Call::List(params.clone()));
        let reply = self.list_replies.lock().unwrap().pop_front();
        match reply {
            None => Ok(Some(Vec::new())),
            Some(ListReply::Items(items)) => Ok(Some(items)),
            Some(ListReply::NotArray) => Ok(None),
            Some(ListReply::Fail(status, message)) => {
                Err(fail(status, &message))
            }
        }
    }

    async fn get_product(&self, id: i64) -> Result<Product, ClientError> {
        self.record(Call::Get(id));
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| fail(404, "Product not found"))
    }

    async fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<Value, ClientError> {
        self.record(Call::Create(payload.clone()));
        self.check_write()?;
        Ok(json!({"id": 100}))
    }

    async fn update_product(
        &self,
        id: i64,
        payload: &ProductPayload,
    ) -> Result<Value, ClientError> {
        self.record(Call::Update(id, payload.clone()));
        self.check_write()?;
        Ok(json!({"id": id}))
    }

    async fn delete_product(&self, id: i64) -> Result<(), ClientError> {
        self.record(Call::Delete(id));
        self.check_write()
    }

    async fn therapeutic_areas(
        &self,
    ) -> Result<Vec<TherapeuticArea>, ClientError> {
        self.record(Call::Areas);
        self.check_reference()?;
        Ok(self.areas.clone())
    }

    async fn regions(&self) -> Result<Vec<Region>, ClientError> {
        self.record(Call::Regions);
        self.check_reference()?;
        Ok(self.regions.clone())
    }
}
