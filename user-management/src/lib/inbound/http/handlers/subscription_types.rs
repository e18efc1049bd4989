use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::FieldErrors;
use super::JsonBody;
use crate::domain::subscription_type::models::Plan;
use crate::domain::subscription_type::models::ProductKey;
use crate::domain::subscription_type::models::SubscriptionType;
use crate::domain::subscription_type::models::SubscriptionTypeDraft;
use crate::domain::subscription_type::models::SubscriptionTypeId;
use crate::domain::user::models::Name;
use crate::inbound::http::router::AppState;

pub async fn list_subscription_types(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<SubscriptionTypeResponseData>>, ApiError> {
    state
        .subscription_type_service
        .list_subscription_types()
        .await
        .map_err(ApiError::from)
        .map(|types| {
            ApiSuccess::ok(types.iter().map(SubscriptionTypeResponseData::from).collect())
        })
}

pub async fn get_subscription_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<SubscriptionTypeResponseData>, ApiError> {
    let id = parse_id(&id)?;

    state
        .subscription_type_service
        .get_subscription_type(&id)
        .await
        .map_err(ApiError::from)
        .map(|ref subscription_type| ApiSuccess::ok(subscription_type.into()))
}

pub async fn get_subscription_type_by_product_key(
    State(state): State<AppState>,
    Path(product_key): Path<String>,
) -> Result<ApiSuccess<SubscriptionTypeResponseData>, ApiError> {
    state
        .subscription_type_service
        .get_by_product_key(&product_key)
        .await
        .map_err(ApiError::from)
        .map(|ref subscription_type| ApiSuccess::ok(subscription_type.into()))
}

pub async fn get_subscription_type_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<ApiSuccess<SubscriptionTypeResponseData>, ApiError> {
    state
        .subscription_type_service
        .get_by_name(&name)
        .await
        .map_err(ApiError::from)
        .map(|ref subscription_type| ApiSuccess::ok(subscription_type.into()))
}

pub async fn create_subscription_type(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SubscriptionTypeRequest>,
) -> Result<ApiSuccess<SubscriptionTypeResponseData>, ApiError> {
    state
        .subscription_type_service
        .create_subscription_type(body.try_into_draft()?)
        .await
        .map_err(ApiError::from)
        .map(|ref subscription_type| ApiSuccess::ok(subscription_type.into()))
}

pub async fn update_subscription_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<SubscriptionTypeRequest>,
) -> Result<ApiSuccess<SubscriptionTypeResponseData>, ApiError> {
    let id = parse_id(&id)?;

    state
        .subscription_type_service
        .update_subscription_type(&id, body.try_into_draft()?)
        .await
        .map_err(ApiError::from)
        .map(|ref subscription_type| ApiSuccess::ok(subscription_type.into()))
}

pub async fn delete_subscription_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;

    state
        .subscription_type_service
        .delete_subscription_type(&id)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(id: &str) -> Result<SubscriptionTypeId, ApiError> {
    SubscriptionTypeId::from_string(id).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// HTTP request body for creating or replacing a subscription type (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubscriptionTypeRequest {
    name: String,
    access_months: Option<i32>,
    price_cents: Option<i64>,
    product_key: Option<String>,
}

impl SubscriptionTypeRequest {
    fn try_into_draft(self) -> Result<SubscriptionTypeDraft, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = errors.check("name", Name::new(self.name));
        let plan = errors.check("plan", Plan::new(self.access_months, self.price_cents));
        let product_key = errors.check(
            "productKey",
            self.product_key
                .filter(|k| !k.trim().is_empty())
                .map(|k| ProductKey::new(&k))
                .transpose(),
        );

        match (name, plan, product_key) {
            (Some(name), Some(plan), Some(product_key)) => Ok(SubscriptionTypeDraft {
                name,
                plan,
                product_key,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionTypeResponseData {
    pub id: i64,
    pub name: String,
    pub access_months: Option<i32>,
    pub price_cents: Option<i64>,
    pub product_key: Option<String>,
}

impl From<&SubscriptionType> for SubscriptionTypeResponseData {
    fn from(subscription_type: &SubscriptionType) -> Self {
        Self {
            id: subscription_type.id.0,
            name: subscription_type.name.as_str().to_string(),
            access_months: subscription_type.plan.access_months(),
            price_cents: subscription_type.plan.price_cents(),
            product_key: subscription_type
                .product_key
                .as_ref()
                .map(|k| k.as_str().to_string()),
        }
    }
}
