use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::FieldErrors;
use super::JsonBody;
use crate::domain::user::models::Name;
use crate::domain::user_type::models::UserType;
use crate::domain::user_type::models::UserTypeDraft;
use crate::domain::user_type::models::UserTypeId;
use crate::inbound::http::router::AppState;

pub async fn list_user_types(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<UserTypeResponseData>>, ApiError> {
    state
        .user_type_service
        .list_user_types()
        .await
        .map_err(ApiError::from)
        .map(|types| ApiSuccess::ok(types.iter().map(UserTypeResponseData::from).collect()))
}

pub async fn get_user_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<UserTypeResponseData>, ApiError> {
    let id = parse_id(&id)?;

    state
        .user_type_service
        .get_user_type(&id)
        .await
        .map_err(ApiError::from)
        .map(|ref user_type| ApiSuccess::ok(user_type.into()))
}

pub async fn get_user_type_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<ApiSuccess<UserTypeResponseData>, ApiError> {
    state
        .user_type_service
        .get_user_type_by_name(&name)
        .await
        .map_err(ApiError::from)
        .map(|ref user_type| ApiSuccess::ok(user_type.into()))
}

pub async fn create_user_type(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UserTypeRequest>,
) -> Result<ApiSuccess<UserTypeResponseData>, ApiError> {
    state
        .user_type_service
        .create_user_type(body.try_into_draft()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user_type| ApiSuccess::ok(user_type.into()))
}

pub async fn update_user_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UserTypeRequest>,
) -> Result<ApiSuccess<UserTypeResponseData>, ApiError> {
    let id = parse_id(&id)?;

    state
        .user_type_service
        .update_user_type(&id, body.try_into_draft()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user_type| ApiSuccess::ok(user_type.into()))
}

pub async fn delete_user_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;

    state
        .user_type_service
        .delete_user_type(&id)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(id: &str) -> Result<UserTypeId, ApiError> {
    UserTypeId::from_string(id).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// HTTP request body for creating or replacing a user type (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserTypeRequest {
    name: String,
    description: Option<String>,
}

impl UserTypeRequest {
    fn try_into_draft(self) -> Result<UserTypeDraft, FieldErrors> {
        let mut errors = FieldErrors::default();
        match errors.check("name", Name::new(self.name)) {
            Some(name) => Ok(UserTypeDraft::new(name, self.description)),
            None => Err(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserTypeResponseData {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<&UserType> for UserTypeResponseData {
    fn from(user_type: &UserType) -> Self {
        Self {
            id: user_type.id.0,
            name: user_type.name.as_str().to_string(),
            description: user_type.description.clone(),
        }
    }
}
