//! HTTP handlers, one per gateway route.
//!
//! Each handler decodes its input, calls the user service through
//! [`UserServiceHandle`](crate::http::upstream::UserServiceHandle) and
//! serializes the result as a single JSON document.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::http::request::request_id;
use crate::http::response::GatewayError;
use crate::http::server::AppState;
use crate::rpc::proto::{CreateUserRequest, CreateUserResponse, GetUserResponse, User};

/// Query string of `GET /users/get`.
#[derive(Debug, Deserialize)]
pub struct GetUserQuery {
    pub id: Option<String>,
}

/// Body of a successful `GET /users/list`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListUsersBody {
    pub users: Vec<User>,
    pub count: usize,
}

/// `POST /users/create`
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CreateUserResponse>, GatewayError> {
    let request_id = request_id(&headers);
    let input: CreateUserRequest =
        serde_json::from_slice(&body).map_err(|e| GatewayError::Decode(e.to_string()))?;

    info!(
        request_id = %request_id,
        name = %input.name,
        email = %input.email,
        "Received CreateUser request"
    );

    let response = state.users.create_user(input).await.map_err(|e| {
        warn!(request_id = %request_id, error = %e, "CreateUser call failed");
        e
    })?;

    if let Some(user) = &response.user {
        info!(request_id = %request_id, user_id = %user.id, "User created");
    }
    Ok(Json(response))
}

/// `GET /users/get?id=...`
pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<GetUserQuery>, QueryRejection>,
) -> Result<Json<GetUserResponse>, GatewayError> {
    let request_id = request_id(&headers);
    let Query(query) = query.map_err(|e| GatewayError::Decode(e.body_text()))?;
    let id = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| GatewayError::Decode("id parameter required".to_string()))?;

    info!(request_id = %request_id, user_id = %id, "Received GetUser request");

    let response = state.users.get_user(id).await.map_err(|e| {
        warn!(request_id = %request_id, error = %e, "GetUser call failed");
        e
    })?;
    Ok(Json(response))
}

/// `GET /users/list`
pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListUsersBody>, GatewayError> {
    let request_id = request_id(&headers);
    info!(request_id = %request_id, limit = state.list_limit, "Received ListUsers request");

    let users = state.users.list_users(state.list_limit).await.map_err(|e| {
        warn!(request_id = %request_id, error = %e, "ListUsers call failed");
        e
    })?;

    info!(request_id = %request_id, count = users.len(), "Stream finished");
    let count = users.len();
    Ok(Json(ListUsersBody { users, count }))
}

/// `GET /health`
pub async fn health() -> &'static str {
    "OK"
}

/// Fallback for a known path with the wrong method.
pub async fn method_not_allowed() -> GatewayError {
    GatewayError::MethodNotAllowed
}
