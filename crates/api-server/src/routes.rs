use crate::dto::{BirthDateRangeQuery, UserRegistrationRequest, UserResponse};
use crate::error::ApiError;
use application::UserApp;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use domain::validation;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub user_app: Arc<UserApp>,
}

impl AppState {
    pub fn new(user_app: UserApp) -> Self {
        Self {
            user_app: Arc::new(user_app),
        }
    }
}

pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/registration", post(register))
        .route("/users/searchByBirthDateRange", get(search_by_birth_date_range))
        .route(
            "/users/:id",
            get(get_user)
                .put(update_user)
                .patch(update_user_partially)
                .delete(delete_user),
        )
        .route("/health", get(health_check))
        .with_state(state)
}

async fn register(
    State(state): State<AppState>,
    payload: Result<Json<UserRegistrationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let service = &state.user_app.user_service;

    let details = payload.validate(service.minimum_age(), validation::today())?;
    let user = service.register(details).await?;
    info!("📥 Registered user {}", user.id);

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<UserRegistrationRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(payload) = payload?;
    let service = &state.user_app.user_service;

    let details = payload.validate(service.minimum_age(), validation::today())?;
    let user = service.update_user_info(id, details).await?;

    Ok(Json(user.into()))
}

async fn update_user_partially(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(fields) = payload?;
    let user = state
        .user_app
        .user_service
        .update_user_info_partially(id, &fields)
        .await?;

    Ok(Json(user.into()))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.user_app.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn search_by_birth_date_range(
    State(state): State<AppState>,
    Query(query): Query<BirthDateRangeQuery>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let (from_date, to_date) = query.range()?;
    let users = state
        .user_app
        .user_service
        .search_by_birth_date_range(from_date, to_date)
        .await?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.user_app.user_service.find_user(id).await?;
    Ok(Json(user.into()))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.user_app.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
