use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use serde::Deserialize;

use super::UserQuery;
use crate::error::ApiResult;
use crate::state::AppState;
use caixa_core::categories::{CategoryType, CategoryUpdate, NewCategory};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCategoryBody {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "type")]
    category_type: CategoryType,
    #[serde(default)]
    color: String,
    #[serde(default)]
    icon: String,
    parent_id: Option<String>,
    visible: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateCategoryBody {
    name: String,
    #[serde(default)]
    description: String,
    color: String,
    #[serde(default)]
    icon: String,
    is_active: Option<bool>,
    visible: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateColorBody {
    color: String,
}

async fn create_category(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
    Json(body): Json<CreateCategoryBody>,
) -> ApiResult<impl IntoResponse> {
    let category = state
        .category_service
        .create_category(NewCategory {
            id: None,
            user_id: Some(query.user_id),
            name: body.name,
            description: body.description,
            category_type: body.category_type,
            color: body.color,
            icon: body.icon,
            parent_id: body.parent_id,
            visible: body.visible,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn list_categories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> ApiResult<impl IntoResponse> {
    let categories = state.category_service.list_categories(&query.user_id)?;
    Ok(Json(categories))
}

async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let category = state.category_service.get_category(&category_id)?;
    Ok(Json(category))
}

async fn list_by_type(
    State(state): State<Arc<AppState>>,
    Path(category_type): Path<CategoryType>,
    Query(query): Query<UserQuery>,
) -> ApiResult<impl IntoResponse> {
    let categories = state
        .category_service
        .list_by_type(&query.user_id, category_type)?;
    Ok(Json(categories))
}

async fn list_with_subcategories(
    State(state): State<Arc<AppState>>,
    Path(category_type): Path<CategoryType>,
    Query(query): Query<UserQuery>,
) -> ApiResult<impl IntoResponse> {
    let categories = state
        .category_service
        .list_with_subcategories(&query.user_id, category_type)?;
    Ok(Json(categories))
}

async fn list_subcategories(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> ApiResult<impl IntoResponse> {
    let subcategories = state
        .category_service
        .subcategories(&category_id, &query.user_id)?;
    Ok(Json(subcategories))
}

async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<String>,
    Query(query): Query<UserQuery>,
    Json(body): Json<UpdateCategoryBody>,
) -> ApiResult<impl IntoResponse> {
    let category = state
        .category_service
        .update_category(CategoryUpdate {
            id: Some(category_id),
            user_id: query.user_id,
            name: body.name,
            description: body.description,
            color: body.color,
            icon: body.icon,
            is_active: body.is_active,
            visible: body.visible,
        })
        .await?;
    Ok(Json(category))
}

/// Color-only update; the service rebuilds the full update from the stored
/// category so the propagation rules still apply.
async fn update_category_color(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<String>,
    Query(query): Query<UserQuery>,
    Json(body): Json<UpdateColorBody>,
) -> ApiResult<impl IntoResponse> {
    let existing = state.category_service.get_category(&category_id)?;
    let category = state
        .category_service
        .update_category(CategoryUpdate {
            id: Some(category_id),
            user_id: query.user_id,
            name: existing.name,
            description: existing.description,
            color: body.color,
            icon: existing.icon,
            is_active: Some(existing.is_active),
            visible: Some(existing.visible),
        })
        .await?;
    Ok(Json(category))
}

async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> ApiResult<impl IntoResponse> {
    state
        .category_service
        .delete_category(&category_id, &query.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn hard_delete_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.category_service.hard_delete_category(&category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/categories", get(list_categories).post(create_category))
        .route(
            "/api/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route("/api/categories/{id}/color", put(update_category_color))
        .route("/api/categories/{id}/permanent", delete(hard_delete_category))
        .route("/api/categories/{id}/subcategories", get(list_subcategories))
        .route("/api/categories/type/{type}", get(list_by_type))
        .route(
            "/api/categories/with-subcategories/{type}",
            get(list_with_subcategories),
        )
}
