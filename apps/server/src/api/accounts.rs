use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::UserQuery;
use crate::error::ApiResult;
use crate::state::AppState;
use caixa_core::accounts::{AccountType, AccountUpdate, NewAccount};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateAccountBody {
    name: String,
    currency: String,
    color: Option<String>,
    #[serde(rename = "type")]
    account_type: AccountType,
    #[serde(default = "default_true")]
    is_active: bool,
    #[serde(default)]
    initial_value: Decimal,
    due_date: NaiveDate,
    competence_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateAccountBody {
    name: String,
    currency: String,
    color: Option<String>,
    #[serde(rename = "type")]
    account_type: AccountType,
    #[serde(default = "default_true")]
    is_active: bool,
    initial_value: Option<Decimal>,
    due_date: Option<NaiveDate>,
    competence_date: Option<NaiveDate>,
}

fn default_true() -> bool {
    true
}

async fn create_account(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
    Json(body): Json<CreateAccountBody>,
) -> ApiResult<impl IntoResponse> {
    let account = state
        .account_service
        .create_account(NewAccount {
            id: None,
            user_id: query.user_id,
            name: body.name,
            currency: body.currency,
            color: body.color,
            account_type: body.account_type,
            is_active: body.is_active,
            initial_value: body.initial_value,
            due_date: body.due_date,
            competence_date: body.competence_date,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(account)))
}

async fn list_accounts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> ApiResult<impl IntoResponse> {
    let accounts = state.account_service.list_accounts(&query.user_id)?;
    Ok(Json(accounts))
}

async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> ApiResult<impl IntoResponse> {
    let account = state
        .account_service
        .get_account(&account_id, &query.user_id)?;
    Ok(Json(account))
}

async fn update_account(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<String>,
    Query(query): Query<UserQuery>,
    Json(body): Json<UpdateAccountBody>,
) -> ApiResult<impl IntoResponse> {
    let account = state
        .account_service
        .update_account(AccountUpdate {
            id: Some(account_id),
            user_id: query.user_id,
            name: body.name,
            currency: body.currency,
            color: body.color,
            account_type: body.account_type,
            is_active: body.is_active,
            initial_value: body.initial_value,
            due_date: body.due_date,
            competence_date: body.competence_date,
        })
        .await?;
    Ok(Json(account))
}

async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> ApiResult<impl IntoResponse> {
    state
        .account_service
        .delete_account(&account_id, &query.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_initial_transaction(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> ApiResult<impl IntoResponse> {
    let transaction = state
        .account_service
        .get_opening_balance_transaction(&account_id, &query.user_id)?;
    Ok(Json(transaction))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/accounts", get(list_accounts).post(create_account))
        .route(
            "/api/accounts/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
        .route(
            "/api/accounts/{id}/initial-transaction",
            get(get_initial_transaction),
        )
}
