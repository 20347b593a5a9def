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
use crate::error::{invalid, ApiResult};
use crate::state::AppState;
use caixa_core::transactions::{NewTransaction, TransactionUpdate};
use caixa_core::transfers::TransferRequest;

/// Create body keyed by its declared kind. A `transfer` kind carries the
/// destination account in its own field; plain kinds carry a category.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTransactionBody {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    description: String,
    amount: i64,
    category_id: Option<String>,
    account_id: String,
    destination_account_id: Option<String>,
    due_date: NaiveDate,
    competence_date: NaiveDate,
    #[serde(default)]
    is_paid: bool,
    observation: Option<String>,
    #[serde(default)]
    is_recurring: bool,
    recurring_type: Option<String>,
    #[serde(default = "default_installments")]
    installments: i32,
    #[serde(default = "default_installments")]
    current_installment: i32,
    parent_transaction_id: Option<String>,
    #[serde(default)]
    use_manual_rate: bool,
    manual_rate: Option<Decimal>,
}

fn default_installments() -> i32 {
    1
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
    Json(body): Json<CreateTransactionBody>,
) -> ApiResult<axum::response::Response> {
    match body.kind.as_str() {
        "transfer" => {
            let destination_account_id = body
                .destination_account_id
                .ok_or_else(|| invalid("destinationAccountId is required for transfers"))?;
            let manual_rate = if body.use_manual_rate {
                body.manual_rate
            } else {
                None
            };
            let outcome = state
                .transfer_service
                .create_transfer(TransferRequest {
                    user_id: query.user_id,
                    source_account_id: body.account_id,
                    destination_account_id,
                    amount: body.amount,
                    description: body.description,
                    due_date: body.due_date,
                    competence_date: body.competence_date,
                    is_paid: body.is_paid,
                    observation: body.observation,
                    is_recurring: body.is_recurring,
                    recurring_type: body.recurring_type,
                    installments: body.installments,
                    current_installment: body.current_installment,
                    parent_transaction_id: body.parent_transaction_id,
                    manual_rate,
                })
                .await?;
            Ok((StatusCode::CREATED, Json(outcome)).into_response())
        }
        kind => {
            let transaction_type = kind.parse().map_err(caixa_core::Error::from)?;
            let category_id = body
                .category_id
                .ok_or_else(|| invalid("categoryId is required"))?;
            let transaction = state
                .transaction_service
                .create_transaction(NewTransaction {
                    id: None,
                    user_id: query.user_id,
                    description: body.description,
                    amount: body.amount,
                    transaction_type,
                    category_id,
                    account_id: body.account_id,
                    due_date: body.due_date,
                    competence_date: body.competence_date,
                    is_paid: body.is_paid,
                    observation: body.observation,
                    is_recurring: body.is_recurring,
                    recurring_type: body.recurring_type,
                    installments: body.installments,
                    current_installment: body.current_installment,
                    parent_transaction_id: body.parent_transaction_id,
                    transfer_id: None,
                })
                .await?;
            Ok((StatusCode::CREATED, Json(transaction)).into_response())
        }
    }
}

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> ApiResult<impl IntoResponse> {
    let transactions = state.transaction_service.list_transactions(&query.user_id)?;
    Ok(Json(transactions))
}

async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(transaction_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> ApiResult<impl IntoResponse> {
    let transaction = state
        .transaction_service
        .get_transaction(&transaction_id, &query.user_id)?;
    Ok(Json(transaction))
}

/// Partial update. Identity fields are not part of the update shape, so a
/// body naming them simply has those members ignored.
async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Path(transaction_id): Path<String>,
    Query(query): Query<UserQuery>,
    Json(update): Json<TransactionUpdate>,
) -> ApiResult<impl IntoResponse> {
    let transaction = state
        .transaction_service
        .update_transaction(&transaction_id, &query.user_id, update)
        .await?;
    Ok(Json(transaction))
}

async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(transaction_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> ApiResult<impl IntoResponse> {
    state
        .transaction_service
        .delete_transaction(&transaction_id, &query.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/api/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}
