use std::sync::Arc;

use axum::extract::{Multipart, Query, State};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use super::UserQuery;
use crate::error::{invalid, ApiResult};
use crate::state::AppState;
use caixa_core::ofx::ImportSummary;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportResponse {
    success: bool,
    message: String,
    transactions_imported: usize,
    transactions_skipped: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

impl From<ImportSummary> for ImportResponse {
    fn from(summary: ImportSummary) -> Self {
        let message = if summary.imported > 0 {
            format!(
                "Importação concluída! {} transações importadas, {} ignoradas.",
                summary.imported, summary.skipped
            )
        } else {
            "Nenhuma transação nova encontrada para importar.".to_string()
        };
        Self {
            success: true,
            message,
            transactions_imported: summary.imported,
            transactions_skipped: summary.skipped,
            errors: summary.errors,
        }
    }
}

struct UploadForm {
    account_id: Option<String>,
    content: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> ApiResult<UploadForm> {
    let mut form = UploadForm {
        account_id: None,
        content: None,
    };
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| invalid(format!("malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("account_id") => {
                form.account_id = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| invalid(format!("unreadable account_id field: {e}")))?,
                );
            }
            Some("ofx_file") => {
                form.content = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| invalid(format!("unreadable ofx_file field: {e}")))?,
                );
            }
            _ => {}
        }
    }
    Ok(form)
}

async fn import_ofx(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = read_form(multipart).await?;
    let account_id = form
        .account_id
        .ok_or_else(|| invalid("account_id is required"))?;
    let content = form.content.ok_or_else(|| invalid("ofx_file is required"))?;

    let summary = state
        .ofx_service
        .import(&account_id, &query.user_id, &content)
        .await?;
    Ok(Json(ImportResponse::from(summary)))
}

async fn preview_ofx(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = read_form(multipart).await?;
    let content = form.content.ok_or_else(|| invalid("ofx_file is required"))?;
    let entries = state.ofx_service.preview(&content);
    Ok(Json(entries))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/ofx/import", post(import_ofx))
        .route("/api/ofx/preview", post(preview_ofx))
}
