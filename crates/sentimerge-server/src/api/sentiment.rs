use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use chrono::Utc;
use sentimerge_core::{aws_units_for, billing_month, gcp_units_for};
use sentimerge_db::UsageOutcome;
use sentimerge_sentiment::{providers::MAX_TEXT_BYTES, MergedEntities};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_db_error, map_sentiment_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Returns the text to analyze, or why it cannot be analyzed.
fn validate_text(body: Result<Json<AnalyzeRequest>, JsonRejection>) -> Result<String, String> {
    let Json(request) = body.map_err(|e| format!("invalid request body: {}", e.body_text()))?;
    let text = request.text.unwrap_or_default();
    if text.trim().is_empty() {
        return Err("text must not be empty".to_string());
    }
    if text.len() > MAX_TEXT_BYTES {
        return Err(format!(
            "text is {} bytes; at most {MAX_TEXT_BYTES} are accepted",
            text.len()
        ));
    }
    Ok(text)
}

pub(super) async fn analyze_sentiment(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<MergedEntities>>, ApiError> {
    let text =
        validate_text(body).map_err(|msg| ApiError::new(req_id.0.clone(), "validation_error", msg))?;

    let month = billing_month(Utc::now());
    let outcome = sentimerge_db::record_usage_within_budget(
        &state.pool,
        &month,
        aws_units_for(&text),
        gcp_units_for(&text),
        state.monthly_budget,
    )
    .await
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    if let UsageOutcome::BudgetExhausted(spent) = outcome {
        tracing::warn!(
            month = %month,
            total_cost = %spent.total_cost,
            budget = %state.monthly_budget,
            "monthly budget exhausted; refusing analysis"
        );
        return Err(ApiError::new(
            req_id.0,
            "budget_exceeded",
            format!("monthly budget of ${} has been reached", state.monthly_budget),
        ));
    }

    let merged = state
        .analyzer
        .analyze_sentiment(&text)
        .await
        .map_err(|e| map_sentiment_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: merged,
        meta: ResponseMeta::new(req_id.0),
    }))
}
