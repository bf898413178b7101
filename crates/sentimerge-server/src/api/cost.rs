use axum::{extract::State, Extension, Json};
use chrono::Utc;
use rust_decimal::Decimal;
use sentimerge_core::{billing_month, MonthlyCost};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct CurrentCost {
    #[serde(flatten)]
    pub cost: MonthlyCost,
    pub monthly_budget: Decimal,
    pub budget_exceeded: bool,
}

pub(super) async fn current_cost(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<CurrentCost>>, ApiError> {
    let month = billing_month(Utc::now());
    let cost = sentimerge_db::get_monthly_cost(&state.pool, &month)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .map_or_else(|| MonthlyCost::empty(month), MonthlyCost::from);

    Ok(Json(ApiResponse {
        data: CurrentCost {
            budget_exceeded: cost.exceeds(state.monthly_budget),
            monthly_budget: state.monthly_budget,
            cost,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
