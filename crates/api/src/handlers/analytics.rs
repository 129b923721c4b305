//! Handler for the admin analytics dashboard.

use axum::extract::State;
use axum::Json;
use scholarhub_db::models::analytics::AnalyticsDashboard;
use scholarhub_db::repositories::AnalyticsRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/analytics
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<AnalyticsDashboard>>> {
    let dashboard = AnalyticsRepo::dashboard(&state.pool, &state.columns).await?;
    Ok(Json(DataResponse { data: dashboard }))
}
