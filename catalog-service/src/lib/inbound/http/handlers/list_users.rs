use axum::extract::State;
use axum::http::StatusCode;

use super::register::UserData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// List all registered users. Admin-only surface; the route carries the
/// admin role gate.
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let users = state.user_service.list_users().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        users.iter().map(UserData::from).collect(),
    ))
}
