use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::inbound::http::router::AppState;
use crate::user::models::Identity;
use crate::user::models::Role;
use crate::user::models::UserId;

/// Authentication gate.
///
/// Extracts the bearer token, verifies it, and attaches the resolved
/// [`Identity`] to the request extensions for downstream gates and handlers.
/// Any verification failure (bad signature, expired, unparseable claims)
/// produces the same 401 body; the reason is logged but never surfaced.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims: auth::Claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        unauthenticated()
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a valid user id");
        unauthenticated()
    })?;

    // A role outside the closed set authorizes nothing
    let role = Role::from_str(&claims.role).map_err(|e| {
        tracing::warn!(error = %e, "Token carries an unrecognized role");
        unauthenticated()
    })?;

    req.extensions_mut().insert(Identity { user_id, role });

    Ok(next.run(req).await)
}

/// Role authorization gate factory.
///
/// Builds a middleware that rejects any request whose resolved identity role
/// is not in `allowed_roles`. Must be composed after [`authenticate`]; a
/// request arriving without an identity is treated as unauthenticated rather
/// than trusted.
pub fn authorize(
    allowed_roles: impl IntoIterator<Item = Role>,
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Result<Response, Response>> + Send>>
       + Clone
       + Send
       + 'static {
    let allowed: Arc<HashSet<Role>> = Arc::new(allowed_roles.into_iter().collect());

    move |req: Request, next: Next| {
        let allowed = Arc::clone(&allowed);
        Box::pin(async move {
            let identity = req
                .extensions()
                .get::<Identity>()
                .copied()
                .ok_or_else(|| {
                    tracing::warn!("Role gate reached without an authenticated identity");
                    unauthenticated()
                })?;

            if !allowed.contains(&identity.role) {
                return Err((
                    StatusCode::FORBIDDEN,
                    Json(json!({
                        "error": "Access denied. Insufficient permissions."
                    })),
                )
                    .into_response());
            }

            Ok(next.run(req).await)
        })
    }
}

/// Gate allowing only admins.
pub fn admin_only(
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Result<Response, Response>> + Send>>
       + Clone
       + Send
       + 'static {
    authorize([Role::Admin])
}

/// Gate allowing any authenticated role.
pub fn customer_or_admin(
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Result<Response, Response>> + Send>>
       + Clone
       + Send
       + 'static {
    authorize([Role::Customer, Role::Admin])
}

fn unauthenticated() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "Invalid or expired token"
        })),
    )
        .into_response()
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Missing Authorization header"
                })),
            )
                .into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| unauthenticated())?;

    if !auth_str.starts_with("Bearer ") {
        return Err(unauthenticated());
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
