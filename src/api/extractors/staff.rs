use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use crate::state::AppState;
use std::sync::Arc;

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Gate for staff-only routes. The token is a shared operational secret
/// handed out by configuration, not a per-user credential.
pub struct StaffAuth;

impl<S> FromRequestParts<S> for StaffAuth
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        match bearer_token(parts) {
            Some(token) if token == app_state.config.staff_api_token => Ok(StaffAuth),
            Some(_) => Err(StatusCode::FORBIDDEN),
            None => Err(StatusCode::UNAUTHORIZED),
        }
    }
}

/// Like [`StaffAuth`] but optional: routes that behave differently for
/// staff (e.g. cancellation) read `.0` to decide. A wrong token is still
/// rejected outright.
pub struct MaybeStaff(pub bool);

impl<S> FromRequestParts<S> for MaybeStaff
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        match bearer_token(parts) {
            Some(token) if token == app_state.config.staff_api_token => Ok(MaybeStaff(true)),
            Some(_) => Err(StatusCode::FORBIDDEN),
            None => Ok(MaybeStaff(false)),
        }
    }
}
