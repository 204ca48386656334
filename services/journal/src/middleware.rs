//! Authentication middleware for the credential header

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{auth, error::ApiError, state::AppState};

/// Authenticate the request and insert the [`auth::AuthUser`] into its
/// extensions
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = auth::authenticate(
        state.users.as_ref(),
        req.headers().get(header::AUTHORIZATION),
    )
    .await?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
