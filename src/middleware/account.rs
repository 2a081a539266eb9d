use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::store::MemoryStore;

/// Account resolved by the gate, injected into request extensions for the
/// downstream technology handlers.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: uuid::Uuid,
    pub username: String,
}

/// Account-resolution gate applied to every technology route.
///
/// Reads the `username` request header and looks the account up in the user
/// directory. Unknown, missing, or malformed usernames terminate the request
/// with 404 before the handler runs; otherwise the resolved account is
/// attached to the request.
pub async fn validate_account_middleware(
    State(store): State<Arc<MemoryStore>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let username = request
        .headers()
        .get("username")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::not_found("User does not exist."))?;

    let user = store.find_user_by_username(username).ok_or_else(|| {
        tracing::warn!("Account resolution failed: unknown username '{}'", username);
        ApiError::not_found("User does not exist.")
    })?;

    tracing::debug!("Account resolved: {} ({})", user.username, user.id);

    request.extensions_mut().insert(CurrentUser {
        id: user.id,
        username: user.username,
    });

    Ok(next.run(request).await)
}
