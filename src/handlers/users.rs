use std::sync::Arc;

use axum::extract::{Json, State};
use serde::Deserialize;

use crate::middleware::{ApiResponse, ApiResult};
use crate::store::{MemoryStore, User};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub username: String,
}

/// POST /users - Register a new account with an empty technology list
pub async fn create(
    State(store): State<Arc<MemoryStore>>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<User> {
    let user = store.create_user(&payload.name, &payload.username)?;

    tracing::info!("Created user '{}' ({})", user.username, user.id);
    Ok(ApiResponse::created(user))
}
