//! User and friendship handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{User, UserResponse};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

/// User creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// User display name
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// User age, kept verbatim as a string
    #[validate(length(min = 1, message = "age is required"))]
    pub age: String,
}

/// Friendship creation request
#[derive(Debug, Deserialize, Validate)]
pub struct MakeFriendsRequest {
    #[validate(length(min = 1, message = "source_id is required"))]
    pub source_id: String,
    #[validate(length(min = 1, message = "target_id is required"))]
    pub target_id: String,
}

/// User deletion request
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteUserRequest {
    #[validate(length(min = 1, message = "target_id is required"))]
    pub target_id: String,
}

/// Age update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAgeRequest {
    #[validate(length(min = 1, message = "new_age is required"))]
    pub new_age: String,
}

/// Create user and friendship routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_user))
        .route("/make_friends", post(make_friends))
        .route("/user", delete(delete_user))
        .route("/friends/:id", get(get_friends))
        .route("/:id", put(update_age))
}

/// Create a new user with a repository-assigned identifier
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created<UserResponse>> {
    let id = state.repository.make_id().await?;
    let user = User::new(id, payload.name, payload.age);
    state.repository.create(user.clone()).await?;

    Ok(Created(UserResponse::from(user)))
}

/// Link two users as friends
pub async fn make_friends(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<MakeFriendsRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let message = state
        .repository
        .make_friends(&payload.source_id, &payload.target_id)
        .await?;

    Ok(Json(ApiResponse::message(message)))
}

/// Delete a user and remove it from all peers' friend lists
pub async fn delete_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<DeleteUserRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let message = state.repository.delete(&payload.target_id).await?;

    Ok(Json(ApiResponse::message(message)))
}

/// List the full records of a user's friends
pub async fn get_friends(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let friends = state.repository.find_friends(&id).await?;
    let friends = friends.into_iter().map(UserResponse::from).collect();

    Ok(Json(ApiResponse::success(friends)))
}

/// Update a user's age
pub async fn update_age(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateAgeRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.repository.update_age(&id, &payload.new_age).await?;

    Ok(Json(ApiResponse::message(format!("user {} updated", id))))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::predicate::eq;

    use super::*;
    use crate::errors::AppError;
    use crate::infra::MockUserRepository;

    fn state_with(repository: MockUserRepository) -> AppState {
        AppState::new(Arc::new(repository))
    }

    #[tokio::test]
    async fn create_user_assigns_id_before_persisting() {
        let mut repository = MockUserRepository::new();
        repository.expect_make_id().returning(|| Ok("1".to_string()));
        repository
            .expect_create()
            .withf(|user| user.id == "1" && user.name == "Helen" && user.friends.is_empty())
            .returning(|_| Ok(()));

        let response = create_user(
            State(state_with(repository)),
            ValidatedJson(CreateUserRequest {
                name: "Helen".to_string(),
                age: "18".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.id, "1");
        assert_eq!(response.0.age, "18");
    }

    #[tokio::test]
    async fn make_friends_propagates_conflict() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_make_friends()
            .with(eq("1"), eq("2"))
            .returning(|a, b| Err(AppError::AlreadyFriends(a.to_string(), b.to_string())));

        let err = make_friends(
            State(state_with(repository)),
            ValidatedJson(MakeFriendsRequest {
                source_id: "1".to_string(),
                target_id: "2".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::AlreadyFriends(_, _)));
    }

    #[tokio::test]
    async fn delete_returns_repository_message() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_delete()
            .with(eq("2"))
            .returning(|_| Ok("user Bob deleted".to_string()));

        let response = delete_user(
            State(state_with(repository)),
            ValidatedJson(DeleteUserRequest {
                target_id: "2".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.message.as_deref(), Some("user Bob deleted"));
    }
}
