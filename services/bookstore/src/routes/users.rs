//! User routes

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::{
    error::{ApiError, ApiResult},
    models::{CreateUserDto, CredentialsQuery, UpdateUserDto, UpdateUserPartiallyDto},
    services::UserService,
};

use super::{IdParam, ValidJson};

const USERS_URL: &str = "/api/users";
const USER_URL: &str = "/api/users/:id";
const INVALID_QUERY: &str = "please, fix your query parameters";

/// Create the router for the user resource
pub fn router(service: UserService) -> Router {
    Router::new()
        .route(USERS_URL, get(get_by_credentials).post(create_user))
        .route(
            USER_URL,
            get(get_user)
                .put(update_user)
                .patch(update_user_partially)
                .delete(delete_user),
        )
        .with_state(service)
}

/// Get a user by ID
pub async fn get_user(
    State(service): State<UserService>,
    IdParam(id): IdParam<i64>,
) -> ApiResult<impl IntoResponse> {
    let user = service.get_by_id(id).await?;
    Ok(Json(user))
}

/// Look a user up by the `email` and `password` query parameters
pub async fn get_by_credentials(
    State(service): State<UserService>,
    query: Result<Query<CredentialsQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(query) =
        query.map_err(|rejection| ApiError::bad_request(rejection.body_text(), INVALID_QUERY))?;
    let email = query.email.unwrap_or_default();
    let password = query.password.unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::bad_request(
            "empty email or password",
            "email and password must be provided",
        ));
    }

    let user = service.get_by_email_and_password(&email, &password).await?;
    Ok(Json(user))
}

/// Register a new user
pub async fn create_user(
    State(service): State<UserService>,
    ValidJson(payload): ValidJson<CreateUserDto>,
) -> ApiResult<impl IntoResponse> {
    if !payload.passwords_match() {
        return Err(ApiError::bad_request("passwords don't match", ""));
    }

    let user = service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Replace a user's profile; requires the current password
pub async fn update_user(
    State(service): State<UserService>,
    IdParam(id): IdParam<i64>,
    ValidJson(payload): ValidJson<UpdateUserDto>,
) -> ApiResult<StatusCode> {
    service.update(id, payload).await?;
    Ok(StatusCode::OK)
}

/// Update the fields present in the body; requires the current password
pub async fn update_user_partially(
    State(service): State<UserService>,
    IdParam(id): IdParam<i64>,
    ValidJson(payload): ValidJson<UpdateUserPartiallyDto>,
) -> ApiResult<StatusCode> {
    service.update_partially(id, payload).await?;
    Ok(StatusCode::OK)
}

pub async fn delete_user(
    State(service): State<UserService>,
    IdParam(id): IdParam<i64>,
) -> ApiResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::OK)
}
