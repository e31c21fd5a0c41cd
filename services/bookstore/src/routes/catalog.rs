//! Generic CRUD routes for the catalog resources
//!
//! Authors, genres and languages share these handlers; only authors accept
//! `PATCH`, see [`router_with_patch`].

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Serialize, de::DeserializeOwned};
use validator::Validate;

use crate::{
    error::ApiResult,
    repositories::{Patchable, Resource},
    services::CatalogService,
};

use super::{IdParam, ValidJson};

/// Routes for `path` and `path/:id`, without `PATCH`
pub fn router<R>(path: &str, service: CatalogService<R>) -> Router
where
    R: Resource + Serialize,
    R::Draft: DeserializeOwned + Validate,
    R::Replacement: DeserializeOwned + Validate,
{
    Router::new()
        .route(path, post(create::<R>))
        .route(
            &format!("{}/:id", path),
            get(fetch::<R>).put(replace::<R>).delete(remove::<R>),
        )
        .with_state(service)
}

/// Routes for `path` and `path/:id`, including `PATCH`
pub fn router_with_patch<R>(path: &str, service: CatalogService<R>) -> Router
where
    R: Patchable + Serialize,
    R::Draft: DeserializeOwned + Validate,
    R::Replacement: DeserializeOwned + Validate,
    R::Patch: DeserializeOwned + Validate,
{
    Router::new()
        .route(path, post(create::<R>))
        .route(
            &format!("{}/:id", path),
            get(fetch::<R>)
                .put(replace::<R>)
                .patch(update_partially::<R>)
                .delete(remove::<R>),
        )
        .with_state(service)
}

async fn fetch<R>(
    State(service): State<CatalogService<R>>,
    IdParam(id): IdParam<R::Id>,
) -> ApiResult<Json<R>>
where
    R: Resource + Serialize,
{
    let record = service.get_by_id(id).await?;
    Ok(Json(record))
}

async fn create<R>(
    State(service): State<CatalogService<R>>,
    ValidJson(draft): ValidJson<R::Draft>,
) -> ApiResult<impl IntoResponse>
where
    R: Resource + Serialize,
    R::Draft: DeserializeOwned + Validate,
{
    let created = service.create(&draft).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn replace<R>(
    State(service): State<CatalogService<R>>,
    IdParam(id): IdParam<R::Id>,
    ValidJson(replacement): ValidJson<R::Replacement>,
) -> ApiResult<StatusCode>
where
    R: Resource,
    R::Replacement: DeserializeOwned + Validate,
{
    service.update(id, &replacement).await?;
    Ok(StatusCode::OK)
}

async fn update_partially<R>(
    State(service): State<CatalogService<R>>,
    IdParam(id): IdParam<R::Id>,
    ValidJson(patch): ValidJson<R::Patch>,
) -> ApiResult<StatusCode>
where
    R: Patchable,
    R::Patch: DeserializeOwned + Validate,
{
    service.update_partially(id, &patch).await?;
    Ok(StatusCode::OK)
}

async fn remove<R>(
    State(service): State<CatalogService<R>>,
    IdParam(id): IdParam<R::Id>,
) -> ApiResult<StatusCode>
where
    R: Resource,
{
    service.delete(id).await?;
    Ok(StatusCode::OK)
}
