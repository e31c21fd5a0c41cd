//! Service for the catalog resources (authors, genres, languages)

use common::error::DatabaseError;
use tracing::{error, info, warn};

use crate::repositories::{Patchable, Repository, Resource};

use super::{ServiceError, ServiceResult};

/// Service over a single catalog table
pub struct CatalogService<R> {
    repository: Repository<R>,
}

impl<R> Clone for CatalogService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
        }
    }
}

impl<R: Resource> CatalogService<R> {
    pub fn new(repository: Repository<R>) -> Self {
        Self { repository }
    }

    pub async fn get_by_id(&self, id: R::Id) -> ServiceResult<R> {
        self.repository.find_by_id(id).await.map_err(|e| {
            if !e.is_no_rows() {
                warn!("cannot find {} by id {}: {}", R::NAME, id, e);
            }
            ServiceError::from(e)
        })
    }

    pub async fn create(&self, draft: &R::Draft) -> ServiceResult<R> {
        let created = self.repository.create(draft).await.map_err(|e| {
            error!("failed to create {}: {}", R::NAME, e);
            ServiceError::from(e)
        })?;

        info!("created {}", R::NAME);
        Ok(created)
    }

    /// Overwrite every field of an existing record
    pub async fn update(&self, id: R::Id, replacement: &R::Replacement) -> ServiceResult<()> {
        self.get_by_id(id).await?;

        self.repository.replace(id, replacement).await.map_err(|e| {
            error!("failed to update {} {}: {}", R::NAME, id, e);
            ServiceError::from(e)
        })
    }

    pub async fn delete(&self, id: R::Id) -> ServiceResult<()> {
        self.repository.delete(id).await.map_err(|e| {
            if !e.is_no_rows() {
                warn!("failed to delete {} {}: {}", R::NAME, id, e);
            }
            ServiceError::from(e)
        })
    }
}

impl<R: Patchable> CatalogService<R> {
    /// Overwrite only the fields present in `patch`
    pub async fn update_partially(&self, id: R::Id, patch: &R::Patch) -> ServiceResult<()> {
        if R::patch_values(patch).iter().all(|(_, value)| value.is_none()) {
            return Err(DatabaseError::EmptyUpdate.into());
        }

        self.get_by_id(id).await?;

        self.repository
            .update_partially(id, patch)
            .await
            .map_err(|e| {
                error!("failed to partially update {} {}: {}", R::NAME, id, e);
                ServiceError::from(e)
            })
    }
}
