//! User service: password hashing, email uniqueness and authenticated updates

use common::error::DatabaseError;
use tracing::{error, info, warn};

use crate::{
    models::{
        CreateUserDto, NewUser, UpdateUserDto, UpdateUserPartiallyDto, User, UserPatch,
        UserReplacement,
    },
    password::{PasswordError, hash_password, verify_password},
    repositories::UserRepository,
};

use super::{ServiceError, ServiceResult};

// The users table carries a single unique index, on email.
fn user_error(err: DatabaseError) -> ServiceError {
    match err {
        DatabaseError::UniqueViolation(_) => ServiceError::EmailTaken,
        other => ServiceError::from(other),
    }
}

fn hashing_error(err: PasswordError) -> ServiceError {
    error!("password hashing failed: {}", err);
    ServiceError::Hashing(err.to_string())
}

/// User service
#[derive(Clone)]
pub struct UserService {
    repository: UserRepository,
}

impl UserService {
    pub fn new(repository: UserRepository) -> Self {
        Self { repository }
    }

    /// Register a new user
    ///
    /// Fails with [`ServiceError::EmailTaken`] when the email is already in
    /// use, whether found up front or rejected by the unique index.
    pub async fn create(&self, dto: CreateUserDto) -> ServiceResult<User> {
        match self.repository.find_by_email(&dto.email).await {
            Ok(_) => return Err(ServiceError::EmailTaken),
            Err(e) if e.is_no_rows() => {}
            Err(e) => {
                warn!("cannot check email availability: {}", e);
                return Err(e.into());
            }
        }

        let password_hash = hash_password(dto.password).await.map_err(hashing_error)?;
        let new_user = NewUser {
            email: dto.email,
            username: dto.username,
            password_hash,
            address: dto.address,
            phone_number: dto.phone_number,
        };

        let user = self.repository.create(&new_user).await.map_err(|e| {
            if !matches!(e, DatabaseError::UniqueViolation(_)) {
                error!("failed to create user: {}", e);
            }
            user_error(e)
        })?;

        info!("created user {}", user.id);
        Ok(user)
    }

    /// Look a user up by email and check the supplied password
    pub async fn get_by_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> ServiceResult<User> {
        let user = self.repository.find_by_email(email).await.map_err(|e| {
            if !e.is_no_rows() {
                warn!("cannot find user by email: {}", e);
            }
            ServiceError::from(e)
        })?;

        self.authenticate(&user, password.to_string()).await?;
        Ok(user)
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<User> {
        self.repository.find_by_id(id).await.map_err(|e| {
            if !e.is_no_rows() {
                warn!("cannot find user by id: {}", e);
            }
            ServiceError::from(e)
        })
    }

    // No route looks users up by name; kept as a service operation.
    #[allow(dead_code)]
    pub async fn get_by_username(&self, username: &str) -> ServiceResult<User> {
        self.repository
            .find_by_username(username)
            .await
            .map_err(|e| {
                if !e.is_no_rows() {
                    warn!("cannot find user by username: {}", e);
                }
                ServiceError::from(e)
            })
    }

    /// Replace a user's profile after checking the current password
    pub async fn update(&self, id: i64, dto: UpdateUserDto) -> ServiceResult<()> {
        let current = self.get_by_id(id).await?;
        self.authenticate(&current, dto.old_password.clone()).await?;

        let replacement = UserReplacement::from(dto);
        self.repository
            .replace(id, &replacement)
            .await
            .map_err(|e| {
                error!("failed to update user {}: {}", id, e);
                user_error(e)
            })
    }

    /// Update the present fields after checking the current password
    ///
    /// A new password is hashed before it is stored.
    pub async fn update_partially(&self, id: i64, dto: UpdateUserPartiallyDto) -> ServiceResult<()> {
        let old_password = dto
            .old_password
            .ok_or_else(|| ServiceError::Validation("oldPassword: cannot be blank".to_string()))?;

        let mut patch = UserPatch {
            username: dto.username,
            email: dto.email,
            address: dto.address,
            phone_number: dto.phone_number,
            password_hash: None,
        };
        let nothing_to_change = patch.username.is_none()
            && patch.email.is_none()
            && patch.address.is_none()
            && patch.phone_number.is_none()
            && dto.new_password.is_none();
        if nothing_to_change {
            return Err(DatabaseError::EmptyUpdate.into());
        }

        let current = self.get_by_id(id).await?;
        self.authenticate(&current, old_password).await?;

        if let Some(new_password) = dto.new_password {
            patch.password_hash = Some(hash_password(new_password).await.map_err(hashing_error)?);
        }

        self.repository
            .update_partially(id, &patch)
            .await
            .map_err(|e| {
                error!("failed to partially update user {}: {}", id, e);
                user_error(e)
            })
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.repository.delete(id).await.map_err(|e| {
            if !e.is_no_rows() {
                warn!("failed to delete user {}: {}", id, e);
            }
            ServiceError::from(e)
        })
    }

    async fn authenticate(&self, user: &User, password: String) -> ServiceResult<()> {
        match verify_password(password, user.password.clone()).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(ServiceError::WrongPassword),
            Err(e) => Err(hashing_error(e)),
        }
    }
}
