//! User storage mapping and lookups

use common::error::DatabaseResult;
use tracing::info;

use crate::models::{NewUser, User, UserPatch, UserReplacement};

use super::{ColumnValue, Patchable, Repository, Resource};

/// User repository
pub type UserRepository = Repository<User>;

impl Resource for User {
    type Id = i64;
    type Draft = NewUser;
    type Replacement = UserReplacement;

    const NAME: &'static str = "user";
    const TABLE: &'static str = "users";
    const COLUMNS: &'static str =
        "id, email, username, password, verified, address, phone_number, registered_at";

    fn insert_values(draft: &NewUser) -> Vec<ColumnValue> {
        vec![
            ("username", Some(draft.username.clone())),
            ("email", Some(draft.email.clone())),
            ("password", Some(draft.password_hash.clone())),
            ("address", draft.address.clone()),
            ("phone_number", draft.phone_number.clone()),
        ]
    }

    // The stored password survives a full replace.
    fn replace_values(replacement: &UserReplacement) -> Vec<ColumnValue> {
        vec![
            ("username", Some(replacement.username.clone())),
            ("email", Some(replacement.email.clone())),
            ("address", replacement.address.clone()),
            ("phone_number", replacement.phone_number.clone()),
        ]
    }
}

impl Patchable for User {
    type Patch = UserPatch;

    fn patch_values(patch: &UserPatch) -> Vec<ColumnValue> {
        vec![
            ("username", patch.username.clone()),
            ("email", patch.email.clone()),
            ("address", patch.address.clone()),
            ("phone_number", patch.phone_number.clone()),
            ("password", patch.password_hash.clone()),
        ]
    }
}

impl Repository<User> {
    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> DatabaseResult<User> {
        info!("Finding user by email: {}", email);
        self.find_by("email", email).await
    }

    /// Find a user by username
    pub async fn find_by_username(&self, username: &str) -> DatabaseResult<User> {
        info!("Finding user by username: {}", username);
        self.find_by("username", username).await
    }
}
