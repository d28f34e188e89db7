//! User service facade.
//!
//! Orchestrates the API client, the user conversions, and the fallback
//! store. The locally-only user fields (role, department, and the boolean
//! flags) have no wire representation; they live in the `user_profiles`
//! overlay collection, written on every create/update and merged on every
//! read, so a successful remote round-trip does not reset them.

use serde::{Deserialize, Serialize};
use tracing::warn;

use storekeep_core::{NewUser, User, UserId, UserPatch};

use crate::conversions::{convert_user, patch_to_input, user_to_input};
use crate::error::{Result, ServiceError};
use crate::fallback::FallbackStore;
use crate::store_api::StoreApiClient;

use super::next_id;

/// Fallback collection holding user records in domain shape.
const USERS: &str = "users";

/// Overlay collection holding the locally-only user fields.
const PROFILES: &str = "user_profiles";

/// Locally persisted augmentation for the fields the external API cannot
/// represent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub role: String,
    pub department: String,
    pub admin: bool,
    pub representative: bool,
}

impl UserProfile {
    fn of(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role.clone(),
            department: user.department.clone(),
            admin: user.admin,
            representative: user.representative,
        }
    }

    fn apply(&self, user: &mut User) {
        user.role = self.role.clone();
        user.department = self.department.clone();
        user.admin = self.admin;
        user.representative = self.representative;
    }
}

/// Service facade for user management.
#[derive(Debug, Clone)]
pub struct UserService {
    api: StoreApiClient,
    store: FallbackStore,
}

impl UserService {
    /// Create a facade over the given client and fallback store.
    #[must_use]
    pub const fn new(api: StoreApiClient, store: FallbackStore) -> Self {
        Self { api, store }
    }

    /// List all users.
    ///
    /// External fetch and map; on any failure the fallback collection is
    /// returned as-is, in persisted order. Never fails - an empty fallback
    /// yields an empty list.
    pub async fn list(&self) -> Vec<User> {
        match self.api.list_users().await {
            Ok(api_users) => {
                let mut users: Vec<User> = api_users.into_iter().map(convert_user).collect();
                self.apply_profiles(&mut users).await;
                users
            }
            Err(err) => {
                warn!(error = %err, "user list failed; serving fallback data");
                self.store.read(USERS).await
            }
        }
    }

    /// Fetch one user by id.
    ///
    /// # Errors
    ///
    /// `NotFound` when the API reports the id absent; `Api` when the fetch
    /// fails outright.
    pub async fn get(&self, id: UserId) -> Result<User> {
        match self.api.get_user(id).await {
            Ok(api_user) => {
                let mut user = convert_user(api_user);
                self.apply_profiles(std::slice::from_mut(&mut user)).await;
                Ok(user)
            }
            Err(err) if err.is_not_found() => Err(ServiceError::NotFound {
                entity: "user",
                id: id.as_i32(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// Create a user.
    ///
    /// Remote path: the API assigns the id and the created record is
    /// mirrored into the fallback collection so a later offline `list` sees
    /// it. Fallback path: the id is synthesized locally (`max(visible)+1`)
    /// and the whole visible set plus the new record is persisted. The
    /// profile overlay is written on both paths. The returned entity does
    /// not reveal which path was taken.
    ///
    /// # Errors
    ///
    /// Returns an error only when the fallback store itself cannot persist.
    pub async fn create(&self, new: NewUser) -> Result<User> {
        let input = user_to_input(&new);
        match self.api.create_user(&input).await {
            Ok(created) => {
                let mut user = convert_user(created);
                // The wire echo cannot carry the locally-only fields; take
                // them from the request.
                user.role = new.role;
                user.department = new.department;
                user.admin = new.admin;
                user.representative = new.representative;
                self.save_profile(&user).await?;
                self.store.append(USERS, user.clone()).await?;
                Ok(user)
            }
            Err(err) => {
                warn!(error = %err, "user create failed; persisting locally");
                let mut records = self.list().await;
                let id = next_id(records.iter().map(|u| u.id.as_i32()));
                let user = new.into_user(UserId::new(id));
                records.push(user.clone());
                self.store.write(USERS, &records).await?;
                self.save_profile(&user).await?;
                Ok(user)
            }
        }
    }

    /// Update a user.
    ///
    /// Remote path: PUT the mapped patch, map the echo, and re-apply the
    /// overlay plus the patch. Fallback path: shallow-merge the patch onto
    /// the fallback record.
    ///
    /// # Errors
    ///
    /// `NotFound` when the record exists neither remotely nor in the
    /// fallback store.
    pub async fn update(&self, id: UserId, patch: UserPatch) -> Result<User> {
        let input = patch_to_input(&patch);
        match self.api.update_user(id, &input).await {
            Ok(updated) => {
                let mut user = convert_user(updated);
                self.apply_profiles(std::slice::from_mut(&mut user)).await;
                patch.apply(&mut user);
                self.save_profile(&user).await?;
                Ok(user)
            }
            Err(err) => {
                warn!(error = %err, "user update failed; merging into fallback data");
                let users: Vec<User> = self.store.read(USERS).await;
                let Some(mut user) = users.into_iter().find(|u| u.id == id) else {
                    return Err(ServiceError::NotFound {
                        entity: "user",
                        id: id.as_i32(),
                    });
                };
                patch.apply(&mut user);
                self.store
                    .replace_where(USERS, |u: &User| u.id == id, user.clone())
                    .await?;
                self.save_profile(&user).await?;
                Ok(user)
            }
        }
    }

    /// Delete a user.
    ///
    /// On remote failure a fallback removal is attempted instead. The
    /// profile overlay record is cleared along with the user.
    ///
    /// # Errors
    ///
    /// `NotFound` when nothing was removed anywhere.
    pub async fn delete(&self, id: UserId) -> Result<()> {
        match self.api.delete_user(id).await {
            Ok(()) => {
                self.remove_profile(id).await?;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "user delete failed; removing from fallback data");
                let removed = self.store.remove_where(USERS, |u: &User| u.id == id).await?;
                if removed {
                    self.remove_profile(id).await?;
                    Ok(())
                } else {
                    Err(ServiceError::NotFound {
                        entity: "user",
                        id: id.as_i32(),
                    })
                }
            }
        }
    }

    /// Merge persisted profile overlays onto freshly mapped users.
    async fn apply_profiles(&self, users: &mut [User]) {
        let profiles: Vec<UserProfile> = self.store.read(PROFILES).await;
        if profiles.is_empty() {
            return;
        }
        for user in users {
            if let Some(profile) = profiles.iter().find(|p| p.user_id == user.id) {
                profile.apply(user);
            }
        }
    }

    /// Upsert the profile overlay for one user.
    async fn save_profile(&self, user: &User) -> Result<()> {
        let profile = UserProfile::of(user);
        let replaced = self
            .store
            .replace_where(
                PROFILES,
                |p: &UserProfile| p.user_id == user.id,
                profile.clone(),
            )
            .await?;
        if !replaced {
            self.store.append(PROFILES, profile).await?;
        }
        Ok(())
    }

    async fn remove_profile(&self, id: UserId) -> Result<()> {
        self.store
            .remove_where(PROFILES, |p: &UserProfile| p.user_id == id)
            .await?;
        Ok(())
    }
}
