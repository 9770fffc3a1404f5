use chrono::Utc;
use log::info;
use sea_orm::{ActiveValue, TransactionTrait};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::{required, RollcallService};
use crate::auth::Identity;
use crate::constants::{ROLE_ADMIN, ROLE_MEMBER};
use crate::entities::{role, user};
use crate::error::{Result, RollcallError};
use crate::repositories::{RoleRepository, UserRepository};

/// A user as returned to clients, with their role resolved.
#[derive(Clone, Debug, Serialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: user::Model,
    pub role: Option<role::Model>,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role.as_ref().is_some_and(|r| r.is_admin)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserArgs {
    pub full_name: Option<String>,
    pub email: Option<String>,
    /// `Some(None)` (an explicit `null`) removes the user's role
    #[serde(default, deserialize_with = "explicit_null", skip_serializing_if = "Option::is_none")]
    pub role_id: Option<Option<Uuid>>,
}

/// Keep a present-but-null field apart from a missing one.
fn explicit_null<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl RollcallService {
    /// Create the local user for a verified identity on first sign-in, or
    /// refresh their email and name on later ones.
    pub async fn sync_user(&self, identity: &Identity, email: &str, full_name: &str) -> Result<UserProfile> {
        let email = required("email", email)?.to_lowercase();
        let full_name = required("full_name", full_name)?;

        let txn = self.conn().begin().await?;

        if let Some(other) = UserRepository::get_by_email(&txn, &email).await? {
            if other.auth_id != identity.subject {
                return Err(RollcallError::Conflict(format!("email {} is already registered", email)));
            }
        }

        let user = match UserRepository::get_by_auth_id(&txn, &identity.subject).await? {
            Some(existing) => {
                let mut active_model: user::ActiveModel = existing.into();
                active_model.email = ActiveValue::Set(email);
                active_model.full_name = ActiveValue::Set(full_name);
                UserRepository::update(&txn, active_model).await?
            }
            None => {
                let role_name = if self.auth.is_admin_email(&email) {
                    ROLE_ADMIN
                } else {
                    ROLE_MEMBER
                };
                let role_uuid = RoleRepository::get_by_name(&txn, role_name).await?.map(|r| r.uuid);

                let created = UserRepository::insert(
                    &txn,
                    user::ActiveModel {
                        uuid: ActiveValue::Set(Uuid::new_v4()),
                        auth_id: ActiveValue::Set(identity.subject.clone()),
                        email: ActiveValue::Set(email),
                        full_name: ActiveValue::Set(full_name),
                        role_uuid: ActiveValue::Set(role_uuid),
                        created_at: ActiveValue::Set(Utc::now()),
                    },
                )
                .await?;
                info!("Registered user {} ({}) as {}", created.uuid, created.email, role_name);
                created
            }
        };

        txn.commit().await?;
        self.profile(user).await
    }

    /// Resolve an identity to its registered user.
    pub async fn get_user_by_auth_id(&self, auth_id: &str) -> Result<Option<UserProfile>> {
        match UserRepository::get_by_auth_id(self.conn(), auth_id).await? {
            Some(user) => Ok(Some(self.profile(user).await?)),
            None => Ok(None),
        }
    }

    pub async fn get_user(&self, uuid: &Uuid) -> Result<UserProfile> {
        let user = self.find_user(uuid).await?;
        self.profile(user).await
    }

    pub async fn list_users(&self) -> Result<Vec<UserProfile>> {
        Ok(UserRepository::get_all_with_roles(self.conn())
            .await?
            .into_iter()
            .map(|(user, role)| UserProfile { user, role })
            .collect())
    }

    pub async fn update_user(&self, uuid: &Uuid, args: UpdateUserArgs) -> Result<UserProfile> {
        let user = self.find_user(uuid).await?;
        let mut active_model: user::ActiveModel = user.into();

        if let Some(full_name) = args.full_name {
            active_model.full_name = ActiveValue::Set(required("full_name", &full_name)?);
        }
        if let Some(email) = args.email {
            let email = required("email", &email)?.to_lowercase();
            if let Some(other) = UserRepository::get_by_email(self.conn(), &email).await? {
                if other.uuid != *uuid {
                    return Err(RollcallError::Conflict(format!("email {} is already registered", email)));
                }
            }
            active_model.email = ActiveValue::Set(email);
        }
        match args.role_id {
            Some(Some(role_id)) => {
                self.find_role(&role_id).await?;
                active_model.role_uuid = ActiveValue::Set(Some(role_id));
            }
            Some(None) => active_model.role_uuid = ActiveValue::Set(None),
            None => {}
        }

        let user = UserRepository::update(self.conn(), active_model).await?;
        self.profile(user).await
    }

    pub async fn delete_user(&self, uuid: &Uuid) -> Result<()> {
        let user = self.find_user(uuid).await?;
        UserRepository::delete(self.conn(), user).await?;
        info!("Deleted user {}", uuid);
        Ok(())
    }

    pub(crate) async fn find_user(&self, uuid: &Uuid) -> Result<user::Model> {
        UserRepository::get_by_id(self.conn(), uuid)
            .await?
            .ok_or_else(|| RollcallError::not_found("User", uuid))
    }

    async fn profile(&self, user: user::Model) -> Result<UserProfile> {
        let role = match user.role_uuid {
            Some(role_uuid) => RoleRepository::get_by_id(self.conn(), &role_uuid).await?,
            None => None,
        };
        Ok(UserProfile { user, role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_args_role_id_null_vs_missing() {
        let missing: UpdateUserArgs = serde_json::from_str(r#"{"full_name": "Ada"}"#).unwrap();
        assert_eq!(missing.role_id, None);

        let cleared: UpdateUserArgs = serde_json::from_str(r#"{"role_id": null}"#).unwrap();
        assert_eq!(cleared.role_id, Some(None));

        let id = Uuid::new_v4();
        let set: UpdateUserArgs = serde_json::from_str(&format!(r#"{{"role_id": "{}"}}"#, id)).unwrap();
        assert_eq!(set.role_id, Some(Some(id)));
    }
}
