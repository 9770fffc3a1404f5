use chrono::Utc;
use log::info;
use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{required, RollcallService};
use crate::entities::role;
use crate::error::{Result, RollcallError};
use crate::repositories::{RoleRepository, UserRepository};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoleArgs {
    pub name: String,
    pub allowed_absences: i32,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoleArgs {
    pub name: Option<String>,
    pub allowed_absences: Option<i32>,
    pub is_admin: Option<bool>,
}

fn check_allowance(allowed_absences: i32) -> Result<i32> {
    if allowed_absences < 0 {
        return Err(RollcallError::Validation("allowed_absences cannot be negative".to_string()));
    }
    Ok(allowed_absences)
}

impl RollcallService {
    pub async fn create_role(&self, args: CreateRoleArgs) -> Result<role::Model> {
        let name = required("name", &args.name)?;
        let allowed_absences = check_allowance(args.allowed_absences)?;
        self.ensure_role_name_free(&name, None).await?;

        let role = RoleRepository::insert(
            self.conn(),
            role::ActiveModel {
                uuid: ActiveValue::Set(Uuid::new_v4()),
                name: ActiveValue::Set(name),
                allowed_absences: ActiveValue::Set(allowed_absences),
                is_admin: ActiveValue::Set(args.is_admin),
                created_at: ActiveValue::Set(Utc::now()),
            },
        )
        .await?;
        info!("Created role '{}'", role.name);
        Ok(role)
    }

    pub async fn list_roles(&self) -> Result<Vec<role::Model>> {
        RoleRepository::get_all(self.conn()).await
    }

    pub async fn update_role(&self, uuid: &Uuid, args: UpdateRoleArgs) -> Result<role::Model> {
        let role = self.find_role(uuid).await?;
        let mut active_model: role::ActiveModel = role.into();

        if let Some(name) = args.name {
            let name = required("name", &name)?;
            self.ensure_role_name_free(&name, Some(uuid)).await?;
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(allowed_absences) = args.allowed_absences {
            active_model.allowed_absences = ActiveValue::Set(check_allowance(allowed_absences)?);
        }
        if let Some(is_admin) = args.is_admin {
            active_model.is_admin = ActiveValue::Set(is_admin);
        }

        RoleRepository::update(self.conn(), active_model).await
    }

    /// Delete a role nobody holds.
    pub async fn delete_role(&self, uuid: &Uuid) -> Result<()> {
        let role = self.find_role(uuid).await?;
        let holders = UserRepository::count_with_role(self.conn(), uuid).await?;
        if holders > 0 {
            return Err(RollcallError::Conflict(format!(
                "role '{}' is still assigned to {} user(s)",
                role.name, holders
            )));
        }
        RoleRepository::delete(self.conn(), role).await?;
        info!("Deleted role {}", uuid);
        Ok(())
    }

    pub(crate) async fn find_role(&self, uuid: &Uuid) -> Result<role::Model> {
        RoleRepository::get_by_id(self.conn(), uuid)
            .await?
            .ok_or_else(|| RollcallError::not_found("Role", uuid))
    }

    async fn ensure_role_name_free(&self, name: &str, except: Option<&Uuid>) -> Result<()> {
        if let Some(existing) = RoleRepository::get_by_name(self.conn(), name).await? {
            if Some(&existing.uuid) != except {
                return Err(RollcallError::Conflict(format!("role '{}' already exists", name)));
            }
        }
        Ok(())
    }
}
