//! Group, permission grant, and membership management.

use std::sync::Arc;

use tracing::info;

use opshub_core::error::AppError;
use opshub_core::types::slug::slugify;
use opshub_database::repositories::group::GroupRepository;
use opshub_entity::group::{GroupMembership, GroupPermission, ServerGroup};

/// The wildcard permission value: a group holding it carries every
/// permission on its server.
pub const WILDCARD_PERMISSION: &str = "*";

/// Group names whose slug may not be claimed; `OPERATOR` is the synthetic
/// label of the ownership access path.
const RESERVED_SLUGS: &[&str] = &["operator"];

/// Handles group CRUD, permission grants, and memberships. All callers
/// have already passed the server-level access and management checks.
#[derive(Debug, Clone)]
pub struct GroupService {
    /// Group repository.
    groups: Arc<GroupRepository>,
}

impl GroupService {
    /// Creates a new group service.
    pub fn new(groups: Arc<GroupRepository>) -> Self {
        Self { groups }
    }

    /// Creates a group with an initial set of permission grants.
    pub async fn create(
        &self,
        server_id: i64,
        name: &str,
        permissions: &[String],
    ) -> Result<ServerGroup, AppError> {
        let slug = validated_slug(name)?;
        let values = permissions
            .iter()
            .map(|v| normalize_permission(v))
            .collect::<Result<Vec<_>, _>>()?;

        let group = self
            .groups
            .create_with_permissions(server_id, name, &slug, &values)
            .await?;

        info!(group_id = group.id, server_id, slug = %group.slug, "Group created");
        Ok(group)
    }

    /// Renames a group, recomputing its slug.
    pub async fn rename(&self, group_id: i64, new_name: &str) -> Result<ServerGroup, AppError> {
        let slug = validated_slug(new_name)?;
        self.groups.rename(group_id, new_name, &slug).await
    }

    /// Deletes a group; grants and memberships cascade.
    pub async fn delete(&self, group_id: i64) -> Result<(), AppError> {
        let deleted = self.groups.delete(group_id).await?;
        if !deleted {
            return Err(AppError::not_found("Group not found"));
        }
        Ok(())
    }

    /// Grants a permission value to a group. The value is slugified
    /// before storage; the wildcard is stored verbatim.
    pub async fn grant_permission(
        &self,
        group_id: i64,
        value: &str,
    ) -> Result<GroupPermission, AppError> {
        let value = normalize_permission(value)?;
        self.groups.add_permission(group_id, &value).await
    }

    /// Revokes a permission grant from a group.
    pub async fn revoke_permission(
        &self,
        group_id: i64,
        permission_id: i64,
    ) -> Result<(), AppError> {
        let deleted = self.groups.delete_permission(group_id, permission_id).await?;
        if !deleted {
            return Err(AppError::not_found("Permission not found"));
        }
        Ok(())
    }

    /// Adds a user to a group.
    pub async fn add_member(
        &self,
        group_id: i64,
        user_id: i64,
    ) -> Result<GroupMembership, AppError> {
        self.groups.add_member(group_id, user_id).await
    }

    /// Revokes one membership from a group.
    pub async fn remove_member(&self, group_id: i64, membership_id: i64) -> Result<(), AppError> {
        let deleted = self.groups.remove_member(group_id, membership_id).await?;
        if !deleted {
            return Err(AppError::not_found("Membership not found"));
        }
        Ok(())
    }

    /// All groups under a server.
    pub async fn list_for_server(&self, server_id: i64) -> Result<Vec<ServerGroup>, AppError> {
        self.groups.list_for_server(server_id).await
    }

    /// All permission grants of a group.
    pub async fn list_permissions(&self, group_id: i64) -> Result<Vec<GroupPermission>, AppError> {
        self.groups.list_permissions(group_id).await
    }

    /// Resolves a slug to the group under a server.
    pub async fn resolve_slug(&self, server_id: i64, slug: &str) -> Result<ServerGroup, AppError> {
        self.groups
            .find_by_slug(server_id, slug)
            .await?
            .ok_or_else(|| AppError::not_found("Group not found"))
    }
}

/// Derive and validate the slug for a group name.
fn validated_slug(name: &str) -> Result<String, AppError> {
    let slug = slugify(name);

    if slug.is_empty() {
        return Err(AppError::validation("Group name must contain letters or digits"));
    }
    if RESERVED_SLUGS.contains(&slug.as_str()) {
        return Err(AppError::validation(format!(
            "Group name '{name}' is reserved"
        )));
    }

    Ok(slug)
}

/// Normalize a permission value for storage: the wildcard passes
/// verbatim, everything else is slugified.
fn normalize_permission(value: &str) -> Result<String, AppError> {
    if value == WILDCARD_PERMISSION {
        return Ok(value.to_string());
    }

    let slug = slugify(value);
    if slug.is_empty() {
        return Err(AppError::validation(
            "Permission value must contain letters or digits",
        ));
    }
    Ok(slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opshub_core::error::ErrorKind;

    #[test]
    fn test_reserved_group_name_any_case() {
        for name in ["operator", "Operator", "OPERATOR", "  operator  "] {
            let err = validated_slug(name).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "{name}");
        }
    }

    #[test]
    fn test_regular_names_slugify() {
        assert_eq!(validated_slug("Build Agents").unwrap(), "build_agents");
        assert_eq!(validated_slug("Administrator").unwrap(), "administrator");
    }

    #[test]
    fn test_wildcard_permission_kept_verbatim() {
        assert_eq!(normalize_permission("*").unwrap(), "*");
    }

    #[test]
    fn test_permission_values_slugify() {
        assert_eq!(normalize_permission("Deploy Code").unwrap(), "deploy_code");
    }

    #[test]
    fn test_empty_permission_rejected() {
        assert!(normalize_permission("--").is_err());
    }
}
