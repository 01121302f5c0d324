use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::NO_BODY;
use crate::error::found;
use crate::{Client, ClientError, HeaderOptions, MediaType, add_options};

/// One permission held by a role.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Permission {
    /// Action granted: `read`, `write`, `create`, `delete`, `grant`,
    /// `revoke`, `execute` or `all`.
    pub action: String,
    /// Kind of resource the action applies to (`db`, `user`, `role`,
    /// `named-graph`, ...).
    pub resource_type: String,
    /// Resource identifiers the action applies to.
    pub resource: Vec<String>,
}

/// Options for [`Client::delete_role`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct DeleteRoleOptions {
    /// Delete the role even when users are still assigned to it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct UsersResponse {
    users: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RolesResponse {
    roles: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PermissionsResponse {
    permissions: Vec<Permission>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct EnabledBody {
    enabled: bool,
}

#[derive(Debug, Serialize)]
struct CreateUserBody<'a> {
    username: &'a str,
    password: Vec<String>,
}

#[derive(Debug, Serialize)]
struct PasswordBody<'a> {
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RoleNameBody<'a> {
    rolename: &'a str,
}

#[derive(Debug, Serialize)]
struct UserRolesBody<'a> {
    roles: &'a [String],
}

// The server expects the password split into single characters on user
// creation.
fn password_chars(password: &str) -> Vec<String> {
    password.chars().map(String::from).collect()
}

impl Client {
    /// Lists all user names.
    pub async fn list_users(&self) -> Result<Vec<String>, ClientError> {
        let response: UsersResponse = self
            .request_json(
                Method::GET,
                "admin/users",
                HeaderOptions::accept(MediaType::Json),
                NO_BODY,
            )
            .await?;
        Ok(response.users)
    }

    /// Returns whether a user exists. A 404 from the server is the
    /// negative answer, not an error.
    pub async fn user_exists(&self, username: &str) -> Result<bool, ClientError> {
        let result = self
            .request_empty(
                Method::GET,
                &format!("admin/users/{username}"),
                HeaderOptions::accept(MediaType::Json),
                NO_BODY,
            )
            .await;
        found(result)
    }

    /// Creates a user with the given password.
    pub async fn create_user(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let body = CreateUserBody {
            username,
            password: password_chars(password),
        };
        self.request_empty(Method::POST, "admin/users", HeaderOptions::json(), Some(&body))
            .await
    }

    /// Deletes a user.
    pub async fn delete_user(&self, username: &str) -> Result<(), ClientError> {
        self.request_empty(
            Method::DELETE,
            &format!("admin/users/{username}"),
            HeaderOptions::accept(MediaType::Json),
            NO_BODY,
        )
        .await
    }

    /// Changes a user's password.
    pub async fn change_user_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let body = PasswordBody { password };
        self.request_empty(
            Method::PUT,
            &format!("admin/users/{username}/pwd"),
            HeaderOptions::json(),
            Some(&body),
        )
        .await
    }

    /// Returns whether a user account is enabled.
    pub async fn user_enabled(&self, username: &str) -> Result<bool, ClientError> {
        let response: EnabledBody = self
            .request_json(
                Method::GET,
                &format!("admin/users/{username}/enabled"),
                HeaderOptions::accept(MediaType::Json),
                NO_BODY,
            )
            .await?;
        Ok(response.enabled)
    }

    /// Enables or disables a user account.
    pub async fn set_user_enabled(&self, username: &str, enabled: bool) -> Result<(), ClientError> {
        let body = EnabledBody { enabled };
        self.request_empty(
            Method::PUT,
            &format!("admin/users/{username}/enabled"),
            HeaderOptions::json(),
            Some(&body),
        )
        .await
    }

    /// Lists the roles assigned to a user.
    pub async fn user_roles(&self, username: &str) -> Result<Vec<String>, ClientError> {
        let response: RolesResponse = self
            .request_json(
                Method::GET,
                &format!("admin/users/{username}/roles"),
                HeaderOptions::accept(MediaType::Json),
                NO_BODY,
            )
            .await?;
        Ok(response.roles)
    }

    /// Replaces the set of roles assigned to a user.
    pub async fn set_user_roles(
        &self,
        username: &str,
        roles: &[String],
    ) -> Result<(), ClientError> {
        let body = UserRolesBody { roles };
        self.request_empty(
            Method::PUT,
            &format!("admin/users/{username}/roles"),
            HeaderOptions::json(),
            Some(&body),
        )
        .await
    }

    /// Lists all role names.
    pub async fn list_roles(&self) -> Result<Vec<String>, ClientError> {
        let response: RolesResponse = self
            .request_json(
                Method::GET,
                "admin/roles",
                HeaderOptions::accept(MediaType::Json),
                NO_BODY,
            )
            .await?;
        Ok(response.roles)
    }

    /// Creates a role.
    pub async fn create_role(&self, role: &str) -> Result<(), ClientError> {
        let body = RoleNameBody { rolename: role };
        self.request_empty(Method::POST, "admin/roles", HeaderOptions::json(), Some(&body))
            .await
    }

    /// Deletes a role.
    pub async fn delete_role(
        &self,
        role: &str,
        options: Option<&DeleteRoleOptions>,
    ) -> Result<(), ClientError> {
        let path = add_options(&format!("admin/roles/{role}"), options)?;
        self.request_empty(
            Method::DELETE,
            &path,
            HeaderOptions::accept(MediaType::Json),
            NO_BODY,
        )
        .await
    }

    /// Lists the permissions granted to a role.
    pub async fn role_permissions(&self, role: &str) -> Result<Vec<Permission>, ClientError> {
        let response: PermissionsResponse = self
            .request_json(
                Method::GET,
                &format!("admin/permissions/role/{role}"),
                HeaderOptions::accept(MediaType::Json),
                NO_BODY,
            )
            .await?;
        Ok(response.permissions)
    }

    /// Grants a permission to a role.
    pub async fn grant_role_permission(
        &self,
        role: &str,
        permission: &Permission,
    ) -> Result<(), ClientError> {
        self.request_empty(
            Method::PUT,
            &format!("admin/permissions/role/{role}"),
            HeaderOptions::json(),
            Some(permission),
        )
        .await
    }

    /// Revokes a permission from a role.
    pub async fn revoke_role_permission(
        &self,
        role: &str,
        permission: &Permission,
    ) -> Result<(), ClientError> {
        self.request_empty(
            Method::POST,
            &format!("admin/permissions/role/{role}/delete"),
            HeaderOptions::json(),
            Some(permission),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::{Permission, password_chars};

    #[test]
    fn password_is_split_into_characters() {
        assert_eq!(password_chars("s3cr"), ["s", "3", "c", "r"]);
        assert!(password_chars("").is_empty());
    }

    #[test]
    fn permission_round_trips_field_names() {
        let permission = Permission {
            action: "read".to_owned(),
            resource_type: "db".to_owned(),
            resource: vec!["music".to_owned()],
        };
        let raw = serde_json::to_string(&permission).expect("serializes");
        assert!(raw.contains(r#""resource_type":"db""#));
        let back: Permission = serde_json::from_str(&raw).expect("deserializes");
        assert_eq!(back, permission);
    }
}
