//! User identity operations — registration, authentication, profile and
//! credential mutation, deletion.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use opshub_auth::password::{PasswordHasher, PasswordPolicy};
use opshub_core::error::AppError;
use opshub_core::types::ident::public_id;
use opshub_database::repositories::user::UserRepository;
use opshub_entity::user::{CreateUser, User};

use crate::chronicle::{ChronicleService, event};
use crate::context::RequestContext;

/// Handles user identity lifecycle operations.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    users: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password lifecycle policy.
    policy: PasswordPolicy,
    /// Audit trail.
    chronicle: Arc<ChronicleService>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        policy: PasswordPolicy,
        chronicle: Arc<ChronicleService>,
    ) -> Self {
        Self {
            users,
            hasher,
            policy,
            chronicle,
        }
    }

    /// Registers a new account.
    ///
    /// The existence checks are a fast path for readable errors — name
    /// first, then email. The unique constraints remain the final arbiter
    /// under concurrent registration.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        ip_address: &str,
        user_agent: &str,
    ) -> Result<User, AppError> {
        if self.users.find_by_name(name).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Name '{name}' is already registered"
            )));
        }
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("Email is already registered"));
        }

        let data = CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            public_id: public_id(),
            password_hash: self.hasher.hash(password)?,
        };

        let user = self.users.create(&data).await?;

        info!(user_id = user.id, name = %user.name, "User registered");
        self.chronicle
            .record(user.id, event::REGISTER, ip_address, user_agent, None, None)
            .await;

        Ok(user)
    }

    /// Authenticates by login name or email.
    ///
    /// Returns the user's public identifier — the token subject — only
    /// when the account is active and the password verifies. The internal
    /// id never crosses this boundary.
    pub async fn authenticate(
        &self,
        name_or_email: &str,
        password: &str,
        ip_address: &str,
        user_agent: &str,
    ) -> Result<Option<String>, AppError> {
        let Some(user) = self.users.find_by_name_or_email(name_or_email).await? else {
            return Ok(None);
        };

        if !user.is_active || !self.hasher.verify(password, &user.password_hash)? {
            self.chronicle
                .record(
                    user.id,
                    event::LOGIN_FAILED,
                    ip_address,
                    user_agent,
                    None,
                    None,
                )
                .await;
            return Ok(None);
        }

        self.chronicle
            .record(user.id, event::LOGIN, ip_address, user_agent, None, None)
            .await;

        Ok(Some(user.public_id))
    }

    /// Looks up a user id by login name or email.
    pub async fn find_id(&self, name_or_email: &str) -> Result<Option<i64>, AppError> {
        Ok(self
            .users
            .find_by_name_or_email(name_or_email)
            .await?
            .map(|u| u.id))
    }

    /// Resolves a public identifier to the user row.
    pub async fn resolve_public_id(&self, public_id: &str) -> Result<Option<User>, AppError> {
        self.users.find_by_public_id(public_id).await
    }

    /// Loads a user's profile.
    pub async fn profile(&self, user_id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Changes the login name.
    pub async fn change_name(&self, ctx: &RequestContext, new_name: &str) -> Result<(), AppError> {
        let user = self.profile(ctx.user_id).await?;

        if user.name == new_name {
            return Err(AppError::conflict("Name is unchanged"));
        }
        if self.users.find_by_name(new_name).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Name '{new_name}' is already registered"
            )));
        }

        self.users.update_name(ctx.user_id, new_name).await?;

        self.chronicle
            .record(
                ctx.user_id,
                event::NAME_CHANGE,
                &ctx.ip_address,
                &ctx.user_agent,
                Some(format!("{} -> {}", user.name, new_name)),
                None,
            )
            .await;

        Ok(())
    }

    /// Changes the email address.
    pub async fn change_email(
        &self,
        ctx: &RequestContext,
        new_email: &str,
    ) -> Result<(), AppError> {
        let user = self.profile(ctx.user_id).await?;

        if user.email == new_email {
            return Err(AppError::conflict("Email is unchanged"));
        }
        if self.users.find_by_email(new_email).await?.is_some() {
            return Err(AppError::conflict("Email is already registered"));
        }

        self.users.update_email(ctx.user_id, new_email).await?;

        self.chronicle
            .record(
                ctx.user_id,
                event::EMAIL_CHANGE,
                &ctx.ip_address,
                &ctx.user_agent,
                None,
                None,
            )
            .await;

        Ok(())
    }

    /// Changes the password.
    ///
    /// Rejection order: wrong current password, cooldown not elapsed,
    /// new password equals the current one.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self.profile(ctx.user_id).await?;

        if !self.hasher.verify(current_password, &user.password_hash)? {
            return Err(AppError::unauthorized("Current password is incorrect"));
        }

        self.policy
            .check_cooldown(user.hash_updated_at, user.created_at, Utc::now())?;
        self.policy.check_reuse(current_password, new_password)?;

        let new_hash = self.hasher.hash(new_password)?;
        self.users.update_password(ctx.user_id, &new_hash).await?;

        info!(user_id = ctx.user_id, "Password changed");
        self.chronicle
            .record(
                ctx.user_id,
                event::PASSWORD_CHANGE,
                &ctx.ip_address,
                &ctx.user_agent,
                None,
                None,
            )
            .await;

        Ok(())
    }

    /// Hard-deletes the account. Owned servers, memberships, and the
    /// user's chronicle go with it through the store-level cascade.
    pub async fn delete(&self, ctx: &RequestContext) -> Result<(), AppError> {
        let deleted = self.users.delete(ctx.user_id).await?;
        if !deleted {
            return Err(AppError::not_found("User not found"));
        }

        info!(user_id = ctx.user_id, "User deleted");
        Ok(())
    }
}
