//! The logged-in user, persisted under [`SESSION_KEY`].
//!
//! Authentication is a local mock: the admin credentials map to the admin
//! account, any other valid login maps to the demo account, and registration
//! mints a fresh id from the clock.

use crate::auth::{MAX_PASSWORD_LEN, validate_email, validate_password, validate_username};
use crate::error::{Result, StoreError};
use crate::kv::KeyValueStore;
use catalog::{Clock, Role, User, UserId};
use std::sync::Arc;
use tracing::{info, warn};

/// Durable key holding the serialized current user
pub const SESSION_KEY: &str = "session.user";

pub const ADMIN_EMAIL: &str = "admin@kinoclone.ru";
const ADMIN_PASSWORD: &str = "admin123";
pub const ADMIN_USER_ID: UserId = 999;
pub const DEMO_USER_ID: UserId = 1;

pub struct Session {
    backend: Arc<dyn KeyValueStore>,
    user: Option<User>,
}

impl Session {
    /// Restore the user saved by a previous run, if any.
    ///
    /// An unreadable saved user is dropped with a warning rather than failing
    /// startup; the caller simply starts logged out.
    pub fn restore(backend: Arc<dyn KeyValueStore>) -> Result<Self> {
        let user = match backend.read(SESSION_KEY)? {
            Some(json) => match serde_json::from_str::<User>(&json) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("Discarding unreadable session: {}", e);
                    None
                }
            },
            None => None,
        };
        if let Some(user) = &user {
            info!(user_id = user.id, "Restored session for {}", user.username);
        }
        Ok(Self { backend, user })
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|u| u.id)
    }

    /// The current user's id, or `AuthRequired` when nobody is logged in
    pub fn require_user(&self) -> Result<UserId> {
        self.user_id().ok_or(StoreError::AuthRequired)
    }

    /// The current user if they are an administrator
    pub fn require_admin(&self) -> Result<&User> {
        match &self.user {
            Some(user) if user.is_admin() => Ok(user),
            Some(_) => Err(StoreError::AdminRequired),
            None => Err(StoreError::AuthRequired),
        }
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<&User> {
        validate_email(email)?;
        validate_password(password, None)?;

        let user = if email == ADMIN_EMAIL && password == ADMIN_PASSWORD {
            User {
                id: ADMIN_USER_ID,
                username: "Admin".to_string(),
                email: ADMIN_EMAIL.to_string(),
                role: Role::Admin,
            }
        } else {
            let username = email.split('@').next().unwrap_or(email).to_string();
            User {
                id: DEMO_USER_ID,
                username,
                email: email.to_string(),
                role: Role::User,
            }
        };
        self.set_user(user)
    }

    pub fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
        clock: &dyn Clock,
    ) -> Result<&User> {
        validate_username(username)?;
        validate_email(email)?;
        validate_password(password, Some(MAX_PASSWORD_LEN))?;

        let user = User {
            id: clock.now().timestamp_millis().max(0) as UserId,
            username: username.to_string(),
            email: email.to_string(),
            role: Role::User,
        };
        self.set_user(user)
    }

    /// End the session and return the user who was logged in.
    ///
    /// Deleting that user's interaction records is up to the caller, which
    /// owns the interaction store.
    pub fn logout(&mut self) -> Result<Option<User>> {
        self.backend.remove(SESSION_KEY)?;
        let previous = self.user.take();
        if let Some(user) = &previous {
            info!(user_id = user.id, "Logged out {}", user.username);
        }
        Ok(previous)
    }

    fn set_user(&mut self, user: User) -> Result<&User> {
        let json = serde_json::to_string(&user)?;
        self.backend.write(SESSION_KEY, &json)?;
        info!(user_id = user.id, role = ?user.role, "Logged in {}", user.username);
        Ok(self.user.insert(user))
    }
}
