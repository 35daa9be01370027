//! Login and registration form rules.

use crate::error::{Result, StoreError};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 50;
pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 20;

pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(StoreError::validation("email", "email is required"));
    }
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !well_formed {
        return Err(StoreError::validation("email", "malformed email address"));
    }
    Ok(())
}

/// Lengths are counted in characters, not bytes
pub fn validate_password(password: &str, max: Option<usize>) -> Result<()> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(StoreError::validation(
            "password",
            &format!("must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    if let Some(max) = max {
        if len > max {
            return Err(StoreError::validation(
                "password",
                &format!("must be at most {max} characters"),
            ));
        }
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<()> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
        return Err(StoreError::validation(
            "username",
            &format!("must be {MIN_USERNAME_LEN} to {MAX_USERNAME_LEN} characters"),
        ));
    }
    Ok(())
}
