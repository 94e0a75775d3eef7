//! Preconditions every new account must satisfy, whoever creates it.

use validator::ValidateEmail;

use vidhub_core::error::AppError;
use vidhub_core::result::AppResult;
use vidhub_database::repositories::UserStore;
use vidhub_database::repositories::user::normalize_identifier;

/// Normalized identity fields of an account that passed [`check_new_account`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub full_name: String,
    pub email: String,
    pub username: String,
}

/// Usernames share the login identifier space with emails, so they may not
/// contain `@` or whitespace.
pub fn validate_username(username: &str) -> AppResult<()> {
    if username.contains('@') || username.chars().any(char::is_whitespace) {
        return Err(AppError::validation(
            "Username cannot contain '@' or whitespace",
        ));
    }
    Ok(())
}

/// Checks and normalizes the identity fields of a new account.
///
/// Runs in order: required fields, email format, username charset, then
/// uniqueness. Uniqueness is checked across both namespaces so a username
/// can never shadow another user's email at login.
pub async fn check_new_account(
    users: &dyn UserStore,
    full_name: &str,
    email: &str,
    username: &str,
    password: &str,
) -> AppResult<NewAccount> {
    let full_name = full_name.trim();
    let email = normalize_identifier(email);
    let username = normalize_identifier(username);

    if full_name.is_empty() || email.is_empty() || username.is_empty() || password.trim().is_empty()
    {
        return Err(AppError::validation("All fields are required"));
    }
    if !email.validate_email() {
        return Err(AppError::validation("Email is invalid"));
    }
    validate_username(&username)?;

    if users.find_by_identifier(&username).await?.is_some() {
        return Err(AppError::conflict("User with username already exists"));
    }
    if users.find_by_identifier(&email).await?.is_some() {
        return Err(AppError::conflict("User with email already exists"));
    }

    Ok(NewAccount {
        full_name: full_name.to_string(),
        email,
        username,
    })
}
