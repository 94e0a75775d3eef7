//! User store contract and PostgreSQL repository.

use async_trait::async_trait;
use sqlx::PgPool;

use vidhub_core::error::AppError;
use vidhub_core::result::AppResult;
use vidhub_core::types::UserId;
use vidhub_core::types::pagination::{PageRequest, PageResponse};
use vidhub_entity::user::{CreateUser, PasswordHash, UpdateUser, User};

use super::db_err;

/// Persistence contract for principals.
///
/// Username and email lookups are exact on the normalized (trimmed,
/// lowercased) value; implementations normalize their inputs.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user whose username or email equals `identifier`.
    ///
    /// An email match wins over a username match.
    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<User>>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user. Duplicate username or email is `Conflict`.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Apply a partial profile update. Unknown id is `NotFound`.
    async fn update_profile(&self, id: UserId, data: &UpdateUser) -> AppResult<User>;

    /// Overwrite only the password hash column.
    async fn update_password(&self, id: UserId, hash: &PasswordHash) -> AppResult<()>;

    /// Overwrite only the refresh token column. `None` revokes.
    async fn set_refresh_token(&self, id: UserId, token: Option<&str>) -> AppResult<()>;

    /// Swap the refresh token only if it still equals `expected`.
    ///
    /// Returns `false` when the stored value differs (or is unset), in
    /// which case nothing is written.
    async fn replace_refresh_token(
        &self,
        id: UserId,
        expected: &str,
        new_token: &str,
    ) -> AppResult<bool>;

    /// List users, newest first.
    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<User>>;
}

/// Normalize a username or email for storage and lookup.
pub fn normalize_identifier(value: &str) -> String {
    value.trim().to_lowercase()
}

/// PostgreSQL-backed [`UserStore`].
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map unique-constraint violations on `users` to `Conflict`.
fn map_unique_violation(e: sqlx::Error, context: &'static str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_username_key") => {
            AppError::conflict("User with username already exists")
        }
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
            AppError::conflict("User with email already exists")
        }
        other => db_err(context)(other),
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE username = $1 OR email = $1 \
             ORDER BY (email = $1) DESC LIMIT 1",
        )
        .bind(normalize_identifier(identifier))
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err("Failed to find user by identifier"))
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Failed to find user by id"))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(normalize_identifier(username))
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Failed to find user by username"))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(normalize_identifier(email))
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Failed to find user by email"))
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, email, full_name, avatar, cover_image, password_hash) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(UserId::new())
        .bind(normalize_identifier(&data.username))
        .bind(normalize_identifier(&data.email))
        .bind(data.full_name.trim())
        .bind(&data.avatar)
        .bind(&data.cover_image)
        .bind(&data.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Failed to create user"))
    }

    async fn update_profile(&self, id: UserId, data: &UpdateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET \
                full_name = COALESCE($2, full_name), \
                email = COALESCE($3, email), \
                avatar = COALESCE($4, avatar), \
                cover_image = COALESCE($5, cover_image), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(data.full_name.as_deref().map(str::trim))
        .bind(data.email.as_deref().map(normalize_identifier))
        .bind(&data.avatar)
        .bind(&data.cover_image)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Failed to update user"))?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    async fn update_password(&self, id: UserId, hash: &PasswordHash) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(hash)
                .execute(&self.pool)
                .await
                .map_err(db_err("Failed to update password"))?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {id} not found")));
        }
        Ok(())
    }

    async fn set_refresh_token(&self, id: UserId, token: Option<&str>) -> AppResult<()> {
        sqlx::query("UPDATE users SET refresh_token = $2 WHERE id = $1")
            .bind(id)
            .bind(token.filter(|t| !t.is_empty()))
            .execute(&self.pool)
            .await
            .map_err(db_err("Failed to store refresh token"))?;
        Ok(())
    }

    async fn replace_refresh_token(
        &self,
        id: UserId,
        expected: &str,
        new_token: &str,
    ) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE users SET refresh_token = $3 WHERE id = $1 AND refresh_token = $2")
                .bind(id)
                .bind(expected)
                .bind(new_token)
                .execute(&self.pool)
                .await
                .map_err(db_err("Failed to rotate refresh token"))?;
        Ok(result.rows_affected() == 1)
    }

    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err("Failed to count users"))?;

        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("Failed to list users"))?;

        Ok(PageResponse::new(users, page, total as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_identifier() {
        assert_eq!(normalize_identifier("  Alice@X.com "), "alice@x.com");
        assert_eq!(normalize_identifier("Bob"), "bob");
    }
}
