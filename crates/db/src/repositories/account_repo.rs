//! Repository for the `accounts` table and account membership.

use sqlx::PgPool;

use nippo_core::types::DbId;

use crate::models::account::{Account, CreateAccount};
use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, fullname, password_hash, created_at, updated_at";

/// Provides CRUD operations for accounts and their user memberships.
pub struct AccountRepo;

impl AccountRepo {
    // ── Accounts ──────────────────────────────────────────────────────

    /// Insert a new account and enroll its creator as the first member,
    /// in one transaction.
    ///
    /// Bubbles the `uq_accounts_code` constraint violation when the code
    /// is already taken.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAccount,
        creator_user_id: DbId,
    ) -> Result<Account, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO accounts (code, fullname, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let account = sqlx::query_as::<_, Account>(&query)
            .bind(&input.code)
            .bind(&input.fullname)
            .bind(&input.password_hash)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO account_users (account_id, user_id) VALUES ($1, $2)")
            .bind(account.id)
            .bind(creator_user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(account)
    }

    /// Find an account by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by its login code (case-sensitive).
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE code = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    // ── Membership ────────────────────────────────────────────────────

    /// Enroll a user into an account.
    ///
    /// Returns `false` if the user is already a member.
    pub async fn add_member(
        pool: &PgPool,
        account_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO account_users (account_id, user_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(account_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Check whether a user belongs to an account.
    pub async fn is_member(
        pool: &PgPool,
        account_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS ( \
                 SELECT 1 FROM account_users \
                 WHERE account_id = $1 AND user_id = $2 \
             )",
        )
        .bind(account_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// List the users enrolled in an account, oldest membership first.
    pub async fn list_members(pool: &PgPool, account_id: DbId) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT u.id, u.username, u.fullname, u.password_hash, u.created_at, u.updated_at \
             FROM users u \
             JOIN account_users au ON au.user_id = u.id \
             WHERE au.account_id = $1 \
             ORDER BY au.created_at, u.id",
        )
        .bind(account_id)
        .fetch_all(pool)
        .await
    }
}
