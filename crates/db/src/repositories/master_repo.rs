//! Repository for the seven master catalog tables.
//!
//! All catalog queries dispatch on [`MasterKind`], which owns the
//! segment-to-table mapping, so the SQL here is built only from the
//! closed set of table names.

use sqlx::PgPool;

use nippo_core::types::DbId;

use crate::models::master::{CreateMaster, MasterKind, MasterRow, NameRef};

/// Provides CRUD operations for catalog entries, scoped to one account.
pub struct MasterRepo;

impl MasterRepo {
    // ── Listing ───────────────────────────────────────────────────────

    /// List the catalog rows of one kind for an account, oldest first.
    ///
    /// Name-only catalogs select `NULL::BIGINT` for cost so every kind
    /// produces the same row shape.
    pub async fn list(
        pool: &PgPool,
        kind: MasterKind,
        account_id: DbId,
    ) -> Result<Vec<MasterRow>, sqlx::Error> {
        let table = kind.table();
        let query = format!(
            "SELECT id, name, {cost} AS cost, memo FROM {table} \
             WHERE account_id = $1 ORDER BY id",
            cost = cost_expr(kind),
        );
        sqlx::query_as::<_, MasterRow>(&query)
            .bind(account_id)
            .fetch_all(pool)
            .await
    }

    /// List id + name pairs of one kind for selection lists.
    pub async fn list_refs(
        pool: &PgPool,
        kind: MasterKind,
        account_id: DbId,
    ) -> Result<Vec<NameRef>, sqlx::Error> {
        let query = format!(
            "SELECT id, name FROM {table} WHERE account_id = $1 ORDER BY id",
            table = kind.table(),
        );
        sqlx::query_as::<_, NameRef>(&query)
            .bind(account_id)
            .fetch_all(pool)
            .await
    }

    // ── Mutation ──────────────────────────────────────────────────────

    /// Insert a catalog entry, returning the created row.
    ///
    /// Bubbles the per-account `uq_<table>_account_name` constraint
    /// violation when the name already exists in this account.
    pub async fn create(
        pool: &PgPool,
        kind: MasterKind,
        account_id: DbId,
        input: &CreateMaster,
    ) -> Result<MasterRow, sqlx::Error> {
        let table = kind.table();
        if kind.has_cost() {
            let query = format!(
                "INSERT INTO {table} (account_id, name, cost, memo)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, name, cost, memo"
            );
            sqlx::query_as::<_, MasterRow>(&query)
                .bind(account_id)
                .bind(&input.name)
                .bind(input.cost.unwrap_or(0))
                .bind(&input.memo)
                .fetch_one(pool)
                .await
        } else {
            let query = format!(
                "INSERT INTO {table} (account_id, name, memo)
                 VALUES ($1, $2, $3)
                 RETURNING id, name, NULL::BIGINT AS cost, memo"
            );
            sqlx::query_as::<_, MasterRow>(&query)
                .bind(account_id)
                .bind(&input.name)
                .bind(&input.memo)
                .fetch_one(pool)
                .await
        }
    }

    /// Delete a catalog entry by id, scoped to the account.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        kind: MasterKind,
        account_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "DELETE FROM {table} WHERE id = $1 AND account_id = $2",
            table = kind.table(),
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(account_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Lookup helpers ────────────────────────────────────────────────

    /// Check whether a catalog entry exists within an account.
    pub async fn exists(
        pool: &PgPool,
        kind: MasterKind,
        account_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "SELECT EXISTS ( \
                 SELECT 1 FROM {table} WHERE id = $1 AND account_id = $2 \
             )",
            table = kind.table(),
        );
        sqlx::query_scalar::<_, bool>(&query)
            .bind(id)
            .bind(account_id)
            .fetch_one(pool)
            .await
    }
}

// ── Private helpers ──────────────────────────────────────────────────────

/// SQL expression for the cost column of a catalog kind.
fn cost_expr(kind: MasterKind) -> &'static str {
    if kind.has_cost() {
        "cost"
    } else {
        "NULL::BIGINT"
    }
}
