//! Repository for the `trash_masters` cost matrix.

use sqlx::PgPool;

use nippo_core::types::DbId;

use crate::models::trash::{CreateTrashMaster, TrashMaster, TrashMasterRow, TrashRate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, account_id, dest_id, item_id, cost, unit_type, memo, \
                       created_at, updated_at";

/// Provides CRUD operations for trash disposal costs, scoped to one account.
pub struct TrashMasterRepo;

impl TrashMasterRepo {
    /// List all trash cost rows for an account with destination and item
    /// names resolved, oldest first.
    pub async fn list(pool: &PgPool, account_id: DbId) -> Result<Vec<TrashMasterRow>, sqlx::Error> {
        sqlx::query_as::<_, TrashMasterRow>(
            "SELECT t.id, t.dest_id, t.item_id, \
                    d.name AS dest_name, i.name AS item_name, \
                    t.cost, t.unit_type, t.memo \
             FROM trash_masters t \
             JOIN dest_masters d ON d.id = t.dest_id \
             JOIN item_masters i ON i.id = t.item_id \
             WHERE t.account_id = $1 \
             ORDER BY t.id",
        )
        .bind(account_id)
        .fetch_all(pool)
        .await
    }

    /// Insert a trash cost entry, returning the created row.
    ///
    /// Bubbles the `uq_trash_masters_dest_item_unit` constraint violation
    /// when the (destination, item, unit) triple is already priced.
    pub async fn create(
        pool: &PgPool,
        account_id: DbId,
        input: &CreateTrashMaster,
    ) -> Result<TrashMaster, sqlx::Error> {
        let query = format!(
            "INSERT INTO trash_masters (account_id, dest_id, item_id, cost, unit_type, memo)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrashMaster>(&query)
            .bind(account_id)
            .bind(input.dest_id)
            .bind(input.item_id)
            .bind(input.cost)
            .bind(input.unit_type)
            .bind(&input.memo)
            .fetch_one(pool)
            .await
    }

    /// Delete a trash cost entry by id, scoped to the account.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, account_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trash_masters WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Look up the unit cost for one (destination, item) pair.
    ///
    /// When the pair is priced in more than one unit the row with the
    /// lowest unit tag wins, so the result is deterministic.
    pub async fn find_rate(
        pool: &PgPool,
        account_id: DbId,
        dest_id: DbId,
        item_id: DbId,
    ) -> Result<Option<TrashRate>, sqlx::Error> {
        sqlx::query_as::<_, TrashRate>(
            "SELECT cost, unit_type FROM trash_masters \
             WHERE account_id = $1 AND dest_id = $2 AND item_id = $3 \
             ORDER BY unit_type \
             LIMIT 1",
        )
        .bind(account_id)
        .bind(dest_id)
        .bind(item_id)
        .fetch_optional(pool)
        .await
    }
}
