//! Repository for report heads and their per-day detail rows.
//!
//! Submission is replace-on-resubmit: [`ReportRepo::replace_day`] upserts
//! the head, wipes the submitted day's rows, and inserts the new rows in
//! one transaction, so a day never holds a mix of old and new lines.

use sqlx::PgPool;

use nippo_core::types::{Day, DbId};

use crate::models::report::{
    NewReportDetail, ReportDetail, ReportHead, ReportHeadFields, SummaryRow,
};

/// Column list shared across head queries to avoid repetition.
const HEAD_COLUMNS: &str = "id, account_id, worksite_name, customer_name, address, memo, \
                            completed_date, created_at, updated_at";

/// Column list shared across detail queries to avoid repetition.
const DETAIL_COLUMNS: &str = "id, report_head_id, work_date, item_type, name, dest, cost, \
                              quant, unit_type, memo, created_at, updated_at";

/// Provides report storage operations, scoped to one account.
pub struct ReportRepo;

impl ReportRepo {
    // ── Heads ─────────────────────────────────────────────────────────

    /// Find a report head by its worksite name within an account.
    pub async fn find_head(
        pool: &PgPool,
        account_id: DbId,
        worksite_name: &str,
    ) -> Result<Option<ReportHead>, sqlx::Error> {
        let query = format!(
            "SELECT {HEAD_COLUMNS} FROM report_heads \
             WHERE account_id = $1 AND worksite_name = $2"
        );
        sqlx::query_as::<_, ReportHead>(&query)
            .bind(account_id)
            .bind(worksite_name)
            .fetch_optional(pool)
            .await
    }

    /// Find a report head by id within an account.
    pub async fn find_head_by_id(
        pool: &PgPool,
        account_id: DbId,
        id: DbId,
    ) -> Result<Option<ReportHead>, sqlx::Error> {
        let query = format!(
            "SELECT {HEAD_COLUMNS} FROM report_heads \
             WHERE id = $1 AND account_id = $2"
        );
        sqlx::query_as::<_, ReportHead>(&query)
            .bind(id)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }

    /// List every report head in an account, oldest first.
    pub async fn list_heads(pool: &PgPool, account_id: DbId) -> Result<Vec<ReportHead>, sqlx::Error> {
        let query = format!(
            "SELECT {HEAD_COLUMNS} FROM report_heads \
             WHERE account_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, ReportHead>(&query)
            .bind(account_id)
            .fetch_all(pool)
            .await
    }

    /// List the worksite names of an account's unfinished reports, for
    /// the submission form's worksite selector.
    pub async fn open_worksite_names(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT worksite_name FROM report_heads \
             WHERE account_id = $1 AND completed_date IS NULL \
             ORDER BY id",
        )
        .bind(account_id)
        .fetch_all(pool)
        .await
    }

    /// Mark a report head finished (`Some(date)`) or reopen it (`None`).
    ///
    /// Returns `true` if the row was updated.
    pub async fn set_completed(
        pool: &PgPool,
        account_id: DbId,
        id: DbId,
        completed_date: Option<Day>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE report_heads SET completed_date = $3 \
             WHERE id = $1 AND account_id = $2",
        )
        .bind(id)
        .bind(account_id)
        .bind(completed_date)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Day submission ────────────────────────────────────────────────

    /// Replace one worksite day with a freshly submitted set of rows.
    ///
    /// In a single transaction:
    /// 1. Upsert the head on `(account_id, worksite_name)`, overwriting
    ///    its customer, address, and memo with the submitted values.
    /// 2. Delete every existing detail row for the submitted date.
    /// 3. Insert the new rows in the order given.
    ///
    /// Returns the head id. Other dates of the same worksite are never
    /// touched, and a failed insert rolls the whole day back.
    pub async fn replace_day(
        pool: &PgPool,
        account_id: DbId,
        worksite_name: &str,
        work_date: Day,
        head: &ReportHeadFields,
        rows: &[NewReportDetail],
    ) -> Result<DbId, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let head_id: DbId = sqlx::query_scalar(
            "INSERT INTO report_heads (account_id, worksite_name, customer_name, address, memo)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT uq_report_heads_account_worksite
             DO UPDATE SET customer_name = EXCLUDED.customer_name,
                           address = EXCLUDED.address,
                           memo = EXCLUDED.memo
             RETURNING id",
        )
        .bind(account_id)
        .bind(worksite_name)
        .bind(&head.customer_name)
        .bind(&head.address)
        .bind(&head.memo)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM report_details WHERE report_head_id = $1 AND work_date = $2")
            .bind(head_id)
            .bind(work_date)
            .execute(&mut *tx)
            .await?;

        for row in rows {
            sqlx::query(
                "INSERT INTO report_details \
                     (report_head_id, work_date, item_type, name, dest, cost, quant, unit_type, memo) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            )
            .bind(head_id)
            .bind(work_date)
            .bind(row.item_type.value())
            .bind(&row.name)
            .bind(&row.dest)
            .bind(row.cost)
            .bind(row.quant)
            .bind(row.unit_type)
            .bind(&row.memo)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(head_id)
    }

    /// Fetch the detail rows of one worksite day in insertion order.
    pub async fn day_details(
        pool: &PgPool,
        report_head_id: DbId,
        work_date: Day,
    ) -> Result<Vec<ReportDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM report_details \
             WHERE report_head_id = $1 AND work_date = $2 \
             ORDER BY id"
        );
        sqlx::query_as::<_, ReportDetail>(&query)
            .bind(report_head_id)
            .bind(work_date)
            .fetch_all(pool)
            .await
    }

    // ── Aggregation ───────────────────────────────────────────────────

    /// Total quantity and cost per item type per work date across a
    /// worksite's whole history, ordered by date then type.
    ///
    /// `SUM` over `BIGINT` yields `NUMERIC` in Postgres, so both totals
    /// are cast back to `BIGINT`.
    pub async fn summarize(
        pool: &PgPool,
        report_head_id: DbId,
    ) -> Result<Vec<SummaryRow>, sqlx::Error> {
        sqlx::query_as::<_, SummaryRow>(
            "SELECT work_date, item_type, \
                    SUM(quant)::BIGINT AS total_quant, \
                    SUM(quant * cost)::BIGINT AS total_cost \
             FROM report_details \
             WHERE report_head_id = $1 \
             GROUP BY work_date, item_type \
             ORDER BY work_date, item_type",
        )
        .bind(report_head_id)
        .fetch_all(pool)
        .await
    }
}
