//! Integration tests for the master catalogs and the trash cost matrix.
//!
//! Exercises the catalog repositories against a real database:
//! - Listing and creation across all seven catalog kinds
//! - Per-account name uniqueness and cross-account isolation
//! - Trash cost (destination, item, unit) uniqueness and name resolution
//! - Rate point lookup

use sqlx::PgPool;

use nippo_db::models::account::CreateAccount;
use nippo_db::models::master::{CreateMaster, MasterKind};
use nippo_db::models::trash::CreateTrashMaster;
use nippo_db::models::user::CreateUser;
use nippo_db::repositories::{AccountRepo, MasterRepo, TrashMasterRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_account(pool: &PgPool, code: &str) -> i64 {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: format!("{code}-owner"),
            fullname: "Owner".to_string(),
            password_hash: "x".to_string(),
        },
    )
    .await
    .unwrap();
    let account = AccountRepo::create(
        pool,
        &CreateAccount {
            code: code.to_string(),
            fullname: format!("{code} Co."),
            password_hash: "x".to_string(),
        },
        user.id,
    )
    .await
    .unwrap();
    account.id
}

fn entry(name: &str, cost: Option<i64>) -> CreateMaster {
    CreateMaster {
        name: name.to_string(),
        cost,
        memo: None,
    }
}

fn trash_entry(dest_id: i64, item_id: i64, cost: i64, unit_type: i16) -> CreateTrashMaster {
    CreateTrashMaster {
        dest_id,
        item_id,
        cost,
        unit_type,
        memo: None,
    }
}

// ---------------------------------------------------------------------------
// Test: Create and list across all seven catalog kinds
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_and_list_every_kind(pool: PgPool) {
    let account_id = seed_account(&pool, "acme").await;

    for kind in MasterKind::ALL {
        let created = MasterRepo::create(&pool, kind, account_id, &entry("Alpha", Some(500)))
            .await
            .unwrap();
        assert_eq!(created.name, "Alpha");
        if kind.has_cost() {
            assert_eq!(created.cost, Some(500));
        } else {
            assert_eq!(created.cost, None, "{kind:?} should not carry a cost");
        }

        let rows = MasterRepo::list(&pool, kind, account_id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, created.id);
    }
}

// ---------------------------------------------------------------------------
// Test: Omitted cost defaults to zero on costed catalogs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_omitted_cost_defaults_to_zero(pool: PgPool) {
    let account_id = seed_account(&pool, "acme").await;

    let created = MasterRepo::create(&pool, MasterKind::Staff, account_id, &entry("Tanaka", None))
        .await
        .unwrap();
    assert_eq!(created.cost, Some(0));
}

// ---------------------------------------------------------------------------
// Test: Duplicate name within one account is rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_duplicate_name_within_account_rejected(pool: PgPool) {
    let account_id = seed_account(&pool, "acme").await;

    MasterRepo::create(&pool, MasterKind::Staff, account_id, &entry("Tanaka", Some(15000)))
        .await
        .unwrap();
    let result =
        MasterRepo::create(&pool, MasterKind::Staff, account_id, &entry("Tanaka", Some(16000)))
            .await;
    assert!(result.is_err(), "duplicate name in one account should fail");
}

// ---------------------------------------------------------------------------
// Test: Same name in different accounts is allowed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_same_name_across_accounts_allowed(pool: PgPool) {
    let acme = seed_account(&pool, "acme").await;
    let globex = seed_account(&pool, "globex").await;

    MasterRepo::create(&pool, MasterKind::Staff, acme, &entry("Tanaka", Some(15000)))
        .await
        .unwrap();
    MasterRepo::create(&pool, MasterKind::Staff, globex, &entry("Tanaka", Some(15000)))
        .await
        .unwrap();

    assert_eq!(MasterRepo::list(&pool, MasterKind::Staff, acme).await.unwrap().len(), 1);
    assert_eq!(
        MasterRepo::list(&pool, MasterKind::Staff, globex).await.unwrap().len(),
        1
    );
}

// ---------------------------------------------------------------------------
// Test: Delete is scoped to the owning account
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_scoped_to_account(pool: PgPool) {
    let acme = seed_account(&pool, "acme").await;
    let globex = seed_account(&pool, "globex").await;

    let created = MasterRepo::create(&pool, MasterKind::Car, acme, &entry("2t Truck", Some(8000)))
        .await
        .unwrap();

    // Another account cannot delete it.
    let deleted = MasterRepo::delete(&pool, MasterKind::Car, globex, created.id)
        .await
        .unwrap();
    assert!(!deleted);

    // The owner can.
    let deleted = MasterRepo::delete(&pool, MasterKind::Car, acme, created.id)
        .await
        .unwrap();
    assert!(deleted);
    assert!(MasterRepo::list(&pool, MasterKind::Car, acme).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: Trash cost rows resolve destination and item names
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_trash_list_resolves_names(pool: PgPool) {
    let account_id = seed_account(&pool, "acme").await;
    let dest = MasterRepo::create(&pool, MasterKind::Dest, account_id, &entry("City Landfill", None))
        .await
        .unwrap();
    let item = MasterRepo::create(&pool, MasterKind::Item, account_id, &entry("Concrete", Some(0)))
        .await
        .unwrap();

    TrashMasterRepo::create(&pool, account_id, &trash_entry(dest.id, item.id, 120, 1))
        .await
        .unwrap();

    let rows = TrashMasterRepo::list(&pool, account_id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].dest_name, "City Landfill");
    assert_eq!(rows[0].item_name, "Concrete");
    assert_eq!(rows[0].cost, 120);
    assert_eq!(rows[0].unit_type, 1);
}

// ---------------------------------------------------------------------------
// Test: Duplicate (destination, item, unit) triple is rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_duplicate_trash_triple_rejected(pool: PgPool) {
    let account_id = seed_account(&pool, "acme").await;
    let dest = MasterRepo::create(&pool, MasterKind::Dest, account_id, &entry("City Landfill", None))
        .await
        .unwrap();
    let item = MasterRepo::create(&pool, MasterKind::Item, account_id, &entry("Concrete", Some(0)))
        .await
        .unwrap();

    TrashMasterRepo::create(&pool, account_id, &trash_entry(dest.id, item.id, 120, 1))
        .await
        .unwrap();

    // Same pair in a different unit is a distinct price.
    TrashMasterRepo::create(&pool, account_id, &trash_entry(dest.id, item.id, 110_000, 2))
        .await
        .unwrap();

    // Same triple again fails.
    let result =
        TrashMasterRepo::create(&pool, account_id, &trash_entry(dest.id, item.id, 130, 1)).await;
    assert!(result.is_err(), "duplicate (dest, item, unit) should fail");
}

// ---------------------------------------------------------------------------
// Test: Rate lookup prefers the lowest unit tag
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_rate_lookup_prefers_lowest_unit(pool: PgPool) {
    let account_id = seed_account(&pool, "acme").await;
    let dest = MasterRepo::create(&pool, MasterKind::Dest, account_id, &entry("City Landfill", None))
        .await
        .unwrap();
    let item = MasterRepo::create(&pool, MasterKind::Item, account_id, &entry("Concrete", Some(0)))
        .await
        .unwrap();

    TrashMasterRepo::create(&pool, account_id, &trash_entry(dest.id, item.id, 110_000, 2))
        .await
        .unwrap();
    TrashMasterRepo::create(&pool, account_id, &trash_entry(dest.id, item.id, 120, 1))
        .await
        .unwrap();

    let rate = TrashMasterRepo::find_rate(&pool, account_id, dest.id, item.id)
        .await
        .unwrap()
        .expect("rate should exist");
    assert_eq!(rate.unit_type, 1);
    assert_eq!(rate.cost, 120);

    // Unpriced pair yields nothing.
    let missing = TrashMasterRepo::find_rate(&pool, account_id, dest.id, 999_999)
        .await
        .unwrap();
    assert!(missing.is_none());
}

// ---------------------------------------------------------------------------
// Test: Priced destinations cannot be deleted out from under the matrix
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_priced_dest_delete_restricted(pool: PgPool) {
    let account_id = seed_account(&pool, "acme").await;
    let dest = MasterRepo::create(&pool, MasterKind::Dest, account_id, &entry("City Landfill", None))
        .await
        .unwrap();
    let item = MasterRepo::create(&pool, MasterKind::Item, account_id, &entry("Concrete", Some(0)))
        .await
        .unwrap();
    TrashMasterRepo::create(&pool, account_id, &trash_entry(dest.id, item.id, 120, 1))
        .await
        .unwrap();

    let result = MasterRepo::delete(&pool, MasterKind::Dest, account_id, dest.id).await;
    assert!(result.is_err(), "RESTRICT should block deleting a priced dest");

    // Remove the price, then the destination can go.
    let rows = TrashMasterRepo::list(&pool, account_id).await.unwrap();
    TrashMasterRepo::delete(&pool, account_id, rows[0].id).await.unwrap();
    let deleted = MasterRepo::delete(&pool, MasterKind::Dest, account_id, dest.id)
        .await
        .unwrap();
    assert!(deleted);
}

// ---------------------------------------------------------------------------
// Test: Membership enrolment is idempotent at the repo level
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_add_member_reports_existing_membership(pool: PgPool) {
    let account_id = seed_account(&pool, "acme").await;
    let user = UserRepo::create(
        &pool,
        &CreateUser {
            username: "newhire".to_string(),
            fullname: "New Hire".to_string(),
            password_hash: "x".to_string(),
        },
    )
    .await
    .unwrap();

    let added = AccountRepo::add_member(&pool, account_id, user.id).await.unwrap();
    assert!(added);
    let added_again = AccountRepo::add_member(&pool, account_id, user.id).await.unwrap();
    assert!(!added_again, "second enrolment should report no change");

    assert!(AccountRepo::is_member(&pool, account_id, user.id).await.unwrap());
    let members = AccountRepo::list_members(&pool, account_id).await.unwrap();
    assert_eq!(members.len(), 2, "owner plus the new hire");
}
