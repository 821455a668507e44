use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    error::AppResult,
    models::{OutfitHistoryRecord, WornItemIds},
};

/// Records one confirmed wearing event
///
/// Increments the wear count of every supplied item id that belongs to
/// `owner` and appends exactly one history record capturing the ids as
/// given. Everything runs in a single transaction: either the whole
/// event lands or none of it does.
///
/// The owner predicate on the UPDATE is the ownership filter — an id
/// belonging to someone else (or already deleted) matches no row and is
/// silently skipped, while the history record still stores it. Partial
/// outfits are fine; so is an empty set of ids.
///
/// Deliberately not idempotent: each call is a distinct real-world
/// wearing, so calling twice increments twice and appends two records.
pub async fn confirm_worn(
    pool: &SqlitePool,
    owner: &str,
    worn: WornItemIds,
) -> AppResult<OutfitHistoryRecord> {
    let mut tx = pool.begin().await?;

    let mut incremented = 0u64;
    for item_id in [worn.top_id, worn.bottom_id, worn.footwear_id]
        .into_iter()
        .flatten()
    {
        let result = sqlx::query(
            r#"
            UPDATE clothes
            SET wear_count = wear_count + 1
            WHERE id = ? AND owner = ?
            "#,
        )
        .bind(item_id)
        .bind(owner)
        .execute(&mut *tx)
        .await?;

        incremented += result.rows_affected();
    }

    let record = sqlx::query_as::<_, OutfitHistoryRecord>(
        r#"
        INSERT INTO outfit_history (owner, top_id, bottom_id, footwear_id, worn_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, owner, top_id, bottom_id, footwear_id, worn_at
        "#,
    )
    .bind(owner)
    .bind(worn.top_id)
    .bind(worn.bottom_id)
    .bind(worn.footwear_id)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        owner = %owner,
        record_id = record.id,
        incremented,
        "Outfit marked as worn"
    );

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::test_pool;
    use crate::models::Category;

    async fn insert_item(pool: &SqlitePool, owner: &str, category: Category) -> i64 {
        sqlx::query_scalar(
            r#"
            INSERT INTO clothes (owner, category, color, season, occasion, wear_count, created_at)
            VALUES (?, ?, NULL, 'Summer', 'Casual', 0, ?)
            RETURNING id
            "#,
        )
        .bind(owner)
        .bind(category)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
        .unwrap()
    }

    async fn wear_count(pool: &SqlitePool, item_id: i64) -> i64 {
        sqlx::query_scalar("SELECT wear_count FROM clothes WHERE id = ?")
            .bind(item_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_confirm_worn_increments_each_item_once() {
        let pool = test_pool().await;
        let top_id = insert_item(&pool, "u1", Category::Top).await;
        let bottom_id = insert_item(&pool, "u1", Category::Bottom).await;
        let footwear_id = insert_item(&pool, "u1", Category::Footwear).await;

        let record = confirm_worn(
            &pool,
            "u1",
            WornItemIds {
                top_id: Some(top_id),
                bottom_id: Some(bottom_id),
                footwear_id: Some(footwear_id),
            },
        )
        .await
        .unwrap();

        assert_eq!(record.owner, "u1");
        assert_eq!(record.top_id, Some(top_id));
        assert_eq!(wear_count(&pool, top_id).await, 1);
        assert_eq!(wear_count(&pool, bottom_id).await, 1);
        assert_eq!(wear_count(&pool, footwear_id).await, 1);
    }

    #[tokio::test]
    async fn test_confirm_worn_twice_counts_two_wearings() {
        let pool = test_pool().await;
        let top_id = insert_item(&pool, "u1", Category::Top).await;
        let worn = WornItemIds {
            top_id: Some(top_id),
            ..Default::default()
        };

        confirm_worn(&pool, "u1", worn).await.unwrap();
        confirm_worn(&pool, "u1", worn).await.unwrap();

        assert_eq!(wear_count(&pool, top_id).await, 2);

        let records: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM outfit_history")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(records, 2);
    }

    #[tokio::test]
    async fn test_foreign_owner_id_is_ignored_but_recorded() {
        let pool = test_pool().await;
        let own_top = insert_item(&pool, "u1", Category::Top).await;
        let foreign_shoe = insert_item(&pool, "u2", Category::Footwear).await;

        let record = confirm_worn(
            &pool,
            "u1",
            WornItemIds {
                top_id: Some(own_top),
                bottom_id: None,
                footwear_id: Some(foreign_shoe),
            },
        )
        .await
        .unwrap();

        // Only the owned item was incremented
        assert_eq!(wear_count(&pool, own_top).await, 1);
        assert_eq!(wear_count(&pool, foreign_shoe).await, 0);

        // The record stores the ids exactly as given
        assert_eq!(record.bottom_id, None);
        assert_eq!(record.footwear_id, Some(foreign_shoe));
    }

    #[tokio::test]
    async fn test_unknown_id_is_tolerated() {
        let pool = test_pool().await;

        let record = confirm_worn(
            &pool,
            "u1",
            WornItemIds {
                top_id: Some(9999),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(record.top_id, Some(9999));
    }

    #[tokio::test]
    async fn test_empty_worn_set_still_appends_one_record() {
        let pool = test_pool().await;

        let record = confirm_worn(&pool, "u1", WornItemIds::default()).await.unwrap();

        assert_eq!(record.top_id, None);
        assert_eq!(record.bottom_id, None);
        assert_eq!(record.footwear_id, None);

        let records: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM outfit_history")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(records, 1);
    }
}
