use chrono::Utc;
use serde::Serialize;
use sqlx::{Row, SqlitePool};

use crate::{
    error::{AppError, AppResult},
    models::{Category, ClothingItem},
    services::classifier::Classifier,
};

/// Wardrobe contents grouped by section
#[derive(Debug, Default, Serialize)]
pub struct GroupedWardrobe {
    pub tops: Vec<ClothingItem>,
    pub bottoms: Vec<ClothingItem>,
    pub shoes: Vec<ClothingItem>,
}

/// Wear summary for one item, used in usage statistics
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct WearSummary {
    pub id: i64,
    pub category: Category,
    pub color: Option<String>,
    pub wear_count: i64,
}

/// Wardrobe usage statistics
#[derive(Debug, Serialize)]
pub struct WardrobeStats {
    pub total_items: i64,
    pub total_wears: i64,
    pub avg_wears: f64,
    pub most_worn: Vec<WearSummary>,
    pub least_worn: Vec<WearSummary>,
}

/// Classifies an uploaded image and stores the resulting item
///
/// The classifier fixes the category; season and occasion stay editable
/// afterwards. New items start with a zero wear count.
pub async fn ingest_item(
    pool: &SqlitePool,
    classifier: &dyn Classifier,
    owner: &str,
    image: &[u8],
) -> AppResult<ClothingItem> {
    if image.is_empty() {
        return Err(AppError::InvalidInput(
            "Image body cannot be empty".to_string(),
        ));
    }

    let labels = classifier.classify(image).await?;

    let item = sqlx::query_as::<_, ClothingItem>(
        r#"
        INSERT INTO clothes (owner, category, color, season, occasion, wear_count, created_at)
        VALUES (?, ?, ?, ?, ?, 0, ?)
        RETURNING id, owner, category, color, season, occasion, wear_count, created_at
        "#,
    )
    .bind(owner)
    .bind(labels.category)
    .bind(&labels.color)
    .bind(&labels.season)
    .bind(&labels.occasion)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    tracing::info!(
        owner = %owner,
        item_id = item.id,
        category = %item.category,
        classifier = classifier.name(),
        "Item added to wardrobe"
    );

    Ok(item)
}

/// Lists the owner's wardrobe grouped into tops, bottoms and shoes.
pub async fn list_wardrobe(pool: &SqlitePool, owner: &str) -> AppResult<GroupedWardrobe> {
    let items = sqlx::query_as::<_, ClothingItem>(
        r#"
        SELECT id, owner, category, color, season, occasion, wear_count, created_at
        FROM clothes
        WHERE owner = ?
        ORDER BY id ASC
        "#,
    )
    .bind(owner)
    .fetch_all(pool)
    .await?;

    let mut wardrobe = GroupedWardrobe::default();
    for item in items {
        match item.category {
            Category::Top => wardrobe.tops.push(item),
            Category::Bottom => wardrobe.bottoms.push(item),
            Category::Footwear => wardrobe.shoes.push(item),
        }
    }

    Ok(wardrobe)
}

/// Updates an item's season and occasion tags
///
/// Category and wear count are not editable here: the category is fixed
/// by the classifier and the counter belongs to the wear tracker.
pub async fn update_tags(
    pool: &SqlitePool,
    owner: &str,
    item_id: i64,
    season: &str,
    occasion: &str,
) -> AppResult<ClothingItem> {
    let item = sqlx::query_as::<_, ClothingItem>(
        r#"
        UPDATE clothes
        SET season = ?, occasion = ?
        WHERE id = ? AND owner = ?
        RETURNING id, owner, category, color, season, occasion, wear_count, created_at
        "#,
    )
    .bind(season)
    .bind(occasion)
    .bind(item_id)
    .bind(owner)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("No wardrobe item with id {item_id}")))?;

    tracing::info!(owner = %owner, item_id, "Item tags updated");

    Ok(item)
}

/// Deletes an owned item. History records referencing it are left in
/// place; their slots render as null from then on.
pub async fn delete_item(pool: &SqlitePool, owner: &str, item_id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM clothes WHERE id = ? AND owner = ?")
        .bind(item_id)
        .bind(owner)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "No wardrobe item with id {item_id}"
        )));
    }

    tracing::info!(owner = %owner, item_id, "Item deleted");

    Ok(())
}

/// Computes wardrobe usage statistics for the owner.
pub async fn wardrobe_stats(pool: &SqlitePool, owner: &str) -> AppResult<WardrobeStats> {
    let totals = sqlx::query(
        r#"
        SELECT
            COUNT(*) AS total_items,
            COALESCE(SUM(wear_count), 0) AS total_wears,
            COALESCE(AVG(wear_count), 0.0) AS avg_wears
        FROM clothes
        WHERE owner = ?
        "#,
    )
    .bind(owner)
    .fetch_one(pool)
    .await?;

    let most_worn = wear_extremes(pool, owner, "DESC").await?;
    let least_worn = wear_extremes(pool, owner, "ASC").await?;

    let avg_wears: f64 = totals.try_get("avg_wears")?;

    Ok(WardrobeStats {
        total_items: totals.try_get("total_items")?,
        total_wears: totals.try_get("total_wears")?,
        avg_wears: (avg_wears * 100.0).round() / 100.0,
        most_worn,
        least_worn,
    })
}

async fn wear_extremes(
    pool: &SqlitePool,
    owner: &str,
    direction: &str,
) -> AppResult<Vec<WearSummary>> {
    // direction is a fixed literal from wardrobe_stats, never user input
    let query = format!(
        r#"
        SELECT id, category, color, wear_count
        FROM clothes
        WHERE owner = ?
        ORDER BY wear_count {direction}, id ASC
        LIMIT 3
        "#
    );

    let summaries = sqlx::query_as::<_, WearSummary>(&query)
        .bind(owner)
        .fetch_all(pool)
        .await?;

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::test_pool;
    use crate::models::Classification;
    use crate::services::classifier::MockClassifier;

    fn classifier_returning(category: Category, season: &str, occasion: &str) -> MockClassifier {
        let season = season.to_string();
        let occasion = occasion.to_string();
        let mut classifier = MockClassifier::new();
        classifier.expect_classify().returning(move |_| {
            Ok(Classification {
                category,
                color: Some("olive".to_string()),
                season: season.clone(),
                occasion: occasion.clone(),
            })
        });
        classifier.expect_name().return_const("mock");
        classifier
    }

    async fn seed_item(pool: &SqlitePool, owner: &str, category: Category, wear_count: i64) -> i64 {
        sqlx::query_scalar(
            r#"
            INSERT INTO clothes (owner, category, color, season, occasion, wear_count, created_at)
            VALUES (?, ?, NULL, 'Summer', 'Casual', ?, ?)
            RETURNING id
            "#,
        )
        .bind(owner)
        .bind(category)
        .bind(wear_count)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_ingest_stores_classified_item_with_zero_wears() {
        let pool = test_pool().await;
        let classifier = classifier_returning(Category::Top, "Winter", "Formal");

        let item = ingest_item(&pool, &classifier, "u1", b"fake image bytes")
            .await
            .unwrap();

        assert_eq!(item.owner, "u1");
        assert_eq!(item.category, Category::Top);
        assert_eq!(item.season, "Winter");
        assert_eq!(item.occasion, "Formal");
        assert_eq!(item.wear_count, 0);
    }

    #[tokio::test]
    async fn test_ingest_rejects_empty_body() {
        let pool = test_pool().await;
        let classifier = MockClassifier::new();

        let result = ingest_item(&pool, &classifier, "u1", b"").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_list_wardrobe_groups_by_section() {
        let pool = test_pool().await;
        seed_item(&pool, "u1", Category::Top, 0).await;
        seed_item(&pool, "u1", Category::Top, 0).await;
        seed_item(&pool, "u1", Category::Footwear, 0).await;
        seed_item(&pool, "u2", Category::Bottom, 0).await;

        let wardrobe = list_wardrobe(&pool, "u1").await.unwrap();
        assert_eq!(wardrobe.tops.len(), 2);
        assert_eq!(wardrobe.bottoms.len(), 0);
        assert_eq!(wardrobe.shoes.len(), 1);
    }

    #[tokio::test]
    async fn test_update_tags_keeps_category_and_wear_count() {
        let pool = test_pool().await;
        let item_id = seed_item(&pool, "u1", Category::Bottom, 4).await;

        let updated = update_tags(&pool, "u1", item_id, "Winter", "Formal")
            .await
            .unwrap();

        assert_eq!(updated.season, "Winter");
        assert_eq!(updated.occasion, "Formal");
        assert_eq!(updated.category, Category::Bottom);
        assert_eq!(updated.wear_count, 4);
    }

    #[tokio::test]
    async fn test_update_tags_rejects_foreign_item() {
        let pool = test_pool().await;
        let item_id = seed_item(&pool, "u2", Category::Top, 0).await;

        let result = update_tags(&pool, "u1", item_id, "Winter", "Formal").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_item_scoped_to_owner() {
        let pool = test_pool().await;
        let item_id = seed_item(&pool, "u2", Category::Top, 0).await;

        let result = delete_item(&pool, "u1", item_id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        delete_item(&pool, "u2", item_id).await.unwrap();
        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clothes")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn test_stats_totals_and_extremes() {
        let pool = test_pool().await;
        let heavy = seed_item(&pool, "u1", Category::Top, 10).await;
        let light = seed_item(&pool, "u1", Category::Bottom, 1).await;
        seed_item(&pool, "u1", Category::Footwear, 4).await;
        seed_item(&pool, "u2", Category::Top, 99).await;

        let stats = wardrobe_stats(&pool, "u1").await.unwrap();
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.total_wears, 15);
        assert_eq!(stats.avg_wears, 5.0);
        assert_eq!(stats.most_worn[0].id, heavy);
        assert_eq!(stats.least_worn[0].id, light);
    }

    #[tokio::test]
    async fn test_stats_on_empty_wardrobe() {
        let pool = test_pool().await;

        let stats = wardrobe_stats(&pool, "u1").await.unwrap();
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.total_wears, 0);
        assert_eq!(stats.avg_wears, 0.0);
        assert!(stats.most_worn.is_empty());
    }
}
