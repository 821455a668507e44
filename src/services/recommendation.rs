use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::{Category, ClothingItem, OutfitSelection},
};

/// Selects a wear-balanced outfit for a season/occasion filter
///
/// For each of the three slots the owner's items matching (category,
/// season, occasion) exactly — case-sensitive, no normalization — are
/// ranked by wear count, and the least-worn wins. Equal wear counts are
/// resolved by lowest id, so repeated calls with unchanged inventory
/// return the same selection.
///
/// Read-only: no wear count changes, no history record. If any slot has
/// no candidates the whole call fails with the missing sections named,
/// rather than returning a partial outfit.
///
/// Least-worn-first is a greedy heuristic: myopic per call, but it
/// converges to roughly even usage over repeated recommend/confirm
/// cycles without any state beyond the counter.
pub async fn recommend(
    pool: &SqlitePool,
    owner: &str,
    season: &str,
    occasion: &str,
) -> AppResult<OutfitSelection> {
    let top = least_worn(pool, owner, Category::Top, season, occasion).await?;
    let bottom = least_worn(pool, owner, Category::Bottom, season, occasion).await?;
    let footwear = least_worn(pool, owner, Category::Footwear, season, occasion).await?;

    match (top, bottom, footwear) {
        (Some(top), Some(bottom), Some(footwear)) => {
            tracing::info!(
                owner = %owner,
                season = %season,
                occasion = %occasion,
                top_id = top.id,
                bottom_id = bottom.id,
                footwear_id = footwear.id,
                "Outfit recommended"
            );

            Ok(OutfitSelection {
                top,
                bottom,
                footwear,
            })
        }
        (top, bottom, footwear) => {
            let slots = [
                (Category::Top, top.is_none()),
                (Category::Bottom, bottom.is_none()),
                (Category::Footwear, footwear.is_none()),
            ];
            let missing: Vec<Category> = slots
                .into_iter()
                .filter_map(|(category, empty)| empty.then_some(category))
                .collect();

            tracing::info!(
                owner = %owner,
                season = %season,
                occasion = %occasion,
                missing = ?missing,
                "Insufficient inventory for recommendation"
            );

            Err(AppError::InsufficientInventory { missing })
        }
    }
}

/// Least-worn candidate for one slot. `wear_count ASC, id ASC` makes the
/// tie-break deterministic: lowest id wins among equally-worn items.
async fn least_worn(
    pool: &SqlitePool,
    owner: &str,
    category: Category,
    season: &str,
    occasion: &str,
) -> AppResult<Option<ClothingItem>> {
    let item = sqlx::query_as::<_, ClothingItem>(
        r#"
        SELECT id, owner, category, color, season, occasion, wear_count, created_at
        FROM clothes
        WHERE owner = ? AND category = ? AND season = ? AND occasion = ?
        ORDER BY wear_count ASC, id ASC
        LIMIT 1
        "#,
    )
    .bind(owner)
    .bind(category)
    .bind(season)
    .bind(occasion)
    .fetch_optional(pool)
    .await?;

    Ok(item)
}
