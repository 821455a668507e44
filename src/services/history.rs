use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::{
    error::AppResult,
    models::{Category, HistoryEntry, HistoryItemDetails, OutfitHistoryRecord},
};

/// History page size cap
pub const MAX_HISTORY_LIMIT: u32 = 20;

/// Lists past wearing events, most recent first
///
/// Each record is enriched at read time with the referenced items'
/// current attributes via LEFT JOINs, so details track later edits and a
/// deleted item renders as a null slot. `limit` defaults to and is
/// capped at [`MAX_HISTORY_LIMIT`].
pub async fn list_history(
    pool: &SqlitePool,
    owner: &str,
    limit: Option<u32>,
) -> AppResult<Vec<HistoryEntry>> {
    let limit = limit.unwrap_or(MAX_HISTORY_LIMIT).min(MAX_HISTORY_LIMIT);

    let rows = sqlx::query(
        r#"
        SELECT
            h.id, h.owner, h.top_id, h.bottom_id, h.footwear_id, h.worn_at,
            t.id AS top_item_id, t.category AS top_category, t.color AS top_color,
            t.season AS top_season, t.occasion AS top_occasion, t.wear_count AS top_wear_count,
            b.id AS bottom_item_id, b.category AS bottom_category, b.color AS bottom_color,
            b.season AS bottom_season, b.occasion AS bottom_occasion, b.wear_count AS bottom_wear_count,
            f.id AS footwear_item_id, f.category AS footwear_category, f.color AS footwear_color,
            f.season AS footwear_season, f.occasion AS footwear_occasion, f.wear_count AS footwear_wear_count
        FROM outfit_history h
        LEFT JOIN clothes t ON t.id = h.top_id AND t.owner = h.owner
        LEFT JOIN clothes b ON b.id = h.bottom_id AND b.owner = h.owner
        LEFT JOIN clothes f ON f.id = h.footwear_id AND f.owner = h.owner
        WHERE h.owner = ?
        ORDER BY h.worn_at DESC, h.id DESC
        LIMIT ?
        "#,
    )
    .bind(owner)
    .bind(limit as i64)
    .fetch_all(pool)
    .await?;

    let entries = rows
        .into_iter()
        .map(entry_from_row)
        .collect::<Result<Vec<_>, sqlx::Error>>()?;

    tracing::debug!(owner = %owner, entries = entries.len(), "History listed");

    Ok(entries)
}

fn entry_from_row(row: SqliteRow) -> Result<HistoryEntry, sqlx::Error> {
    let record = OutfitHistoryRecord {
        id: row.try_get("id")?,
        owner: row.try_get("owner")?,
        top_id: row.try_get("top_id")?,
        bottom_id: row.try_get("bottom_id")?,
        footwear_id: row.try_get("footwear_id")?,
        worn_at: row.try_get("worn_at")?,
    };

    Ok(HistoryEntry {
        top: slot_details(&row, "top")?,
        bottom: slot_details(&row, "bottom")?,
        footwear: slot_details(&row, "footwear")?,
        record,
    })
}

/// Joined item columns for one slot; a NULL item id means the reference
/// dangles (or never pointed at this owner's item) and the slot is None.
fn slot_details(row: &SqliteRow, slot: &str) -> Result<Option<HistoryItemDetails>, sqlx::Error> {
    let id: Option<i64> = row.try_get(format!("{slot}_item_id").as_str())?;

    let Some(id) = id else {
        return Ok(None);
    };

    let category: Category = row.try_get(format!("{slot}_category").as_str())?;

    Ok(Some(HistoryItemDetails {
        id,
        category,
        color: row.try_get(format!("{slot}_color").as_str())?,
        season: row.try_get(format!("{slot}_season").as_str())?,
        occasion: row.try_get(format!("{slot}_occasion").as_str())?,
        wear_count: row.try_get(format!("{slot}_wear_count").as_str())?,
    }))
}
