use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Category;

/// Item ids confirmed as worn in one wearing event
///
/// Every slot is optional; partial outfits (only shoes, say) are valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WornItemIds {
    pub top_id: Option<i64>,
    pub bottom_id: Option<i64>,
    pub footwear_id: Option<i64>,
}

/// Append-only record of one confirmed wearing
///
/// Item ids are stored as given at confirmation time and may dangle if
/// the item is deleted later; there is no cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OutfitHistoryRecord {
    pub id: i64,
    pub owner: String,
    pub top_id: Option<i64>,
    pub bottom_id: Option<i64>,
    pub footwear_id: Option<i64>,
    pub worn_at: DateTime<Utc>,
}

/// Current attributes of an item referenced from a history record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryItemDetails {
    pub id: i64,
    pub category: Category,
    pub color: Option<String>,
    pub season: String,
    pub occasion: String,
    pub wear_count: i64,
}

/// History record enriched at read time with the referenced items
///
/// The join happens on every read, so displayed details track later item
/// edits, and a deleted item renders as `None` rather than an error.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub record: OutfitHistoryRecord,
    pub top: Option<HistoryItemDetails>,
    pub bottom: Option<HistoryItemDetails>,
    pub footwear: Option<HistoryItemDetails>,
}
