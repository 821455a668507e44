use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Category;

/// A clothing item as stored in the wardrobe
///
/// `wear_count` starts at zero and only ever grows; the wear tracker is
/// the sole writer. Season and occasion are the exact-match filter keys
/// for recommendations and stay editable after classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClothingItem {
    pub id: i64,
    pub owner: String,
    pub category: Category,
    pub color: Option<String>,
    pub season: String,
    pub occasion: String,
    pub wear_count: i64,
    pub created_at: DateTime<Utc>,
}

/// One recommended outfit: the least-worn eligible item per slot
///
/// Ephemeral — nothing is persisted until the wearing is confirmed.
/// Each item carries its wear count at selection time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutfitSelection {
    pub top: ClothingItem,
    pub bottom: ClothingItem,
    pub footwear: ClothingItem,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item(category: Category) -> ClothingItem {
        ClothingItem {
            id: 7,
            owner: "u1".to_string(),
            category,
            color: Some("navy".to_string()),
            season: "Winter".to_string(),
            occasion: "Formal".to_string(),
            wear_count: 3,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_item_serializes_category_lowercase() {
        let json = serde_json::to_value(sample_item(Category::Footwear)).unwrap();
        assert_eq!(json["category"], "footwear");
        assert_eq!(json["wear_count"], 3);
    }

    #[test]
    fn test_selection_serializes_all_slots() {
        let selection = OutfitSelection {
            top: sample_item(Category::Top),
            bottom: sample_item(Category::Bottom),
            footwear: sample_item(Category::Footwear),
        };

        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json["top"]["category"], "top");
        assert_eq!(json["bottom"]["category"], "bottom");
        assert_eq!(json["footwear"]["category"], "footwear");
    }
}
