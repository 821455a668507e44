use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod history;
pub mod item;

pub use history::{HistoryEntry, HistoryItemDetails, OutfitHistoryRecord, WornItemIds};
pub use item::{ClothingItem, OutfitSelection};

/// Functional slot of a clothing item within an outfit
///
/// Fixed at creation by the classifier; not user-editable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Category {
    Top,
    Bottom,
    Footwear,
}

impl Category {
    /// The three slots every complete outfit needs, in selection order.
    pub const ALL: [Category; 3] = [Category::Top, Category::Bottom, Category::Footwear];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Footwear => "footwear",
        }
    }

    /// Wardrobe section label used in listings and shortage messages.
    pub fn section_label(&self) -> &'static str {
        match self {
            Category::Top => "tops",
            Category::Bottom => "bottoms",
            Category::Footwear => "shoes",
        }
    }

    /// Parse a classifier category label. Accepts the legacy "foot" label
    /// some classifier builds emit for footwear.
    pub fn parse_label(label: &str) -> Option<Category> {
        match label.trim().to_lowercase().as_str() {
            "top" => Some(Category::Top),
            "bottom" => Some(Category::Bottom),
            "foot" | "footwear" | "shoe" | "shoes" => Some(Category::Footwear),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Labels the external classifier produced for one clothing photo
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub category: Category,
    pub color: Option<String>,
    pub season: String,
    pub occasion: String,
}
