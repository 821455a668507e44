pub mod classifier;
pub mod history;
pub mod recommendation;
pub mod wardrobe;
pub mod wear;
