pub mod sqlite;

pub use sqlite::{create_pool, init_schema};
