mod context;
mod error;
mod keys;
mod loader;
mod models;
pub mod schema;

pub use context::DatasetContext;
pub use error::DatasetError;
pub use keys::STOCK_GENRE_KEYS;
pub use loader::{load_dataset, load_from_connection, UNKNOWN_COUNTRY};
pub use models::*;
