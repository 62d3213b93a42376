pub mod database;
pub mod settings;

pub use database::{Namespace, PaymentDatabase, COLLECTION_NAME, DATABASE_NAME};
pub use settings::{DatabaseSettings, DEFAULT_MONGODB_URI};
