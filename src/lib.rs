pub mod config;
pub mod error;
pub mod telemetry;

pub use config::{DatabaseSettings, PaymentDatabase};
pub use error::{ConfigError, DatabaseError};
