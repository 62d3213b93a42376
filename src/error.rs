use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    InvalidValue(String),
}

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid MongoDB connection string: {0}")]
    InvalidUri(#[source] mongodb::error::Error),

    #[error("MongoDB unreachable at {hosts}: {source}")]
    Unreachable {
        hosts: String,
        #[source]
        source: mongodb::error::Error,
    },
}

impl DatabaseError {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }
}
