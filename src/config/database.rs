use bson::{doc, Document};
use mongodb::{options::ClientOptions, Client, Collection, Database};

pub use mongodb::Namespace;

use crate::config::settings::DatabaseSettings;
use crate::error::DatabaseError;

pub const DATABASE_NAME: &str = "payment_app";
pub const COLLECTION_NAME: &str = "payments";

/// Owns the MongoDB client for the payments database.
///
/// Cloning shares the underlying connection pool. The client lives until
/// [`PaymentDatabase::shutdown`] is called or every clone is dropped.
#[derive(Clone, Debug)]
pub struct PaymentDatabase {
    client: Client,
    db: Database,
    settings: DatabaseSettings,
    hosts: String,
}

impl PaymentDatabase {
    /// Builds the client without contacting the server.
    pub async fn open(settings: DatabaseSettings) -> Result<Self, DatabaseError> {
        let mut options = ClientOptions::parse(&settings.uri)
            .await
            .map_err(DatabaseError::InvalidUri)?;

        if let Some(app_name) = &settings.app_name {
            options.app_name = Some(app_name.clone());
        }
        if let Some(timeout) = settings.server_selection_timeout {
            options.server_selection_timeout = Some(timeout);
        }

        let hosts = options
            .hosts
            .iter()
            .map(|host| host.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let client = Client::with_options(options).map_err(DatabaseError::InvalidUri)?;
        let db = client.database(DATABASE_NAME);

        tracing::debug!(hosts = %hosts, database = DATABASE_NAME, "MongoDB client created");

        Ok(Self {
            client,
            db,
            settings,
            hosts,
        })
    }

    /// Opens the client and pings the server so an unreachable target fails
    /// here rather than on the first payment read or write.
    pub async fn connect(settings: DatabaseSettings) -> Result<Self, DatabaseError> {
        let database = Self::open(settings).await?;
        database.ping().await?;
        Ok(database)
    }

    /// Reads [`DatabaseSettings::from_env`] and connects.
    pub async fn from_env() -> Result<Self, DatabaseError> {
        let settings = DatabaseSettings::from_env()?;
        Self::connect(settings).await
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        match self.db.run_command(doc! { "ping": 1 }).await {
            Ok(_) => {
                tracing::info!(hosts = %self.hosts, database = DATABASE_NAME, "Connected to MongoDB");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(hosts = %self.hosts, error = %e, "MongoDB ping failed");
                Err(DatabaseError::Unreachable {
                    hosts: self.hosts.clone(),
                    source: e,
                })
            }
        }
    }

    /// Handle to `payment_app.payments`.
    pub fn payments(&self) -> Collection<Document> {
        self.payments_as()
    }

    pub fn payments_as<T>(&self) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.db.collection(COLLECTION_NAME)
    }

    pub fn namespace(&self) -> Namespace {
        self.payments().namespace()
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn settings(&self) -> &DatabaseSettings {
        &self.settings
    }

    /// Comma-separated seed list, safe to log.
    pub fn hosts(&self) -> &str {
        &self.hosts
    }

    /// Waits for outstanding sessions and cursors to drop, then closes the pool.
    pub async fn shutdown(self) {
        let Self { client, hosts, .. } = self;
        client.shutdown().await;
        tracing::info!(hosts = %hosts, "MongoDB client shut down");
    }
}
