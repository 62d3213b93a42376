//! Run with: cargo run --bin inspect

use payment_service::PaymentDatabase;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    println!("Connecting to MongoDB...");
    let db = PaymentDatabase::from_env().await?;
    println!("✓ Connected to {}", db.hosts());

    println!("\nCollections in {}:", db.database().name());
    let collections = db.database().list_collection_names().await?;
    for name in collections {
        println!("  - {}", name);
    }

    let count = db.payments().estimated_document_count().await?;
    println!("\n{}: ~{} documents", db.namespace(), count);

    db.shutdown().await;
    Ok(())
}
