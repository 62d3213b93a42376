use payment_service::{telemetry, PaymentDatabase};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let db = PaymentDatabase::from_env().await?;

    let namespace = db.namespace();
    tracing::info!(
        database = %namespace.db,
        collection = %namespace.coll,
        "Payments collection ready"
    );

    db.shutdown().await;
    Ok(())
}
