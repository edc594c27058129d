use anyhow::Result;
use tracing::{error, info};

use topic_tutorial::{
    app_config::AppConfig, broker_config::BrokerConfig, infra::iggy::connect_iggy, init_tracing,
    TutorialConsumer,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("🚀 Starting consumer service");

    let config = AppConfig::load()?;

    let client = connect_iggy(&config).await?;
    info!("✓ Consumer connected to Iggy");

    let consumer = TutorialConsumer::new(client, BrokerConfig::tutorial()).await?;

    consumer.start().await?.map_err(|e| {
        error!("Consumer crashed: {e:#}");
        e
    })
}
