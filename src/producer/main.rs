use anyhow::Result;
use tracing::{error, info};

use topic_tutorial::{
    app_config::AppConfig, broker_config::BrokerConfig, infra::iggy::connect_iggy, init_tracing,
    MessageBroker, TutorialProducer,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::load()?;

    let client = connect_iggy(&config).await?;
    info!("✓ Producer connected to Iggy");

    let broker = MessageBroker::connect(client, BrokerConfig::tutorial()).await?;

    TutorialProducer::tutorial(broker, config.send_interval)
        .start()
        .await
        .map_err(|e| {
            error!("Producer failed: {e:#}");
            e
        })
}
