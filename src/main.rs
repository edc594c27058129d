use anyhow::Result;
use tracing::{error, info};

use topic_tutorial::{
    app_config::AppConfig,
    broker_config::BrokerConfig,
    infra::iggy::connect_iggy,
    init_tracing, MessageBroker, TutorialConsumer, TutorialProducer,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("🚀 Starting topic tutorial");

    let config = AppConfig::load()?;

    if let Err(e) = run(&config).await {
        error!("Tutorial crashed: {e:#}");
        return Err(e);
    }

    Ok(())
}

async fn run(config: &AppConfig) -> Result<()> {
    // =====================================================
    // Dedicated Iggy clients (one per component)
    // =====================================================
    let consumer_client = connect_iggy(config).await?;
    info!("✓ Consumer connected to Iggy");

    let producer_client = connect_iggy(config).await?;
    info!("✓ Producer connected to Iggy");

    // =====================================================
    // Producer side first: it creates the stream and topic
    // =====================================================
    let broker = MessageBroker::connect(producer_client, BrokerConfig::tutorial()).await?;

    // =====================================================
    // Consumer listening before anything is sent
    // =====================================================
    let listener = TutorialConsumer::new(consumer_client, BrokerConfig::tutorial())
        .await?
        .start();

    // =====================================================
    // Send the tutorial messages
    // =====================================================
    TutorialProducer::tutorial(broker, config.send_interval)
        .start()
        .await?;

    info!("All messages sent, still listening");

    listener.await??;
    Ok(())
}
