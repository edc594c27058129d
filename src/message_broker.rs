use anyhow::{Context, Result};
use iggy::clients::client::IggyClient;
use iggy::prelude::*;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

use crate::broker_config::BrokerConfig;
use crate::models::TopicMessage;

/// Anything the producer can hand a message to
pub trait Publisher {
    fn publish(&self, message: TopicMessage) -> impl Future<Output = Result<()>>;
}

// Message Broker
pub struct MessageBroker {
    producer: IggyProducer,
}

impl MessageBroker {
    pub async fn connect(client: Arc<IggyClient>, config: BrokerConfig) -> Result<Self> {
        info!(
            "Initializing MessageBroker for {}/{}",
            config.stream, config.topic
        );

        let partitioning = Partitioning::messages_key_str(config.key)
            .context("Failed to build key partitioning")?;

        let mut producer = client
            .producer(config.stream, config.topic)
            .context("Failed to create producer")?
            .direct(
                DirectConfig::builder()
                    .batch_length(1)
                    .linger_time(IggyDuration::new(std::time::Duration::from_millis(1)))
                    .build(),
            )
            .partitioning(partitioning)
            .create_stream_if_not_exists()
            .create_topic_if_not_exists(
                config.partitions,
                None,
                IggyExpiry::ServerDefault,
                MaxTopicSize::ServerDefault,
            )
            .build();

        producer.init().await?;
        info!("✓ MessageBroker ready");

        Ok(Self { producer })
    }
}

impl Publisher for MessageBroker {
    async fn publish(&self, message: TopicMessage) -> Result<()> {
        let payload = message.to_payload()?;
        debug!("Publishing payload size: {} bytes", payload.len());

        let msg = IggyMessage::from_str(&payload)
            .context("Failed to build IggyMessage from string payload")?;

        self.producer
            .send(vec![msg])
            .await
            .context("Failed to publish message")?;
        Ok(())
    }
}
