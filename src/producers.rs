use anyhow::Result;
use chrono::Utc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

use crate::broker_config::MESSAGE_KEY;
use crate::message_broker::Publisher;
use crate::models::{outbound_messages, TopicMessage};

/// =============================
/// Tutorial Producer
/// =============================
pub struct TutorialProducer<P> {
    publisher: P,
    messages: Vec<TopicMessage>,
    interval: Duration,
}

impl<P: Publisher> TutorialProducer<P> {
    pub fn new(publisher: P, key: &str, bodies: Vec<String>, interval: Duration) -> Self {
        let messages = bodies
            .into_iter()
            .map(|body| TopicMessage::new(key, body))
            .collect();

        Self {
            publisher,
            messages,
            interval,
        }
    }

    /// The four tutorial messages, stamped once with the current time.
    pub fn tutorial(publisher: P, interval: Duration) -> Self {
        Self::new(publisher, MESSAGE_KEY, outbound_messages(Utc::now()), interval)
    }

    pub fn messages(&self) -> &[TopicMessage] {
        &self.messages
    }

    /// Publishes every message in order, pausing `interval` before each one.
    /// The first failed publish ends the run.
    pub async fn start(&self) -> Result<()> {
        info!("Sending a total of {} messages.", self.messages.len());

        for message in &self.messages {
            sleep(self.interval).await;
            info!("Sending message: {}", message.value);
            self.publisher.publish(message.clone()).await?;
        }

        Ok(())
    }
}
