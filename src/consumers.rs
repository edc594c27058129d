use anyhow::Result;
use futures_util::{Stream, StreamExt};
use iggy::clients::client::IggyClient;
use iggy::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::broker_config::{BrokerConfig, CONSUMER_INIT_RETRIES, CONSUMER_INIT_RETRY_INTERVAL};
use crate::models::TopicMessage;

type MessageHandler = Box<dyn FnMut(&TopicMessage) + Send>;

/// Default callback: log the key and value, nothing else.
pub fn log_message(message: &TopicMessage) {
    info!(
        "Message received. key: {}, value: {}",
        message.key, message.value
    );
}

/// Turns a polled Iggy message into a `TopicMessage`.
/// Payloads that are not our JSON envelope are kept as plain text under an empty key.
pub fn decode(message: &IggyMessage) -> TopicMessage {
    match TopicMessage::from_payload(&message.payload) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!("Foreign payload, logging it as plain text: {e:#}");
            TopicMessage::new("", String::from_utf8_lossy(&message.payload))
        }
    }
}

/// Feeds every message of `messages` to `on_message`, in order.
/// Ends when the stream does, or on the first poll error.
pub async fn listen<S, F>(mut messages: S, mut on_message: F) -> Result<()>
where
    S: Stream<Item = Result<TopicMessage>> + Unpin,
    F: FnMut(&TopicMessage),
{
    while let Some(message) = messages.next().await {
        on_message(&message?);
    }

    Ok(())
}

/// =============================
/// Tutorial Consumer
/// =============================
pub struct TutorialConsumer {
    consumer: IggyConsumer,
    handler: MessageHandler,
}

impl TutorialConsumer {
    pub async fn new(client: Arc<IggyClient>, config: BrokerConfig) -> Result<Self> {
        let mut consumer = client
            .consumer_group(config.group, config.stream, config.topic)?
            .create_consumer_group_if_not_exists()
            .auto_join_consumer_group()
            .auto_commit(AutoCommit::IntervalOrWhen(
                IggyDuration::new_from_secs(1),
                AutoCommitWhen::ConsumingAllMessages,
            ))
            .poll_interval(IggyDuration::new(Duration::from_millis(50)))
            // the producer may not have created the stream and topic yet
            .init_retries(
                CONSUMER_INIT_RETRIES,
                IggyDuration::new(CONSUMER_INIT_RETRY_INTERVAL),
            )
            .build();

        consumer.init().await?;
        info!("✓ Tutorial consumer initialized");

        Ok(Self {
            consumer,
            handler: Box::new(log_message),
        })
    }

    pub fn with_handler(mut self, handler: impl FnMut(&TopicMessage) + Send + 'static) -> Self {
        self.handler = Box::new(handler);
        self
    }

    /// Polls on its own task for as long as the process lives.
    pub fn start(self) -> JoinHandle<Result<()>> {
        let Self { consumer, handler } = self;

        tokio::spawn(async move {
            info!("→ Tutorial consumer started");

            let messages = consumer.map(|polled| {
                polled
                    .map(|received| decode(&received.message))
                    .map_err(anyhow::Error::from)
            });

            listen(messages, handler).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message_broker::Publisher;
    use crate::producers::TutorialProducer;
    use futures_util::stream;
    use std::str::FromStr;
    use tokio::sync::mpsc;

    struct ChannelPublisher(mpsc::UnboundedSender<TopicMessage>);

    impl Publisher for ChannelPublisher {
        async fn publish(&self, message: TopicMessage) -> Result<()> {
            self.0.send(message)?;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_callback_runs_once_per_message_in_order() {
        let delivered = vec![
            Ok(TopicMessage::new("k", "one")),
            Ok(TopicMessage::new("k", "two")),
            Ok(TopicMessage::new("other", "three")),
        ];

        let mut received = Vec::new();
        listen(stream::iter(delivered), |m| received.push(m.clone()))
            .await
            .unwrap();

        assert_eq!(
            received,
            vec![
                TopicMessage::new("k", "one"),
                TopicMessage::new("k", "two"),
                TopicMessage::new("other", "three"),
            ]
        );
    }

    #[test]
    fn test_decode_envelope() {
        let message =
            IggyMessage::from_str(r#"{"key":"tutorial-2-key","value":"First message"}"#).unwrap();

        assert_eq!(
            decode(&message),
            TopicMessage::new("tutorial-2-key", "First message")
        );
    }

    #[test]
    fn test_decode_plain_text_payload() {
        let message = IggyMessage::from_str("hello from iggy cli").unwrap();

        assert_eq!(decode(&message), TopicMessage::new("", "hello from iggy cli"));
    }

    #[tokio::test]
    async fn test_foreign_payload_does_not_stop_listening() {
        let delivered: Vec<Result<TopicMessage>> = vec![
            Ok(decode(&IggyMessage::from_str("hello from iggy cli").unwrap())),
            Ok(decode(
                &IggyMessage::from_str(r#"{"key":"k","value":"after"}"#).unwrap(),
            )),
        ];

        let mut received = Vec::new();
        listen(stream::iter(delivered), |m| received.push(m.clone()))
            .await
            .unwrap();

        assert_eq!(
            received,
            vec![
                TopicMessage::new("", "hello from iggy cli"),
                TopicMessage::new("k", "after"),
            ]
        );
    }

    #[tokio::test]
    async fn test_poll_error_stops_listening() {
        let delivered = vec![
            Ok(TopicMessage::new("k", "one")),
            Err(anyhow::anyhow!("connection reset")),
            Ok(TopicMessage::new("k", "never seen")),
        ];

        let mut calls = 0;
        let result = listen(stream::iter(delivered), |_| calls += 1).await;

        assert_eq!(result.unwrap_err().to_string(), "connection reset");
        assert_eq!(calls, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_through_channel() {
        let (tx, rx) = mpsc::unbounded_channel();
        let messages = Box::pin(stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|m| (Ok(m), rx))
        }));

        let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();
        let listener = tokio::spawn(listen(messages, move |m: &TopicMessage| {
            log_message(m);
            let _ = seen_tx.send(m.clone());
        }));

        let producer = TutorialProducer::tutorial(ChannelPublisher(tx), Duration::from_secs(5));
        let expected = producer.messages().to_vec();
        producer.start().await.unwrap();
        drop(producer);

        listener.await.unwrap().unwrap();

        let mut seen = Vec::new();
        while let Some(m) = seen_rx.recv().await {
            seen.push(m);
        }
        assert_eq!(seen.len(), 4);
        assert_eq!(seen, expected);
    }
}
