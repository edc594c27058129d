pub mod models;
pub mod message_broker;
pub mod producers;
pub mod consumers;
pub mod infra;
pub mod app_config;
pub mod broker_config;

pub use models::TopicMessage;
pub use message_broker::{MessageBroker, Publisher};
pub use producers::TutorialProducer;
pub use consumers::TutorialConsumer;

/// Installs the fmt subscriber, `info` unless `RUST_LOG` says otherwise.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}
