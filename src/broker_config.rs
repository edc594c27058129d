use std::time::Duration;

// Iggy TCP listener of a local server
pub const BROKER_ADDRESS: &str = "127.0.0.1:8090";

// Consumer group shared by every tutorial consumer
pub const GROUP_ID: &str = "tutorial-2-group-id";

// Stream holding the tutorial topic
pub const STREAM_NAME: &str = "tutorials";

// Topic we produce into and read from
pub const TOPIC_NAME: &str = "tutorial-2-kafka-template";

// Key for every message we produce
pub const MESSAGE_KEY: &str = "tutorial-2-key";

pub const PARTITIONS: u32 = 1;

// Iggy's out-of-the-box root user
pub const DEFAULT_USERNAME: &str = "iggy";
pub const DEFAULT_PASSWORD: &str = "iggy";

// Pause before each produced message, just for easier reading of the logs
pub const SEND_INTERVAL: Duration = Duration::from_secs(5);

// A consumer started before any producer waits this long for the topic to appear
pub const CONSUMER_INIT_RETRIES: u32 = 30;
pub const CONSUMER_INIT_RETRY_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct BrokerConfig {
    pub stream: &'static str,
    pub topic: &'static str,
    pub group: &'static str,
    pub key: &'static str,
    pub partitions: u32,
}

impl BrokerConfig {
    pub fn tutorial() -> Self {
        Self {
            stream: STREAM_NAME,
            topic: TOPIC_NAME,
            group: GROUP_ID,
            key: MESSAGE_KEY,
            partitions: PARTITIONS,
        }
    }
}
