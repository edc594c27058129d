use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordinal labels of the tutorial messages, in send order
pub const MESSAGE_LABELS: [&str; 4] = ["First", "Second", "Third", "Forth"];

/// A keyed text message as it travels through the topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicMessage {
    pub key: String,
    pub value: String,
}

impl TopicMessage {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn to_payload(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize topic message")
    }

    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        serde_json::from_slice(payload).context("Failed to deserialize topic message")
    }
}

/// RFC 1123 date-time, e.g. `Tue, 3 Jun 2008 11:05:30 GMT`
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%a, %-d %b %Y %H:%M:%S GMT").to_string()
}

/// The four tutorial bodies, all stamped with `now`
pub fn outbound_messages(now: DateTime<Utc>) -> Vec<String> {
    let timestamp = format_timestamp(&now);
    MESSAGE_LABELS
        .iter()
        .map(|label| format!("{label} message at {timestamp}"))
        .collect()
}
