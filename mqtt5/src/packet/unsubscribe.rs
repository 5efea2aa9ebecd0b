//! UNSUBSCRIBE packet.

use serde::{Deserialize, Serialize};

use super::ControlPacket;
use crate::command::Command;
use crate::error::{PacketError, Result};
use crate::types::UserProperties;

/// Fields a caller may set on an UNSUBSCRIBE.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct UnsubscribeOptions {
    /// Topic filters to remove. Required, at least one.
    pub topics: Vec<String>,
    pub message_id: u16,
    pub properties: Option<UserProperties>,
}

impl UnsubscribeOptions {
    /// Create options for a list of topic filters.
    pub fn new<I, S>(topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            topics: topics.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Set message identifier.
    pub fn with_message_id(mut self, message_id: u16) -> Self {
        self.message_id = message_id;
        self
    }

    /// Set user properties.
    pub fn with_properties(mut self, properties: UserProperties) -> Self {
        self.properties = Some(properties);
        self
    }
}

/// UNSUBSCRIBE packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Unsubscribe {
    topics: Vec<String>,
    message_id: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<UserProperties>,
}

impl Unsubscribe {
    /// Create an UNSUBSCRIBE packet.
    pub fn new(opts: UnsubscribeOptions) -> Result<Self> {
        if opts.topics.is_empty() {
            tracing::debug!(cmd = %Self::CMD, "rejected packet: no topics");
            return Err(PacketError::InvalidTopics);
        }
        Ok(Self {
            topics: opts.topics,
            message_id: opts.message_id,
            properties: opts.properties,
        })
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn message_id(&self) -> u16 {
        self.message_id
    }

    pub fn properties(&self) -> Option<&UserProperties> {
        self.properties.as_ref()
    }
}

impl ControlPacket for Unsubscribe {
    const CMD: Command = Command::Unsubscribe;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsubscribe() {
        let packet =
            Unsubscribe::new(UnsubscribeOptions::new(["a/b", "c/#"]).with_message_id(3)).unwrap();
        assert_eq!(packet.cmd(), Command::Unsubscribe);
        assert_eq!(packet.topics(), ["a/b", "c/#"]);
        assert_eq!(packet.message_id(), 3);
    }

    #[test]
    fn test_unsubscribe_requires_topics() {
        let err = Unsubscribe::new(UnsubscribeOptions::default()).unwrap_err();
        assert!(matches!(err, PacketError::InvalidTopics));
        assert_eq!(err.to_string(), "invalid topics");
    }
}
