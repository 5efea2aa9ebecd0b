//! SUBSCRIBE packet.

use serde::{Deserialize, Serialize};

use super::ControlPacket;
use crate::command::Command;
use crate::error::{PacketError, Result};
use crate::types::{Subscription, UserProperties};

/// Fields a caller may set on a SUBSCRIBE.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SubscribeOptions {
    /// Requested subscriptions. Required, at least one.
    pub subscriptions: Vec<Subscription>,
    pub message_id: u16,
    pub properties: Option<UserProperties>,
}

impl SubscribeOptions {
    /// Create options for a list of subscriptions.
    pub fn new(subscriptions: impl IntoIterator<Item = Subscription>) -> Self {
        Self {
            subscriptions: subscriptions.into_iter().collect(),
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

/// SUBSCRIBE packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscribe {
    subscriptions: Vec<Subscription>,
    message_id: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<UserProperties>,
}

impl Subscribe {
    /// Create a SUBSCRIBE packet.
    ///
    /// Entries are already valid by construction; only their presence is checked.
    pub fn new(opts: SubscribeOptions) -> Result<Self> {
        if opts.subscriptions.is_empty() {
            tracing::debug!(cmd = %Self::CMD, "rejected packet: no subscriptions");
            return Err(PacketError::InvalidSubscriptions);
        }
        Ok(Self {
            subscriptions: opts.subscriptions,
            message_id: opts.message_id,
            properties: opts.properties,
        })
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn message_id(&self) -> u16 {
        self.message_id
    }

    pub fn properties(&self) -> Option<&UserProperties> {
        self.properties.as_ref()
    }
}

impl ControlPacket for Subscribe {
    const CMD: Command = Command::Subscribe;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QoS;

    #[test]
    fn test_subscribe_single() {
        let sub = Subscription::new("topic", QoS::AtMostOnce).unwrap();
        let packet = Subscribe::new(SubscribeOptions::new([sub]).with_message_id(7)).unwrap();
        assert_eq!(packet.cmd(), Command::Subscribe);
        assert_eq!(packet.subscriptions().len(), 1);
        assert_eq!(packet.subscriptions()[0].topic(), "topic");
        assert_eq!(packet.message_id(), 7);
    }

    #[test]
    fn test_subscribe_requires_subscriptions() {
        let err = Subscribe::new(SubscribeOptions::default()).unwrap_err();
        assert!(matches!(err, PacketError::InvalidSubscriptions));

        let err = Subscribe::new(SubscribeOptions::new(Vec::new())).unwrap_err();
        assert_eq!(err.to_string(), "invalid subscriptions");
    }

    #[test]
    fn test_subscribe_keeps_order() {
        let subs = ["a", "b", "c"]
            .into_iter()
            .map(|t| Subscription::new(t, QoS::AtLeastOnce).unwrap());
        let packet = Subscribe::new(SubscribeOptions::new(subs)).unwrap();
        let topics: Vec<&str> = packet.subscriptions().iter().map(|s| s.topic()).collect();
        assert_eq!(topics, ["a", "b", "c"]);
        assert_eq!(packet.message_id(), 0);
    }
}
