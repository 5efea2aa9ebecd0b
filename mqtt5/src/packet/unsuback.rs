//! UNSUBACK packet.

use serde::{Deserialize, Serialize};

use super::ControlPacket;
use crate::command::Command;
use crate::error::{PacketError, Result};
use crate::types::UserProperties;

/// Fields a caller may set on an UNSUBACK.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct UnsubAckOptions {
    /// Identifier of the acknowledged UNSUBSCRIBE. Required.
    pub message_id: Option<u16>,
    pub properties: Option<UserProperties>,
}

impl UnsubAckOptions {
    /// Create options acknowledging `message_id`.
    pub fn new(message_id: u16) -> Self {
        Self {
            message_id: Some(message_id),
            properties: None,
        }
    }

    /// Set user properties.
    pub fn with_properties(mut self, properties: UserProperties) -> Self {
        self.properties = Some(properties);
        self
    }
}

/// UNSUBACK packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsubAck {
    message_id: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<UserProperties>,
}

impl UnsubAck {
    /// Create an UNSUBACK packet. Fails if no message identifier is given.
    pub fn new(opts: UnsubAckOptions) -> Result<Self> {
        let Some(message_id) = opts.message_id else {
            tracing::debug!(cmd = %Self::CMD, "rejected packet: missing message id");
            return Err(PacketError::InvalidMessageId);
        };
        Ok(Self {
            message_id,
            properties: opts.properties,
        })
    }

    pub fn message_id(&self) -> u16 {
        self.message_id
    }

    pub fn properties(&self) -> Option<&UserProperties> {
        self.properties.as_ref()
    }
}

impl ControlPacket for UnsubAck {
    const CMD: Command = Command::UnsubAck;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsuback() {
        let packet = UnsubAck::new(UnsubAckOptions::new(0)).unwrap();
        assert_eq!(packet.cmd(), Command::UnsubAck);
        assert_eq!(packet.message_id(), 0);
    }

    #[test]
    fn test_unsuback_requires_message_id() {
        let err = UnsubAck::new(UnsubAckOptions::default()).unwrap_err();
        assert!(matches!(err, PacketError::InvalidMessageId));
        assert_eq!(err.to_string(), "invalid messageId");
    }
}
