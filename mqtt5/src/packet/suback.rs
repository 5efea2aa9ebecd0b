//! SUBACK packet.

use serde::{Deserialize, Serialize};

use super::ControlPacket;
use crate::command::Command;
use crate::types::UserProperties;

/// Fields a caller may set on a SUBACK.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SubAckOptions {
    /// Granted QoS or failure reason code, one per requested subscription.
    pub granted: Vec<u8>,
    pub message_id: u16,
    pub properties: Option<UserProperties>,
}

impl SubAckOptions {
    /// Create options acknowledging `message_id`.
    pub fn new(message_id: u16, granted: impl Into<Vec<u8>>) -> Self {
        Self {
            granted: granted.into(),
            message_id,
            properties: None,
        }
    }

    /// Set user properties.
    pub fn with_properties(mut self, properties: UserProperties) -> Self {
        self.properties = Some(properties);
        self
    }
}

/// SUBACK packet.
///
/// The number of granted entries is not checked against the originating
/// SUBSCRIBE; that is a session concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubAck {
    granted: Vec<u8>,
    message_id: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<UserProperties>,
}

impl SubAck {
    /// Create a SUBACK packet.
    pub fn new(opts: SubAckOptions) -> Self {
        Self {
            granted: opts.granted,
            message_id: opts.message_id,
            properties: opts.properties,
        }
    }

    pub fn granted(&self) -> &[u8] {
        &self.granted
    }

    pub fn message_id(&self) -> u16 {
        self.message_id
    }

    pub fn properties(&self) -> Option<&UserProperties> {
        self.properties.as_ref()
    }
}

impl ControlPacket for SubAck {
    const CMD: Command = Command::SubAck;
}
