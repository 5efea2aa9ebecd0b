//! CONNECT packet.

use serde::{Deserialize, Serialize};

use super::ControlPacket;
use crate::command::Command;
use crate::types::{TopicWithPayload, UserProperties};

/// Protocol name carried by every CONNECT.
pub const PROTOCOL_ID: &str = "MQTT";

/// Protocol level for MQTT 5.0.
pub const PROTOCOL_VERSION: u8 = 5;

/// Fields a caller may set on a CONNECT.
///
/// `cmd`, `protocolId` and `protocolVersion` are not part of this set; they
/// are always forced by [`Connect::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ConnectOptions {
    /// Start a clean session (true) or resume a persistent one (false).
    pub clean: bool,
    /// Keep alive interval in seconds.
    pub keepalive: u16,
    /// Client ID. May be empty.
    pub client_id: String,
    pub will: Option<TopicWithPayload>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub properties: Option<UserProperties>,
}

impl ConnectOptions {
    /// Create options for a client ID.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            ..Default::default()
        }
    }

    /// Set clean session flag.
    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Set keep alive interval.
    pub fn with_keepalive(mut self, seconds: u16) -> Self {
        self.keepalive = seconds;
        self
    }

    /// Set credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the will message.
    pub fn with_will(mut self, will: TopicWithPayload) -> Self {
        self.will = Some(will);
        self
    }

    /// Set user properties.
    pub fn with_properties(mut self, properties: UserProperties) -> Self {
        self.properties = Some(properties);
        self
    }
}

/// CONNECT packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connect {
    protocol_id: &'static str,
    protocol_version: u8,
    clean: bool,
    keepalive: u16,
    client_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    will: Option<TopicWithPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<UserProperties>,
}

impl Connect {
    /// Create a CONNECT packet. There is no required field, so this cannot fail.
    pub fn new(opts: ConnectOptions) -> Self {
        Self {
            protocol_id: PROTOCOL_ID,
            protocol_version: PROTOCOL_VERSION,
            clean: opts.clean,
            keepalive: opts.keepalive,
            client_id: opts.client_id,
            will: opts.will,
            username: opts.username,
            password: opts.password,
            properties: opts.properties,
        }
    }

    pub fn protocol_id(&self) -> &'static str {
        self.protocol_id
    }

    pub fn protocol_version(&self) -> u8 {
        self.protocol_version
    }

    pub fn clean(&self) -> bool {
        self.clean
    }

    pub fn keepalive(&self) -> u16 {
        self.keepalive
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn will(&self) -> Option<&TopicWithPayload> {
        self.will.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn properties(&self) -> Option<&UserProperties> {
        self.properties.as_ref()
    }
}

impl ControlPacket for Connect {
    const CMD: Command = Command::Connect;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QoS;

    #[test]
    fn test_connect_defaults() {
        let packet = Connect::new(ConnectOptions::new("client1"));
        assert_eq!(packet.cmd(), Command::Connect);
        assert_eq!(packet.client_id(), "client1");
        assert!(!packet.clean());
        assert_eq!(packet.keepalive(), 0);
        assert_eq!(packet.protocol_id(), "MQTT");
        assert_eq!(packet.protocol_version(), 5);
        assert!(packet.will().is_none());
        assert!(packet.username().is_none());
        assert!(packet.password().is_none());
    }

    #[test]
    fn test_connect_empty_client_id() {
        let packet = Connect::new(ConnectOptions::default());
        assert_eq!(packet.client_id(), "");
    }

    #[test]
    fn test_connect_with_options() {
        let will = TopicWithPayload::new("status/client3", "offline")
            .unwrap()
            .with_qos(QoS::AtLeastOnce)
            .with_retain(true);
        let packet = Connect::new(
            ConnectOptions::new("client3")
                .with_keepalive(10)
                .with_clean(true)
                .with_credentials("admin", "secret")
                .with_will(will.clone()),
        );
        assert_eq!(packet.keepalive(), 10);
        assert!(packet.clean());
        assert_eq!(packet.username(), Some("admin"));
        assert_eq!(packet.password(), Some("secret"));
        assert_eq!(packet.will(), Some(&will));
    }
}
