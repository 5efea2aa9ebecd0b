//! DISCONNECT packet.

use serde::{Deserialize, Serialize};

use super::ControlPacket;
use crate::command::Command;
use crate::types::UserProperties;

/// Fields a caller may set on a DISCONNECT.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DisconnectOptions {
    /// Disconnect reason code; 0 is a normal disconnection.
    pub reason_code: u8,
    pub properties: Option<UserProperties>,
}

impl DisconnectOptions {
    /// Create options with a reason code.
    pub fn new(reason_code: u8) -> Self {
        Self {
            reason_code,
            properties: None,
        }
    }

    /// Set user properties.
    pub fn with_properties(mut self, properties: UserProperties) -> Self {
        self.properties = Some(properties);
        self
    }
}

/// DISCONNECT packet. The reason code range is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Disconnect {
    reason_code: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<UserProperties>,
}

impl Disconnect {
    /// Create a DISCONNECT packet.
    pub fn new(opts: DisconnectOptions) -> Self {
        Self {
            reason_code: opts.reason_code,
            properties: opts.properties,
        }
    }

    pub fn reason_code(&self) -> u8 {
        self.reason_code
    }

    pub fn properties(&self) -> Option<&UserProperties> {
        self.properties.as_ref()
    }
}

impl ControlPacket for Disconnect {
    const CMD: Command = Command::Disconnect;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PropertyValue;

    #[test]
    fn test_disconnect_defaults() {
        let packet = Disconnect::new(DisconnectOptions::default());
        assert_eq!(packet.cmd(), Command::Disconnect);
        assert_eq!(packet.reason_code(), 0);
        assert!(packet.properties().is_none());
    }

    #[test]
    fn test_disconnect_with_properties() {
        let mut props = UserProperties::new();
        props.insert("reason".to_string(), PropertyValue::from("shutdown"));
        let packet = Disconnect::new(DisconnectOptions::new(0x8b).with_properties(props));
        assert_eq!(packet.reason_code(), 0x8b);
        assert_eq!(
            packet.properties().and_then(|p| p.get("reason")),
            Some(&PropertyValue::from("shutdown"))
        );
    }
}
