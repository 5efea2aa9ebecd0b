//! Command identifiers: the closed set of packet kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PacketError, Result};

/// MQTT 5.0 control packet kind.
///
/// Every packet carries exactly one of these as its `cmd` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Connect,
    Publish,
    Subscribe,
    SubAck,
    PingReq,
    PingResp,
    Disconnect,
    Unsubscribe,
    UnsubAck,
}

impl Command {
    /// All known command identifiers.
    pub const ALL: [Command; 9] = [
        Command::Connect,
        Command::Publish,
        Command::Subscribe,
        Command::SubAck,
        Command::PingReq,
        Command::PingResp,
        Command::Disconnect,
        Command::Unsubscribe,
        Command::UnsubAck,
    ];

    /// Returns the wire tag (e.g. `"suback"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Connect => "connect",
            Command::Publish => "publish",
            Command::Subscribe => "subscribe",
            Command::SubAck => "suback",
            Command::PingReq => "pingreq",
            Command::PingResp => "pingresp",
            Command::Disconnect => "disconnect",
            Command::Unsubscribe => "unsubscribe",
            Command::UnsubAck => "unsuback",
        }
    }

    /// Validates a raw `cmd` value against the closed set.
    ///
    /// This is the base packet contract: it is the first gate any untyped
    /// packet input goes through.
    pub fn parse(cmd: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == cmd)
            .ok_or_else(|| {
                tracing::debug!(cmd = %cmd, "rejected packet: unknown command");
                PacketError::InvalidCmd
            })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = PacketError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_known() {
        for cmd in Command::ALL {
            assert_eq!(Command::parse(cmd.as_str()).unwrap(), cmd);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        for raw in ["", "CONNECT", "connack", "puback", "auth", "ping"] {
            let err = raw.parse::<Command>().unwrap_err();
            assert!(matches!(err, PacketError::InvalidCmd), "{raw}");
        }
    }

    #[test]
    fn test_serde_matches_as_str() {
        for cmd in Command::ALL {
            let json = serde_json::to_string(&cmd).unwrap();
            assert_eq!(json, format!("\"{}\"", cmd));
        }
    }
}
