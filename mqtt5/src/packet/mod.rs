//! MQTT 5.0 control packets.
//!
//! Each variant lives in its own module and is built from an `*Options`
//! value. [`Packet`] is the sum type over all of them and is what the JSON
//! interchange reads and writes.

mod connect;
mod disconnect;
mod ingest;
mod ping;
mod publish;
mod suback;
mod subscribe;
mod unsuback;
mod unsubscribe;

pub use connect::{Connect, ConnectOptions, PROTOCOL_ID, PROTOCOL_VERSION};
pub use disconnect::{Disconnect, DisconnectOptions};
pub use ping::{PingReq, PingResp};
pub use publish::{Publish, PublishOptions};
pub use suback::{SubAck, SubAckOptions};
pub use subscribe::{Subscribe, SubscribeOptions};
pub use unsuback::{UnsubAck, UnsubAckOptions};
pub use unsubscribe::{Unsubscribe, UnsubscribeOptions};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::command::Command;
use crate::error::{PacketError, Result};
use crate::types::UserProperties;

/// Contract shared by every packet variant: it is tagged with one command.
pub trait ControlPacket {
    /// Command identifier of this packet kind.
    const CMD: Command;

    /// Returns the command identifier.
    fn cmd(&self) -> Command {
        Self::CMD
    }
}

/// Any MQTT 5.0 control packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "cmd", rename_all = "lowercase")]
pub enum Packet {
    Connect(Connect),
    Publish(Publish),
    Subscribe(Subscribe),
    SubAck(SubAck),
    PingReq(PingReq),
    PingResp(PingResp),
    Disconnect(Disconnect),
    Unsubscribe(Unsubscribe),
    UnsubAck(UnsubAck),
}

/// Accepts only an empty object.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NoFields {}

impl Packet {
    /// Returns the command identifier of the carried packet.
    pub fn cmd(&self) -> Command {
        match self {
            Packet::Connect(p) => p.cmd(),
            Packet::Publish(p) => p.cmd(),
            Packet::Subscribe(p) => p.cmd(),
            Packet::SubAck(p) => p.cmd(),
            Packet::PingReq(p) => p.cmd(),
            Packet::PingResp(p) => p.cmd(),
            Packet::Disconnect(p) => p.cmd(),
            Packet::Unsubscribe(p) => p.cmd(),
            Packet::UnsubAck(p) => p.cmd(),
        }
    }

    /// Returns the message identifier, for packets that carry one.
    pub fn message_id(&self) -> Option<u16> {
        match self {
            Packet::Publish(p) => p.message_id(),
            Packet::Subscribe(p) => Some(p.message_id()),
            Packet::SubAck(p) => Some(p.message_id()),
            Packet::Unsubscribe(p) => Some(p.message_id()),
            Packet::UnsubAck(p) => Some(p.message_id()),
            Packet::Connect(_) | Packet::PingReq(_) | Packet::PingResp(_) | Packet::Disconnect(_) => {
                None
            }
        }
    }

    /// Returns the user properties, for packets that carry them.
    pub fn properties(&self) -> Option<&UserProperties> {
        match self {
            Packet::Connect(p) => p.properties(),
            Packet::Publish(p) => p.properties(),
            Packet::Subscribe(p) => p.properties(),
            Packet::SubAck(p) => p.properties(),
            Packet::Disconnect(p) => p.properties(),
            Packet::Unsubscribe(p) => p.properties(),
            Packet::UnsubAck(p) => p.properties(),
            Packet::PingReq(_) | Packet::PingResp(_) => None,
        }
    }

    /// Serialize to a JSON object keyed by the camelCase field names.
    pub fn to_json_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialize to JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse JSON text into a validated packet.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    /// Build a validated packet from a JSON object carrying a `cmd` tag.
    ///
    /// The `cmd` is checked first, then the variant's required fields on the
    /// raw object; the remaining keys become the variant's options and go
    /// through the variant's constructor.
    pub fn from_json_value(value: Value) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(PacketError::InvalidPacket("expected a JSON object".to_string()));
        };

        let cmd = match fields.remove("cmd") {
            Some(Value::String(cmd)) => Command::parse(&cmd)?,
            other => {
                tracing::debug!(cmd = ?other, "rejected packet: missing or non-string cmd");
                return Err(PacketError::InvalidCmd);
            }
        };

        if cmd == Command::Connect {
            take_protocol_fields(&mut fields)?;
        }
        ingest::check_fields(cmd, &fields).inspect_err(|e| {
            tracing::debug!(cmd = %cmd, error = %e, "rejected packet");
        })?;
        let rest = Value::Object(fields);

        match cmd {
            Command::Connect => Ok(Packet::Connect(Connect::new(serde_json::from_value(rest)?))),
            Command::Publish => Publish::new(serde_json::from_value(rest)?).map(Packet::Publish),
            Command::Subscribe => {
                Subscribe::new(serde_json::from_value(rest)?).map(Packet::Subscribe)
            }
            Command::SubAck => Ok(Packet::SubAck(SubAck::new(serde_json::from_value(rest)?))),
            Command::PingReq => {
                serde_json::from_value::<NoFields>(rest)?;
                Ok(Packet::PingReq(PingReq::new()))
            }
            Command::PingResp => {
                serde_json::from_value::<NoFields>(rest)?;
                Ok(Packet::PingResp(PingResp::new()))
            }
            Command::Disconnect => {
                Ok(Packet::Disconnect(Disconnect::new(serde_json::from_value(rest)?)))
            }
            Command::Unsubscribe => {
                Unsubscribe::new(serde_json::from_value(rest)?).map(Packet::Unsubscribe)
            }
            Command::UnsubAck => UnsubAck::new(serde_json::from_value(rest)?).map(Packet::UnsubAck),
        }
    }
}

/// Removes `protocolId`/`protocolVersion` from a CONNECT object.
///
/// Both are forced on construction, so they may only repeat the constant.
fn take_protocol_fields(fields: &mut Map<String, Value>) -> Result<()> {
    if let Some(id) = fields.remove("protocolId") {
        if id.as_str() != Some(PROTOCOL_ID) {
            return Err(PacketError::InvalidPacket(format!(
                "unsupported protocolId: {}",
                id
            )));
        }
    }
    if let Some(version) = fields.remove("protocolVersion") {
        if version.as_u64() != Some(u64::from(PROTOCOL_VERSION)) {
            return Err(PacketError::InvalidPacket(format!(
                "unsupported protocolVersion: {}",
                version
            )));
        }
    }
    Ok(())
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Packet {
                fn from(p: $variant) -> Self {
                    Packet::$variant(p)
                }
            }
        )*
    };
}

impl_from_variant!(
    Connect,
    Publish,
    Subscribe,
    SubAck,
    PingReq,
    PingResp,
    Disconnect,
    Unsubscribe,
    UnsubAck,
);
