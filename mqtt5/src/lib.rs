//! Validated MQTT 5.0 control packet model.
//!
//! This crate defines the in-memory shape of MQTT 5.0 control packets and
//! guarantees that every packet value that exists is structurally
//! well-formed:
//!
//! - **CONNECT**: protocol name and level are always `MQTT` / `5`
//! - **PUBLISH**: topic must not be empty
//! - **SUBSCRIBE**: at least one subscription entry, each with a topic
//! - **UNSUBSCRIBE**: at least one topic filter
//! - **UNSUBACK**: message identifier is required
//!
//! Wire encoding, transport and session state are out of scope. Packets can
//! be exchanged with an external codec as camelCase JSON via
//! [`Packet::to_json`] and [`Packet::from_json`].
//!
//! ## Example
//!
//! ```rust
//! use giztoy_mqtt5::{
//!     Command, ControlPacket, Packet, PacketError, Publish, PublishOptions, QoS,
//! };
//!
//! let packet = Publish::new(PublishOptions::new("sensors/temp", "21.5").with_qos(QoS::AtLeastOnce))?;
//! assert_eq!(packet.cmd(), Command::Publish);
//!
//! // Missing topic is rejected before a value exists.
//! let err = Publish::new(PublishOptions::default()).unwrap_err();
//! assert_eq!(err.to_string(), "invalid topic");
//!
//! // JSON interchange.
//! let packet = Packet::from_json(r#"{"cmd":"unsubscribe","topics":["a/b"],"messageId":3}"#)?;
//! assert_eq!(packet.cmd(), Command::Unsubscribe);
//! assert_eq!(packet.message_id(), Some(3));
//! # Ok::<(), PacketError>(())
//! ```

mod command;
mod encoding;
mod error;
mod packet;
mod types;

pub use command::Command;
pub use encoding::PayloadEncoding;
pub use error::{PacketError, Result};
pub use packet::{
    Connect, ConnectOptions, ControlPacket, Disconnect, DisconnectOptions, PROTOCOL_ID,
    PROTOCOL_VERSION, Packet, PingReq, PingResp, Publish, PublishOptions, SubAck, SubAckOptions,
    Subscribe, SubscribeOptions, UnsubAck, UnsubAckOptions, Unsubscribe, UnsubscribeOptions,
};
pub use types::{
    PropertyValue, QoS, RetainHandling, Subscription, SubscriptionOptions, TopicWithPayload,
    TopicWithPayloadOptions, UserProperties,
};
