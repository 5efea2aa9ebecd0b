//! PUBLISH packet.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::ControlPacket;
use crate::command::Command;
use crate::encoding::{PayloadEncoding, base64_payload};
use crate::error::{PacketError, Result};
use crate::types::{QoS, TopicWithPayload, TopicWithPayloadOptions, UserProperties};

/// Fields a caller may set on a PUBLISH.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PublishOptions {
    /// Topic name. Required, must not be empty.
    pub topic: String,
    #[serde(with = "base64_payload")]
    pub payload: Bytes,
    pub qos: QoS,
    pub retain: bool,
    pub dup: bool,
    pub message_id: Option<u16>,
    pub properties: Option<UserProperties>,
}

impl PublishOptions {
    /// Create options for a topic and payload.
    pub fn new(topic: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
            ..Default::default()
        }
    }

    /// Set QoS level.
    pub fn with_qos(mut self, qos: QoS) -> Self {
        self.qos = qos;
        self
    }

    /// Set retain flag.
    pub fn with_retain(mut self, retain: bool) -> Self {
        self.retain = retain;
        self
    }

    /// Set duplicate delivery flag.
    pub fn with_dup(mut self, dup: bool) -> Self {
        self.dup = dup;
        self
    }

    /// Set message identifier.
    pub fn with_message_id(mut self, message_id: u16) -> Self {
        self.message_id = Some(message_id);
        self
    }

    /// Set user properties.
    pub fn with_properties(mut self, properties: UserProperties) -> Self {
        self.properties = Some(properties);
        self
    }
}

impl From<TopicWithPayload> for PublishOptions {
    fn from(msg: TopicWithPayload) -> Self {
        let msg = TopicWithPayloadOptions::from(msg);
        Self {
            topic: msg.topic,
            payload: msg.payload,
            qos: msg.qos,
            retain: msg.retain,
            properties: msg.properties,
            ..Default::default()
        }
    }
}

/// PUBLISH packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Publish {
    topic: String,
    #[serde(with = "base64_payload")]
    payload: Bytes,
    qos: QoS,
    retain: bool,
    dup: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_id: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<UserProperties>,
}

impl Publish {
    /// Create a PUBLISH packet.
    ///
    /// Fails with [`PacketError::InvalidTopic`] if the topic is empty.
    pub fn new(opts: PublishOptions) -> Result<Self> {
        if opts.topic.is_empty() {
            tracing::debug!(cmd = %Self::CMD, "rejected packet: empty topic");
            return Err(PacketError::InvalidTopic);
        }
        Ok(Self {
            topic: opts.topic,
            payload: opts.payload,
            qos: opts.qos,
            retain: opts.retain,
            dup: opts.dup,
            message_id: opts.message_id,
            properties: opts.properties,
        })
    }

    /// Create a PUBLISH carrying an existing message bundle.
    ///
    /// Goes through [`Publish::new`]; a bundle's topic is never empty, so
    /// this only fails if that invariant is broken.
    pub fn from_message(msg: TopicWithPayload) -> Result<Self> {
        Self::new(PublishOptions::from(msg))
    }

    /// Returns the topic, payload, QoS, retain and properties as a bundle.
    pub fn to_message(&self) -> TopicWithPayload {
        let mut msg = TopicWithPayload::from_message_parts(
            self.topic.clone(),
            self.payload.clone(),
            self.qos,
            self.retain,
        );
        if let Some(properties) = &self.properties {
            msg = msg.with_properties(properties.clone());
        }
        msg
    }

    /// Replace the payload with UTF-8 text.
    pub fn set_payload(&mut self, payload: &str) {
        self.payload = Bytes::copy_from_slice(payload.as_bytes());
    }

    /// Replace the payload with text in the given encoding.
    ///
    /// On error the payload is left unchanged. The topic is not re-validated.
    pub fn set_payload_encoded(&mut self, payload: &str, encoding: PayloadEncoding) -> Result<()> {
        let bytes = encoding.encode(payload).inspect_err(|e| {
            tracing::debug!(%encoding, error = %e, "rejected publish payload");
        })?;
        self.payload = Bytes::from(bytes);
        Ok(())
    }

    /// Decode the payload as text in the given encoding.
    pub fn payload_string(&self, encoding: PayloadEncoding) -> Result<String> {
        encoding.decode(&self.payload)
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn qos(&self) -> QoS {
        self.qos
    }

    pub fn retain(&self) -> bool {
        self.retain
    }

    pub fn dup(&self) -> bool {
        self.dup
    }

    pub fn message_id(&self) -> Option<u16> {
        self.message_id
    }

    pub fn properties(&self) -> Option<&UserProperties> {
        self.properties.as_ref()
    }
}

impl ControlPacket for Publish {
    const CMD: Command = Command::Publish;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_defaults() {
        let packet = Publish::new(PublishOptions::new("topic", Bytes::new())).unwrap();
        assert_eq!(packet.cmd(), Command::Publish);
        assert_eq!(packet.topic(), "topic");
        assert!(packet.payload().is_empty());
        assert_eq!(packet.qos(), QoS::AtMostOnce);
        assert!(!packet.retain());
        assert!(!packet.dup());
        assert_eq!(packet.message_id(), None);
        assert!(packet.properties().is_none());
    }

    #[test]
    fn test_publish_requires_topic() {
        let err = Publish::new(PublishOptions::default()).unwrap_err();
        assert!(matches!(err, PacketError::InvalidTopic));
        assert_eq!(err.to_string(), "invalid topic");
    }

    #[test]
    fn test_publish_set_payload() {
        let mut packet = Publish::new(PublishOptions::new("t", "old")).unwrap();
        packet.set_payload("héllo");
        assert_eq!(packet.payload().as_ref(), "héllo".as_bytes());
        assert_eq!(packet.payload_string(PayloadEncoding::Utf8).unwrap(), "héllo");
    }

    #[test]
    fn test_publish_set_payload_encoded() {
        let mut packet = Publish::new(PublishOptions::new("t", "")).unwrap();
        packet
            .set_payload_encoded("48656c6c6f", PayloadEncoding::Hex)
            .unwrap();
        assert_eq!(packet.payload().as_ref(), b"Hello");
        assert_eq!(packet.payload_string(PayloadEncoding::Hex).unwrap(), "48656c6c6f");
    }

    #[test]
    fn test_publish_set_payload_invalid_keeps_old() {
        let mut packet = Publish::new(PublishOptions::new("t", "keep")).unwrap();
        let err = packet
            .set_payload_encoded("not hex", PayloadEncoding::Hex)
            .unwrap_err();
        assert!(matches!(err, PacketError::InvalidPayload(_)));
        assert_eq!(packet.payload().as_ref(), b"keep");
    }

    #[test]
    fn test_publish_default_payloads_are_independent() {
        let mut a = Publish::new(PublishOptions::new("a", Bytes::new())).unwrap();
        let b = Publish::new(PublishOptions::new("b", Bytes::new())).unwrap();
        a.set_payload("only a");
        assert_eq!(a.payload().as_ref(), b"only a");
        assert!(b.payload().is_empty());
    }

    #[test]
    fn test_publish_message_conversion() {
        let msg = TopicWithPayload::new("sensors/temp", "21.5")
            .unwrap()
            .with_qos(QoS::AtLeastOnce)
            .with_retain(true);
        let packet = Publish::from_message(msg.clone()).unwrap();
        assert_eq!(packet.topic(), "sensors/temp");
        assert_eq!(packet.qos(), QoS::AtLeastOnce);
        assert!(packet.retain());
        assert!(!packet.dup());
        assert_eq!(packet.to_message(), msg);
        assert_eq!(packet, Publish::new(PublishOptions::from(msg)).unwrap());
    }
}
