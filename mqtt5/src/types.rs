//! Shared value types referenced by several packet variants.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::encoding::base64_payload;
use crate::error::{PacketError, Result};

/// Quality of Service level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum QoS {
    /// At most once delivery (fire and forget).
    #[default]
    AtMostOnce = 0,
    /// At least once delivery (acknowledged delivery).
    AtLeastOnce = 1,
    /// Exactly once delivery (assured delivery).
    ExactlyOnce = 2,
}

impl TryFrom<u8> for QoS {
    type Error = PacketError;

    fn try_from(v: u8) -> Result<Self> {
        match v {
            0 => Ok(QoS::AtMostOnce),
            1 => Ok(QoS::AtLeastOnce),
            2 => Ok(QoS::ExactlyOnce),
            _ => Err(PacketError::InvalidQoS),
        }
    }
}

impl From<QoS> for u8 {
    fn from(qos: QoS) -> Self {
        qos as u8
    }
}

/// Retain handling subscription option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum RetainHandling {
    /// Send retained messages at the time of the subscribe.
    #[default]
    SendOnSubscribe = 0,
    /// Send retained messages only if the subscription does not already exist.
    SendOnSubscribeIfNew = 1,
    /// Never send retained messages for this subscription.
    DoNotSend = 2,
}

impl TryFrom<u8> for RetainHandling {
    type Error = PacketError;

    fn try_from(v: u8) -> Result<Self> {
        match v {
            0 => Ok(RetainHandling::SendOnSubscribe),
            1 => Ok(RetainHandling::SendOnSubscribeIfNew),
            2 => Ok(RetainHandling::DoNotSend),
            _ => Err(PacketError::InvalidRetainHandling),
        }
    }
}

impl From<RetainHandling> for u8 {
    fn from(rh: RetainHandling) -> Self {
        rh as u8
    }
}

/// Value of a user-defined property: one string or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Single(String),
    Multiple(Vec<String>),
}

impl PropertyValue {
    /// Returns the value(s) as a slice regardless of shape.
    pub fn as_slice(&self) -> &[String] {
        match self {
            PropertyValue::Single(v) => std::slice::from_ref(v),
            PropertyValue::Multiple(vs) => vs,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::Single(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::Single(v)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(vs: Vec<String>) -> Self {
        PropertyValue::Multiple(vs)
    }
}

/// User-defined properties keyed by property name.
pub type UserProperties = BTreeMap<String, PropertyValue>;

/// Fields accepted when building a [`TopicWithPayload`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TopicWithPayloadOptions {
    pub topic: String,
    #[serde(with = "base64_payload")]
    pub payload: Bytes,
    pub qos: QoS,
    pub retain: bool,
    pub properties: Option<UserProperties>,
}

/// Topic, payload, QoS and retain flag bundled together.
///
/// Used as the will message of a CONNECT and as the body of a PUBLISH.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TopicWithPayloadOptions")]
pub struct TopicWithPayload {
    topic: String,
    #[serde(with = "base64_payload")]
    payload: Bytes,
    qos: QoS,
    retain: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<UserProperties>,
}

impl TopicWithPayload {
    /// Create a new bundle with QoS 0 and no retain flag.
    pub fn new(topic: impl Into<String>, payload: impl Into<Bytes>) -> Result<Self> {
        Self::from_options(TopicWithPayloadOptions {
            topic: topic.into(),
            payload: payload.into(),
            ..Default::default()
        })
    }

    /// Build from an options value; fails if the topic is empty.
    pub fn from_options(opts: TopicWithPayloadOptions) -> Result<Self> {
        if opts.topic.is_empty() {
            tracing::debug!("rejected topic with payload: empty topic");
            return Err(PacketError::InvalidTopic);
        }
        Ok(Self {
            topic: opts.topic,
            payload: opts.payload,
            qos: opts.qos,
            retain: opts.retain,
            properties: opts.properties,
        })
    }

    // Caller guarantees a non-empty topic.
    pub(crate) fn from_message_parts(topic: String, payload: Bytes, qos: QoS, retain: bool) -> Self {
        Self {
            topic,
            payload,
            qos,
            retain,
            properties: None,
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

    /// Set user properties.
    pub fn with_properties(mut self, properties: UserProperties) -> Self {
        self.properties = Some(properties);
        self
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

    pub fn properties(&self) -> Option<&UserProperties> {
        self.properties.as_ref()
    }
}

impl TryFrom<TopicWithPayloadOptions> for TopicWithPayload {
    type Error = PacketError;

    fn try_from(opts: TopicWithPayloadOptions) -> Result<Self> {
        Self::from_options(opts)
    }
}

impl From<TopicWithPayload> for TopicWithPayloadOptions {
    fn from(msg: TopicWithPayload) -> Self {
        Self {
            topic: msg.topic,
            payload: msg.payload,
            qos: msg.qos,
            retain: msg.retain,
            properties: msg.properties,
        }
    }
}

/// Fields accepted when building a [`Subscription`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SubscriptionOptions {
    pub topic: String,
    pub qos: QoS,
    /// No Local.
    pub nl: Option<bool>,
    /// Retain As Published.
    pub rap: Option<bool>,
    /// Retain Handling.
    pub rh: Option<RetainHandling>,
    pub properties: Option<UserProperties>,
}

/// One entry of a SUBSCRIBE packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SubscriptionOptions")]
pub struct Subscription {
    topic: String,
    qos: QoS,
    #[serde(skip_serializing_if = "Option::is_none")]
    nl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rh: Option<RetainHandling>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<UserProperties>,
}

impl Subscription {
    /// Create a subscription entry for a topic filter.
    pub fn new(topic: impl Into<String>, qos: QoS) -> Result<Self> {
        Self::from_options(SubscriptionOptions {
            topic: topic.into(),
            qos,
            ..Default::default()
        })
    }

    /// Build from an options value; fails if the topic is empty.
    pub fn from_options(opts: SubscriptionOptions) -> Result<Self> {
        if opts.topic.is_empty() {
            tracing::debug!(qos = ?opts.qos, "rejected subscription: empty topic");
            return Err(PacketError::InvalidTopic);
        }
        Ok(Self {
            topic: opts.topic,
            qos: opts.qos,
            nl: opts.nl,
            rap: opts.rap,
            rh: opts.rh,
            properties: opts.properties,
        })
    }

    /// Set the no-local flag.
    pub fn with_no_local(mut self, nl: bool) -> Self {
        self.nl = Some(nl);
        self
    }

    /// Set the retain-as-published flag.
    pub fn with_retain_as_published(mut self, rap: bool) -> Self {
        self.rap = Some(rap);
        self
    }

    /// Set retain handling.
    pub fn with_retain_handling(mut self, rh: RetainHandling) -> Self {
        self.rh = Some(rh);
        self
    }

    /// Set user properties.
    pub fn with_properties(mut self, properties: UserProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn qos(&self) -> QoS {
        self.qos
    }

    pub fn no_local(&self) -> Option<bool> {
        self.nl
    }

    pub fn retain_as_published(&self) -> Option<bool> {
        self.rap
    }

    pub fn retain_handling(&self) -> Option<RetainHandling> {
        self.rh
    }

    pub fn properties(&self) -> Option<&UserProperties> {
        self.properties.as_ref()
    }
}

impl TryFrom<SubscriptionOptions> for Subscription {
    type Error = PacketError;

    fn try_from(opts: SubscriptionOptions) -> Result<Self> {
        Self::from_options(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qos_from_u8() {
        assert_eq!(QoS::try_from(0u8).unwrap(), QoS::AtMostOnce);
        assert_eq!(QoS::try_from(1u8).unwrap(), QoS::AtLeastOnce);
        assert_eq!(QoS::try_from(2u8).unwrap(), QoS::ExactlyOnce);
        assert!(matches!(QoS::try_from(3u8), Err(PacketError::InvalidQoS)));
        assert_eq!(u8::from(QoS::ExactlyOnce), 2);
    }

    #[test]
    fn test_retain_handling_from_u8() {
        assert_eq!(RetainHandling::try_from(1u8).unwrap(), RetainHandling::SendOnSubscribeIfNew);
        assert!(matches!(
            RetainHandling::try_from(3u8),
            Err(PacketError::InvalidRetainHandling)
        ));
    }

    #[test]
    fn test_property_value_shapes() {
        let single: PropertyValue = serde_json::from_str(r#""a""#).unwrap();
        assert_eq!(single, PropertyValue::from("a"));
        assert_eq!(single.as_slice(), ["a".to_string()]);

        let multi: PropertyValue = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(multi.as_slice().len(), 2);
        assert_eq!(serde_json::to_string(&multi).unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn test_topic_with_payload() {
        let will = TopicWithPayload::new("clients/gone", "bye")
            .unwrap()
            .with_qos(QoS::AtLeastOnce)
            .with_retain(true);
        assert_eq!(will.topic(), "clients/gone");
        assert_eq!(will.payload().as_ref(), b"bye");
        assert_eq!(will.qos(), QoS::AtLeastOnce);
        assert!(will.retain());
        assert!(will.properties().is_none());
    }

    #[test]
    fn test_topic_with_payload_empty_topic() {
        let err = TopicWithPayload::new("", "bye").unwrap_err();
        assert!(matches!(err, PacketError::InvalidTopic));
    }

    #[test]
    fn test_topic_with_payload_json() {
        let will = TopicWithPayload::new("t", "hi").unwrap();
        let json = serde_json::to_value(&will).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"topic": "t", "payload": "aGk=", "qos": 0, "retain": false})
        );

        let back: TopicWithPayload = serde_json::from_value(json).unwrap();
        assert_eq!(back, will);

        let bad = serde_json::from_str::<TopicWithPayload>(r#"{"payload":"aGk="}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_subscription_requires_topic() {
        for qos in [QoS::AtMostOnce, QoS::AtLeastOnce, QoS::ExactlyOnce] {
            assert!(matches!(
                Subscription::new("", qos),
                Err(PacketError::InvalidTopic)
            ));
        }
        assert!(matches!(
            Subscription::from_options(SubscriptionOptions::default()),
            Err(PacketError::InvalidTopic)
        ));
    }

    #[test]
    fn test_subscription_flags() {
        let sub = Subscription::new("a/+/c", QoS::ExactlyOnce)
            .unwrap()
            .with_no_local(true)
            .with_retain_as_published(false)
            .with_retain_handling(RetainHandling::DoNotSend);
        assert_eq!(sub.topic(), "a/+/c");
        assert_eq!(sub.qos(), QoS::ExactlyOnce);
        assert_eq!(sub.no_local(), Some(true));
        assert_eq!(sub.retain_as_published(), Some(false));
        assert_eq!(sub.retain_handling(), Some(RetainHandling::DoNotSend));

        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"topic": "a/+/c", "qos": 2, "nl": true, "rap": false, "rh": 2})
        );
    }

    #[test]
    fn test_subscription_json_rejects_bad_values() {
        assert!(serde_json::from_str::<Subscription>(r#"{"topic":"t","qos":3}"#).is_err());
        assert!(serde_json::from_str::<Subscription>(r#"{"topic":"t","rh":5}"#).is_err());
        assert!(serde_json::from_str::<Subscription>(r#"{"topic":"t","bogus":1}"#).is_err());
        assert!(serde_json::from_str::<Subscription>(r#"{"topic":""}"#).is_err());

        let sub: Subscription = serde_json::from_str(r#"{"topic":"t","qos":1}"#).unwrap();
        assert_eq!(sub.qos(), QoS::AtLeastOnce);
    }
}
