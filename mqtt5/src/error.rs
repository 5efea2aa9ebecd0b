//! Error types for mqtt5 packet construction.

use thiserror::Error;

/// Result type alias for mqtt5.
pub type Result<T> = std::result::Result<T, PacketError>;

/// Error raised when a packet, or one of its parts, fails validation.
///
/// Every rejection in this crate surfaces as this one type; the variant only
/// selects which message is rendered.
#[derive(Debug, Error)]
pub enum PacketError {
    /// Command identifier is not one of the nine known packet kinds.
    #[error("invalid cmd")]
    InvalidCmd,

    /// Topic is missing or empty.
    #[error("invalid topic")]
    InvalidTopic,

    /// SUBSCRIBE without any subscription entry.
    #[error("invalid subscriptions")]
    InvalidSubscriptions,

    /// UNSUBSCRIBE without any topic.
    #[error("invalid topics")]
    InvalidTopics,

    /// Required message identifier is missing.
    #[error("invalid messageId")]
    InvalidMessageId,

    /// QoS outside 0..=2.
    #[error("invalid qos")]
    InvalidQoS,

    /// Retain handling outside 0..=2.
    #[error("invalid retain handling")]
    InvalidRetainHandling,

    /// Payload text cannot be represented in (or decoded from) the selected encoding.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// Malformed packet object (wrong field types, unknown keys, bad JSON).
    #[error("invalid packet: {0}")]
    InvalidPacket(String),
}

impl From<serde_json::Error> for PacketError {
    fn from(e: serde_json::Error) -> Self {
        PacketError::InvalidPacket(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(PacketError::InvalidCmd.to_string(), "invalid cmd");
        assert_eq!(PacketError::InvalidTopic.to_string(), "invalid topic");
        assert_eq!(
            PacketError::InvalidSubscriptions.to_string(),
            "invalid subscriptions"
        );
        assert_eq!(PacketError::InvalidTopics.to_string(), "invalid topics");
        assert_eq!(PacketError::InvalidMessageId.to_string(), "invalid messageId");

        let err = PacketError::InvalidPayload("odd length".to_string());
        assert!(err.to_string().contains("odd length"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u8>("nope").unwrap_err();
        let err = PacketError::from(json_err);
        assert!(matches!(err, PacketError::InvalidPacket(_)));
        assert!(err.to_string().starts_with("invalid packet: "));
    }
}
