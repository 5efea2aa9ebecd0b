//! Field gates for JSON ingest.
//!
//! These run on the raw object before serde sees it, so a variant's
//! required-field check comes first and an invalid nested entry fails with
//! its own error rather than a serde message. Type mismatches are left for
//! serde to report.

use serde_json::{Map, Value};

use crate::command::Command;
use crate::error::{PacketError, Result};

/// Checks required and range-limited fields of a packet object (without `cmd`).
pub(super) fn check_fields(cmd: Command, fields: &Map<String, Value>) -> Result<()> {
    match cmd {
        Command::Connect => {
            if let Some(Value::Object(will)) = fields.get("will") {
                check_topic(will)?;
                check_range(will.get("qos"), PacketError::InvalidQoS)?;
            }
        }
        Command::Publish => {
            check_topic(fields)?;
            check_range(fields.get("qos"), PacketError::InvalidQoS)?;
        }
        Command::Subscribe => {
            let entries = required_array(fields, "subscriptions", PacketError::InvalidSubscriptions)?;
            for entry in entries.iter().filter_map(Value::as_object) {
                check_topic(entry)?;
                check_range(entry.get("qos"), PacketError::InvalidQoS)?;
                check_range(entry.get("rh"), PacketError::InvalidRetainHandling)?;
            }
        }
        Command::Unsubscribe => {
            required_array(fields, "topics", PacketError::InvalidTopics)?;
        }
        Command::UnsubAck => {
            if matches!(fields.get("messageId"), None | Some(Value::Null)) {
                return Err(PacketError::InvalidMessageId);
            }
        }
        Command::SubAck | Command::PingReq | Command::PingResp | Command::Disconnect => {}
    }
    Ok(())
}

fn check_topic(fields: &Map<String, Value>) -> Result<()> {
    match fields.get("topic") {
        None | Some(Value::Null) => Err(PacketError::InvalidTopic),
        Some(Value::String(topic)) if topic.is_empty() => Err(PacketError::InvalidTopic),
        _ => Ok(()),
    }
}

/// Missing, null and empty all fail with `err`. A non-array is returned as
/// empty so serde reports the type mismatch.
fn required_array<'a>(
    fields: &'a Map<String, Value>,
    key: &str,
    err: PacketError,
) -> Result<&'a [Value]> {
    match fields.get(key) {
        None | Some(Value::Null) => Err(err),
        Some(Value::Array(items)) if items.is_empty() => Err(err),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Ok(&[]),
    }
}

/// Integers outside 0..=2 fail with `err`.
fn check_range(value: Option<&Value>, err: PacketError) -> Result<()> {
    if let Some(Value::Number(n)) = value {
        let integer = n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from));
        if integer.is_some_and(|v| !(0..=2).contains(&v)) {
            return Err(err);
        }
    }
    Ok(())
}
