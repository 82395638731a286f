//! Audience selectors
//!
//! A selector picks the devices receiving a notification. Selectors can be
//! combined with [and], [or] and [not].

use crate::error::Error;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Every device of the app. Also accepted as the device types of a push.
pub fn all() -> Value {
    Value::from("all")
}

pub fn alias(alias: &str) -> Value {
    selector("alias", Value::from(alias))
}

pub fn tag(tag: &str) -> Value {
    selector("tag", Value::from(tag))
}

/// A segment defined in the Airship dashboard, by its id.
pub fn segment(segment: &str) -> Value {
    selector("segment", Value::from(segment))
}

/// An iOS device token, 64 hexadecimal characters.
pub fn device_token(token: &str) -> Result<Value, Error> {
    if token.len() != 64 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidArgument(format!("Invalid iOS device token: {}", token)));
    }

    Ok(selector("device_token", Value::from(token)))
}

/// An Android APID.
pub fn apid(apid: &str) -> Result<Value, Error> {
    uuid_selector("apid", apid)
}

pub fn ios_channel(channel: &str) -> Result<Value, Error> {
    uuid_selector("ios_channel", channel)
}

pub fn android_channel(channel: &str) -> Result<Value, Error> {
    uuid_selector("android_channel", channel)
}

/// Devices matching every one of the selectors.
pub fn and(selectors: Vec<Value>) -> Value {
    selector("and", Value::Array(selectors))
}

/// Devices matching at least one of the selectors.
pub fn or(selectors: Vec<Value>) -> Value {
    selector("or", Value::Array(selectors))
}

/// Devices not matching the selector.
pub fn not(selector_value: Value) -> Value {
    selector("not", selector_value)
}

fn selector(key: &str, value: Value) -> Value {
    let mut selector = Map::new();
    selector.insert(key.to_string(), value);

    Value::Object(selector)
}

// sent in the lowercase hyphenated form
fn uuid_selector(key: &str, id: &str) -> Result<Value, Error> {
    let uuid = Uuid::parse_str(id).map_err(|e| Error::InvalidArgument(format!("Invalid {}: {} ({})", key, id, e)))?;

    Ok(selector(key, Value::from(uuid.hyphenated().to_string())))
}
