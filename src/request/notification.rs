//! Helpers building the notification content, platform overrides, rich
//! messages and schedules
//!
//! Every helper validates its input before anything is sent and returns a
//! JSON value ready to be put into a request.

mod badge;
mod device_type;

pub use self::badge::Badge;
pub use self::device_type::DeviceType;

use crate::error::Error;
use chrono::DateTime;
use erased_serde::Serialize;
use serde_json::{Map, Value};

/// A notification with the same text on every platform.
///
/// ```rust
/// # use airship::request::notification::simple_alert;
/// # use serde_json::json;
/// assert_eq!(json!({"alert": "Hi"}), simple_alert("Hi").unwrap());
/// assert!(simple_alert("").is_err());
/// ```
pub fn simple_alert(text: &str) -> Result<Value, Error> {
    if text.is_empty() {
        return Err(Error::InvalidArgument(String::from("An alert text is required.")));
    }

    let mut alert = Map::new();
    alert.insert("alert".to_string(), Value::from(text));

    Ok(Value::Object(alert))
}

/// A notification with a default alert and platform specific overrides from
/// [ios](fn.ios.html) and [android](fn.android.html). At least one of them
/// must be given.
pub fn notification(alert: Option<&str>, ios: Option<Value>, android: Option<Value>) -> Result<Value, Error> {
    if alert.is_none() && ios.is_none() && android.is_none() {
        return Err(Error::InvalidArgument(String::from(
            "A notification needs an alert or at least one platform override.",
        )));
    }

    let mut notification = Map::new();

    if let Some(alert) = alert {
        notification.insert("alert".to_string(), Value::from(alert));
    }
    if let Some(ios) = ios {
        notification.insert("ios".to_string(), ios);
    }
    if let Some(android) = android {
        notification.insert("android".to_string(), android);
    }

    Ok(Value::Object(notification))
}

/// The iOS override of a notification. Only the given fields end up in the
/// override, `content_available` only when it is `true`.
///
/// The `badge` is an integer, `"auto"` or a signed number as a string
/// (`"+1"`, `"-1"`), see [Badge](enum.Badge.html). Anything else is an
/// `InvalidArgument`.
///
/// ```rust
/// # use airship::request::notification::ios;
/// # use serde_json::json;
/// assert_eq!(json!({"badge": "auto"}), ios(None, Some(json!("auto")), None, false, None).unwrap());
/// assert!(ios(None, Some(json!("45")), None, false, None).is_err());
/// ```
pub fn ios(
    alert: Option<&str>,
    badge: Option<Value>,
    sound: Option<&str>,
    content_available: bool,
    extra: Option<&dyn Serialize>,
) -> Result<Value, Error> {
    let mut payload = Map::new();

    if let Some(alert) = alert {
        payload.insert("alert".to_string(), Value::from(alert));
    }
    if let Some(badge) = badge {
        let badge = Badge::try_from(badge)?;
        payload.insert("badge".to_string(), serde_json::to_value(badge)?);
    }
    if let Some(sound) = sound {
        payload.insert("sound".to_string(), Value::from(sound));
    }
    if content_available {
        payload.insert("content_available".to_string(), Value::Bool(true));
    }
    if let Some(extra) = extra {
        payload.insert("extra".to_string(), serde_json::to_value(extra)?);
    }

    Ok(Value::Object(payload))
}

/// The Android override of a notification. Only the given fields end up in
/// the override, `delay_while_idle` only when it is `true`. `time_to_live` is
/// either a number of seconds or an absolute timestamp string.
pub fn android(
    alert: Option<&str>,
    collapse_key: Option<&str>,
    time_to_live: Option<Value>,
    delay_while_idle: bool,
    extra: Option<&dyn Serialize>,
) -> Result<Value, Error> {
    let mut payload = Map::new();

    if let Some(alert) = alert {
        payload.insert("alert".to_string(), Value::from(alert));
    }
    if let Some(collapse_key) = collapse_key {
        payload.insert("collapse_key".to_string(), Value::from(collapse_key));
    }
    if let Some(time_to_live) = time_to_live {
        if !(time_to_live.is_u64() || time_to_live.is_string()) {
            return Err(Error::InvalidArgument(format!(
                "Invalid Android time to live: {}",
                time_to_live
            )));
        }
        payload.insert("time_to_live".to_string(), time_to_live);
    }
    if delay_while_idle {
        payload.insert("delay_while_idle".to_string(), Value::Bool(true));
    }
    if let Some(extra) = extra {
        payload.insert("extra".to_string(), serde_json::to_value(extra)?);
    }

    Ok(Value::Object(payload))
}

/// Validates a list of device types. Order and duplicates are kept.
///
/// ```rust
/// # use airship::request::notification::{device_types, DeviceType};
/// assert_eq!(
///     vec![DeviceType::Ios, DeviceType::Android],
///     device_types(&["ios", "android"]).unwrap()
/// );
/// assert!(device_types(&["ios", "symbian"]).is_err());
/// ```
pub fn device_types(types: &[&str]) -> Result<Vec<DeviceType>, Error> {
    types.iter().map(|t| t.parse()).collect()
}

/// A rich message for the in-app message center. `expiry` is a number of
/// seconds or an absolute timestamp string.
pub fn rich_message(
    title: &str,
    body: &str,
    content_type: &str,
    content_encoding: &str,
    expiry: impl Into<Value>,
    extra: Option<&dyn Serialize>,
    icons: Option<&dyn Serialize>,
) -> Result<Value, Error> {
    let mut message = Map::new();

    message.insert("title".to_string(), Value::from(title));
    message.insert("body".to_string(), Value::from(body));
    message.insert("content_type".to_string(), Value::from(content_type));
    message.insert("content_encoding".to_string(), Value::from(content_encoding));
    message.insert("expiry".to_string(), expiry.into());

    if let Some(extra) = extra {
        message.insert("extra".to_string(), serde_json::to_value(extra)?);
    }
    if let Some(icons) = icons {
        message.insert("icons".to_string(), serde_json::to_value(icons)?);
    }

    Ok(Value::Object(message))
}

/// A schedule descriptor for the given UNIX timestamp, as UTC time without
/// an offset.
///
/// ```rust
/// # use airship::request::notification::scheduled_time;
/// # use serde_json::json;
/// assert_eq!(
///     json!({"scheduled_time": "2015-04-01T12:00:00"}),
///     scheduled_time(1_427_889_600).unwrap()
/// );
/// ```
pub fn scheduled_time(timestamp: i64) -> Result<Value, Error> {
    let time = DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| Error::InvalidArgument(format!("Timestamp out of range: {}", timestamp)))?;

    let mut schedule = Map::new();
    schedule.insert(
        "scheduled_time".to_string(),
        Value::from(time.format("%Y-%m-%dT%H:%M:%S").to_string()),
    );

    Ok(Value::Object(schedule))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_empty_notification() {
        assert!(matches!(simple_alert(""), Err(Error::InvalidArgument(_))));
        assert!(matches!(notification(None, None, None), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_simple_alert() {
        assert_eq!(json!({"alert": "Hi"}), simple_alert("Hi").unwrap());
    }

    #[test]
    fn test_notification_with_overrides() {
        let ios = ios(None, Some(json!(1)), Some("default"), false, None).unwrap();
        let android = android(Some("Hello Android"), None, None, false, None).unwrap();

        assert_eq!(
            json!({
                "alert": "Hello",
                "ios": {"badge": 1, "sound": "default"},
                "android": {"alert": "Hello Android"}
            }),
            notification(Some("Hello"), Some(ios), Some(android)).unwrap()
        );
    }

    #[test]
    fn test_ios() {
        let mut extra = BTreeMap::new();
        extra.insert("foo", "bar");

        assert_eq!(
            json!({"alert": "Hello", "badge": 100, "extra": {"foo": "bar"}}),
            ios(Some("Hello"), Some(json!(100)), None, false, Some(&extra)).unwrap()
        );

        let nested = json!({"foo": {"bar": "baz"}});
        assert_eq!(
            json!({"badge": "+1", "content_available": true, "extra": {"foo": {"bar": "baz"}}}),
            ios(None, Some(json!("+1")), None, true, Some(&nested)).unwrap()
        );

        assert_eq!(json!({"badge": "auto"}), ios(None, Some(json!("auto")), None, false, None).unwrap());
    }

    #[test]
    fn test_ios_with_custom_struct_extra() {
        #[derive(serde::Serialize)]
        struct Offer {
            offer_id: &'static str,
        }

        let extra = Offer { offer_id: "608f1f6c" };

        assert_eq!(
            json!({"sound": "cat.caf", "extra": {"offer_id": "608f1f6c"}}),
            ios(None, None, Some("cat.caf"), false, Some(&extra)).unwrap()
        );
    }

    #[test]
    fn test_invalid_badge_bad_autobadge() {
        assert!(matches!(
            ios(None, Some(json!("+NaN")), None, false, None),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_invalid_badge_bad_string() {
        assert!(matches!(
            ios(None, Some(json!("NaN")), None, false, None),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_invalid_badge_integer_as_string() {
        assert!(matches!(
            ios(None, Some(json!("45")), None, false, None),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_invalid_badge_type() {
        assert!(matches!(
            ios(None, Some(json!(true)), None, false, None),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_android() {
        let extra = json!({"url": "https://example.com"});

        assert_eq!(
            json!({
                "alert": "Hello",
                "collapse_key": "news",
                "time_to_live": 3600,
                "delay_while_idle": true,
                "extra": {"url": "https://example.com"}
            }),
            android(Some("Hello"), Some("news"), Some(json!(3600)), true, Some(&extra)).unwrap()
        );

        assert_eq!(json!({}), android(None, None, None, false, None).unwrap());
        assert!(android(None, None, Some(json!(-5)), false, None).is_err());
    }

    #[test]
    fn test_device_types() {
        assert_eq!(vec![DeviceType::Ios], device_types(&["ios"]).unwrap());
        assert_eq!(
            json!(["ios", "android"]),
            Value::from(device_types(&["ios", "android"]).unwrap())
        );
        assert_eq!(
            vec![DeviceType::Wns, DeviceType::Wns],
            device_types(&["wns", "wns"]).unwrap()
        );
        assert!(device_types(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_device_type() {
        assert!(matches!(device_types(&["ios", "symbian"]), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_rich_message() {
        let extra = json!({"offer_id": "608f1f6c-8860-c617-a803-b187b491568e"});
        let icons = json!({"list_icon": "http://cdn.example.com/message.png"});

        assert_eq!(
            json!({
                "title": "This is a title",
                "body": "<html><body><h1>This is the messages</h1></body></html>",
                "content_type": "text/html",
                "content_encoding": "utf-8",
                "expiry": 0,
                "extra": {"offer_id": "608f1f6c-8860-c617-a803-b187b491568e"},
                "icons": {"list_icon": "http://cdn.example.com/message.png"}
            }),
            rich_message(
                "This is a title",
                "<html><body><h1>This is the messages</h1></body></html>",
                "text/html",
                "utf-8",
                0,
                Some(&extra),
                Some(&icons),
            )
            .unwrap()
        );
    }

    #[test]
    fn test_rich_message_without_extras() {
        let message = rich_message("t", "b", "text/plain", "utf8", "2015-04-01T12:00:00", None, None).unwrap();

        assert_eq!(
            r#"{"title":"t","body":"b","content_type":"text/plain","content_encoding":"utf8","expiry":"2015-04-01T12:00:00"}"#,
            message.to_string()
        );
    }

    #[test]
    fn test_scheduled_time() {
        assert_eq!(
            json!({"scheduled_time": "1970-01-01T00:00:00"}),
            scheduled_time(0).unwrap()
        );
        assert_eq!(
            json!({"scheduled_time": "2015-05-01T19:57:23"}),
            scheduled_time(1_430_510_243).unwrap()
        );
        assert!(matches!(scheduled_time(i64::MAX), Err(Error::InvalidArgument(_))));
    }
}
