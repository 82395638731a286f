use crate::error::Error;
use crate::request::payload::{NotificationFragment, PushRequestLike};
use serde_json::Value;
use std::collections::HashMap;

/// A builder for several independent notifications sent in one request.
///
/// Every notification is addressed by a name, which has to be created before
/// any of its fields can be set. The names only exist while building; the
/// request body is the list of notifications in the order the names were
/// created.
///
/// # Example
///
/// ```rust
/// # use airship::request::batch::BatchPushRequest;
/// # use airship::request::payload::PushRequestLike;
/// # use airship::request::audience;
/// # use serde_json::json;
/// # fn main() -> Result<(), airship::Error> {
/// let mut batch = BatchPushRequest::new();
///
/// batch.create_notification("welcome")?;
/// batch
///     .set_audience("welcome", audience::alias("some_alias"))?
///     .set_notification("welcome", json!({"alert": "Welcome!"}))?
///     .push_device_type("welcome", "ios")?;
///
/// assert_eq!(
///     r#"[{"audience":{"alias":"some_alias"},"notification":{"alert":"Welcome!"},"device_types":["ios"]}]"#,
///     batch.to_json_string()?
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchPushRequest {
    notifications: Vec<NotificationFragment>,
    names: HashMap<String, usize>,
}

impl BatchPushRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new notification. Creating a name which already exists
    /// keeps the notification and its fields as they are.
    pub fn create_notification(&mut self, name: &str) -> Result<&mut Self, Error> {
        if name.is_empty() {
            return Err(Error::InvalidArgument(String::from(
                "Notification name must be a non-empty string.",
            )));
        }

        if !self.names.contains_key(name) {
            self.names.insert(name.to_string(), self.notifications.len());
            self.notifications.push(NotificationFragment::default());
        }

        Ok(self)
    }

    /// Set the audience for the given notification.
    pub fn set_audience(&mut self, name: &str, audience: impl Into<Value>) -> Result<&mut Self, Error> {
        self.fragment_mut(name)?.audience = Some(audience.into());
        Ok(self)
    }

    /// Set the notification content for the given notification.
    pub fn set_notification(&mut self, name: &str, notification: impl Into<Value>) -> Result<&mut Self, Error> {
        self.fragment_mut(name)?.notification = Some(notification.into());
        Ok(self)
    }

    /// Replace the device types of the given notification.
    pub fn set_device_types(&mut self, name: &str, device_types: impl Into<Value>) -> Result<&mut Self, Error> {
        self.fragment_mut(name)?.device_types = Some(device_types.into());
        Ok(self)
    }

    /// Add a device type to the given notification. A type already in the
    /// list is not added twice. If the device types were not set, or were set
    /// to something else than a list (such as `"all"`), they are replaced by
    /// a list holding only `device_type`.
    pub fn push_device_type(&mut self, name: &str, device_type: impl Into<Value>) -> Result<&mut Self, Error> {
        let fragment = self.fragment_mut(name)?;
        let device_type = device_type.into();

        match fragment.device_types {
            Some(Value::Array(ref mut types)) => {
                if !types.contains(&device_type) {
                    types.push(device_type);
                }
            }
            _ => fragment.device_types = Some(Value::Array(vec![device_type])),
        }

        Ok(self)
    }

    /// Set the rich message for the given notification.
    pub fn set_message(&mut self, name: &str, message: impl Into<Value>) -> Result<&mut Self, Error> {
        self.fragment_mut(name)?.message = Some(message.into());
        Ok(self)
    }

    /// Set the send options for the given notification.
    pub fn set_options(&mut self, name: &str, options: impl Into<Value>) -> Result<&mut Self, Error> {
        self.fragment_mut(name)?.options = Some(options.into());
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// The fields set so far for the given notification.
    pub fn fragment(&self, name: &str) -> Option<&NotificationFragment> {
        self.names.get(name).map(|&index| &self.notifications[index])
    }

    /// The number of notifications in the batch.
    pub fn count(&self) -> usize {
        self.notifications.len()
    }

    /// Removes every notification so the builder can be used for a new batch.
    pub fn reset(&mut self) {
        self.notifications.clear();
        self.names.clear();
    }

    fn fragment_mut(&mut self, name: &str) -> Result<&mut NotificationFragment, Error> {
        match self.names.get(name) {
            Some(&index) => Ok(&mut self.notifications[index]),
            None => Err(Error::UnknownNotification(name.to_string())),
        }
    }
}

impl PushRequestLike for BatchPushRequest {
    type Payload = Vec<NotificationFragment>;

    fn payload(&self) -> Vec<NotificationFragment> {
        self.notifications.clone()
    }

    fn target_path(&self) -> &'static str {
        "/api/push/"
    }

    fn response_key(&self) -> &'static str {
        "push_ids"
    }

    fn log_message(&self) -> &'static str {
        "Batch push sent successfully."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::audience;
    use serde_json::json;

    fn batch_of_two() -> BatchPushRequest {
        let mut batch = BatchPushRequest::new();

        batch.create_notification("some_notification_identifier_1").unwrap();
        batch
            .set_audience("some_notification_identifier_1", audience::alias("some_alias_1"))
            .unwrap()
            .set_notification("some_notification_identifier_1", json!({"message": "Some message 1"}))
            .unwrap()
            .set_device_types("some_notification_identifier_1", json!(["ios"]))
            .unwrap();

        batch.create_notification("some_notification_identifier_2").unwrap();
        batch
            .set_audience("some_notification_identifier_2", audience::alias("some_alias_2"))
            .unwrap()
            .set_notification("some_notification_identifier_2", json!({"message": "Some message 2"}))
            .unwrap()
            .set_device_types("some_notification_identifier_2", json!(["android"]))
            .unwrap()
            .set_message(
                "some_notification_identifier_2",
                json!({"title": "some title", "body": "some body"}),
            )
            .unwrap()
            .set_options("some_notification_identifier_2", json!({"expiry": "2015-04-01T12:00:00"}))
            .unwrap();

        batch
    }

    #[test]
    fn test_batch_of_two_payload() {
        let batch = batch_of_two();

        assert_eq!(2, batch.count());
        assert_eq!(
            concat!(
                r#"[{"audience":{"alias":"some_alias_1"},"notification":{"message":"Some message 1"},"device_types":["ios"]},"#,
                r#"{"audience":{"alias":"some_alias_2"},"notification":{"message":"Some message 2"},"device_types":["android"],"#,
                r#""message":{"title":"some title","body":"some body"},"options":{"expiry":"2015-04-01T12:00:00"}}]"#,
            ),
            batch.to_json_string().unwrap()
        );
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut batch = BatchPushRequest::new();

        assert!(matches!(batch.create_notification(""), Err(Error::InvalidArgument(_))));
        assert_eq!(0, batch.count());
    }

    #[test]
    fn test_setters_require_a_created_notification() {
        let mut batch = BatchPushRequest::new();
        let name = "non-existent-notification-name";

        let results = vec![
            batch.set_audience(name, "some-audience").map(|_| ()),
            batch.set_notification(name, json!({})).map(|_| ()),
            batch.set_device_types(name, json!([])).map(|_| ()),
            batch.push_device_type(name, "some-device").map(|_| ()),
            batch.set_message(name, json!({})).map(|_| ()),
            batch.set_options(name, json!({})).map(|_| ()),
        ];

        for result in results {
            match result {
                Err(Error::UnknownNotification(n)) => assert_eq!(name, n),
                other => panic!("expected an unknown notification error, got {:?}", other),
            }
        }

        assert_eq!(0, batch.count());
    }

    #[test]
    fn test_creating_twice_keeps_the_fields() {
        let mut batch = BatchPushRequest::new();

        batch.create_notification("first").unwrap();
        batch.set_audience("first", audience::all()).unwrap();
        batch.create_notification("first").unwrap();

        assert_eq!(1, batch.count());
        assert_eq!(Some(&json!("all")), batch.fragment("first").unwrap().audience.as_ref());
    }

    #[test]
    fn test_names_keep_creation_order() {
        let mut batch = BatchPushRequest::new();

        for name in ["c", "a", "b"] {
            batch.create_notification(name).unwrap();
            batch.set_audience(name, audience::alias(name)).unwrap();
        }
        batch.create_notification("a").unwrap();

        let aliases: Vec<Value> = batch
            .payload()
            .into_iter()
            .map(|fragment| fragment.audience.unwrap()["alias"].clone())
            .collect();

        assert_eq!(vec![json!("c"), json!("a"), json!("b")], aliases);
    }

    #[test]
    fn test_push_device_type_is_deduplicated() {
        let mut batch = BatchPushRequest::new();
        batch.create_notification("n").unwrap();

        batch.push_device_type("n", "ios").unwrap();
        batch.push_device_type("n", "ios").unwrap();
        assert_eq!(Some(&json!(["ios"])), batch.fragment("n").unwrap().device_types.as_ref());

        batch.push_device_type("n", "android").unwrap();
        batch.push_device_type("n", "ios").unwrap();
        assert_eq!(
            Some(&json!(["ios", "android"])),
            batch.fragment("n").unwrap().device_types.as_ref()
        );
    }

    #[test]
    fn test_push_device_type_extends_a_set_list() {
        let mut batch = BatchPushRequest::new();
        batch.create_notification("n").unwrap();
        batch.set_device_types("n", json!(["android"])).unwrap();

        batch.push_device_type("n", "android").unwrap();
        batch.push_device_type("n", "amazon").unwrap();

        assert_eq!(
            Some(&json!(["android", "amazon"])),
            batch.fragment("n").unwrap().device_types.as_ref()
        );
    }

    #[test]
    fn test_push_device_type_replaces_all() {
        let mut batch = BatchPushRequest::new();
        batch.create_notification("n").unwrap();
        batch.set_device_types("n", audience::all()).unwrap();

        batch.push_device_type("n", "wns").unwrap();

        assert_eq!(Some(&json!(["wns"])), batch.fragment("n").unwrap().device_types.as_ref());
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let mut batch = BatchPushRequest::new();
        batch.create_notification("n").unwrap();
        batch.set_audience("n", audience::all()).unwrap();

        assert_eq!(r#"[{"audience":"all"}]"#, batch.to_json_string().unwrap());
    }

    #[test]
    fn test_reset() {
        let mut batch = batch_of_two();
        batch.reset();

        assert_eq!(0, batch.count());
        assert!(batch.payload().is_empty());
        assert!(!batch.contains("some_notification_identifier_1"));
        assert_eq!("[]", batch.to_json_string().unwrap());

        // names are free to be used again
        batch.create_notification("some_notification_identifier_1").unwrap();
        assert_eq!(1, batch.count());
        assert_eq!(Some(&NotificationFragment::default()), batch.fragment("some_notification_identifier_1"));
    }

    #[test]
    fn test_request_target() {
        let batch = BatchPushRequest::new();

        assert_eq!("/api/push/", batch.target_path());
        assert_eq!("push_ids", batch.response_key());
    }
}
