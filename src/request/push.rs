use crate::request::payload::{NotificationFragment, PushRequestLike};
use serde::Serialize;
use serde_json::Value;

/// The body of a single push. Audience, notification and device types are
/// always present, as `null` if they were not set.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PushPayload {
    pub audience: Option<Value>,
    pub notification: Option<Value>,
    pub device_types: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

/// A builder for a single push.
///
/// # Example
///
/// ```rust
/// # use airship::PushRequest;
/// # use airship::request::payload::PushRequestLike;
/// # use airship::request::{audience, notification};
/// # fn main() -> Result<(), airship::Error> {
/// let push = PushRequest::new()
///     .set_audience(audience::all())
///     .set_notification(notification::simple_alert("Hello")?)
///     .set_device_types(audience::all());
///
/// assert_eq!(
///     r#"{"audience":"all","notification":{"alert":"Hello"},"device_types":"all"}"#,
///     push.to_json_string()?
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PushRequest {
    fragment: NotificationFragment,
}

impl PushRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Who receives the push.
    pub fn set_audience(mut self, audience: impl Into<Value>) -> Self {
        self.fragment.audience = Some(audience.into());
        self
    }

    /// The content of the push.
    pub fn set_notification(mut self, notification: impl Into<Value>) -> Self {
        self.fragment.notification = Some(notification.into());
        self
    }

    /// The platforms the push is delivered to.
    pub fn set_device_types(mut self, device_types: impl Into<Value>) -> Self {
        self.fragment.device_types = Some(device_types.into());
        self
    }

    /// A rich message, see
    /// [rich_message](../notification/fn.rich_message.html).
    pub fn set_message(mut self, message: impl Into<Value>) -> Self {
        self.fragment.message = Some(message.into());
        self
    }

    /// Push options such as `expiry`.
    pub fn set_options(mut self, options: impl Into<Value>) -> Self {
        self.fragment.options = Some(options.into());
        self
    }
}

impl PushRequestLike for PushRequest {
    type Payload = PushPayload;

    fn payload(&self) -> PushPayload {
        let fragment = self.fragment.clone();

        PushPayload {
            audience: fragment.audience,
            notification: fragment.notification,
            device_types: fragment.device_types,
            message: fragment.message,
            options: fragment.options,
        }
    }

    fn target_path(&self) -> &'static str {
        "/api/push/"
    }

    fn response_key(&self) -> &'static str {
        "push_ids"
    }

    fn log_message(&self) -> &'static str {
        "Push sent successfully."
    }
}
