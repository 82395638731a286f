//! Notification fragments and the interface shared by all push requests

use crate::error::Error;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

/// The payload of one notification before it is sent. Any field can hold an
/// arbitrary JSON value; only the fields which were set are serialized, always
/// in the order audience, notification, device types, message and options.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct NotificationFragment {
    /// Who receives the notification, see
    /// [audience](../audience/index.html).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<Value>,

    /// The notification content, see
    /// [notification](../notification/index.html).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Value>,

    /// A list of device types or `"all"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_types: Option<Value>,

    /// A rich message for the app's message center.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,

    /// Send options such as `expiry`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

/// A request that can be handed to
/// [Client::send](../../client/struct.Client.html#method.send).
pub trait PushRequestLike: Debug {
    /// The body of the request.
    type Payload: Serialize;

    /// Assembles the body of the request.
    fn payload(&self) -> Self::Payload;

    /// The API path the request is posted to.
    fn target_path(&self) -> &'static str;

    /// The key of the response body holding the acknowledged ids.
    fn response_key(&self) -> &'static str;

    /// Logged when the request was accepted.
    fn log_message(&self) -> &'static str;

    /// The payload as a JSON string. Returns an error if serialization fails.
    fn to_json_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(&self.payload())?)
    }
}
