use crate::request::payload::PushRequestLike;
use crate::request::push::{PushPayload, PushRequest};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ScheduledPushPayload {
    pub schedule: Value,
    pub push: PushPayload,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A builder for a push sent later, at the time given by the schedule.
///
/// # Example
///
/// ```rust
/// # use airship::{PushRequest, ScheduledPushRequest};
/// # use airship::request::payload::PushRequestLike;
/// # use airship::request::{audience, notification};
/// # fn main() -> Result<(), airship::Error> {
/// let push = PushRequest::new()
///     .set_audience(audience::all())
///     .set_notification(notification::simple_alert("Hello")?)
///     .set_device_types(audience::all());
///
/// let scheduled = ScheduledPushRequest::new(notification::scheduled_time(0)?, push)
///     .set_name("A schedule");
///
/// assert_eq!(
///     concat!(
///         r#"{"schedule":{"scheduled_time":"1970-01-01T00:00:00"},"#,
///         r#""push":{"audience":"all","notification":{"alert":"Hello"},"device_types":"all"},"#,
///         r#""name":"A schedule"}"#,
///     ),
///     scheduled.to_json_string()?
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ScheduledPushRequest {
    schedule: Value,
    name: Option<String>,
    push: PushRequest,
}

impl ScheduledPushRequest {
    /// Schedules `push` with a schedule descriptor, such as the one from
    /// [scheduled_time](../notification/fn.scheduled_time.html).
    pub fn new(schedule: impl Into<Value>, push: PushRequest) -> Self {
        Self {
            schedule: schedule.into(),
            name: None,
            push,
        }
    }

    pub fn set_schedule(mut self, schedule: impl Into<Value>) -> Self {
        self.schedule = schedule.into();
        self
    }

    /// A name for the schedule, shown in the Airship dashboard.
    pub fn set_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn set_push(mut self, push: PushRequest) -> Self {
        self.push = push;
        self
    }
}

impl PushRequestLike for ScheduledPushRequest {
    type Payload = ScheduledPushPayload;

    fn payload(&self) -> ScheduledPushPayload {
        ScheduledPushPayload {
            schedule: self.schedule.clone(),
            push: self.push.payload(),
            name: self.name.clone(),
        }
    }

    fn target_path(&self) -> &'static str {
        "/api/schedules/"
    }

    fn response_key(&self) -> &'static str {
        "schedule_urls"
    }

    fn log_message(&self) -> &'static str {
        "Scheduled push sent successfully."
    }
}
