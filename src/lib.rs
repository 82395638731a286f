//! # Airship
//!
//! A client for the Urban Airship push REST API, sending single, batch and
//! scheduled pushes and walking the device listings of an app.
//!
//! The library uses Tokio and Hyper for the requests, authenticating every
//! request with the app key and the master secret of the app. Requests and
//! responses are logged with `tracing`, credentials never are.
//!
//! ## Payloads
//!
//! The [notification](request/notification/index.html) and
//! [audience](request/audience/index.html) helpers build the JSON fragments
//! of a push. The requests are assembled from those fragments:
//!
//! * [PushRequest](request/push/struct.PushRequest.html) for a single push
//! * [BatchPushRequest](request/batch/struct.BatchPushRequest.html) for
//!   several named notifications sent in one request
//! * [ScheduledPushRequest](request/schedule/struct.ScheduledPushRequest.html)
//!   for a push delivered later
//!
//! ## Example
//!
//! Sending a batch of two notifications:
//!
//! ```no_run
//! use airship::request::{audience, notification};
//! use airship::{BatchPushRequest, Client};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), airship::Error> {
//! let client = Client::new("app_key", "master_secret");
//! let mut batch = BatchPushRequest::new();
//!
//! batch
//!     .create_notification("welcome")?
//!     .set_audience("welcome", audience::tag("new_users"))?
//!     .set_notification("welcome", notification::simple_alert("Welcome!")?)?
//!     .push_device_type("welcome", "ios")?;
//!
//! batch
//!     .create_notification("sale")?
//!     .set_audience("sale", audience::alias("some_alias"))?
//!     .set_notification("sale", notification::simple_alert("50% off")?)?
//!     .set_device_types("sale", audience::all())?;
//!
//! let response = client.send(&batch).await?;
//! println!("push ids: {:?}", response.push_ids());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod devices;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;

pub use crate::client::{Client, ClientOptions, Endpoint};
pub use crate::devices::{ApidEntry, ChannelEntry, DeviceTokenEntry, ListEntry, PagedList};
pub use crate::error::Error;
pub use crate::request::batch::BatchPushRequest;
pub use crate::request::notification::{Badge, DeviceType};
pub use crate::request::payload::{NotificationFragment, PushRequestLike};
pub use crate::request::push::PushRequest;
pub use crate::request::schedule::ScheduledPushRequest;
pub use crate::response::{ApiError, ErrorCode, PushResponse, RawResponse};
pub use crate::transport::{HyperTransport, Transport};
