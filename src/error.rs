//! Error and result module

use crate::response::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A helper or builder was given a value the API would not accept. Raised
    /// before any request is made.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A batch setter referenced a notification name which was never created
    /// with
    /// [create_notification](request/batch/struct.BatchPushRequest.html#method.create_notification).
    #[error("Notification name \"{0}\" is not defined")]
    UnknownNotification(String),

    /// The API responded with a status of 300 or more. Contains the parsed
    /// error body together with the raw response for diagnostics.
    #[error("Request was not accepted by Airship ({0})")]
    ApiError(Box<ApiError>),

    /// User request or Airship response JSON data was faulty.
    #[error("Error serializing to JSON: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// The base URL or a `next_page` link could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A problem connecting to the Airship servers.
    #[error("Error connecting to Airship: {0}")]
    ConnectionError(#[from] hyper_util::client::legacy::Error),

    /// Reading the response body failed.
    #[error("Error reading the response body: {0}")]
    BodyError(#[from] hyper::Error),

    /// The request could not be assembled, typically because of an invalid
    /// header value.
    #[error("Failed to construct HTTP request: {0}")]
    BuildRequestError(#[source] http::Error),

    /// Airship didn't respond in time, see
    /// [ClientOptions::with_request_timeout](client/struct.ClientOptions.html#method.with_request_timeout).
    #[error("Timeout in sending a request to Airship after {0}s")]
    RequestTimeout(u64),
}

impl From<ApiError> for Error {
    fn from(e: ApiError) -> Error {
        Error::ApiError(Box::new(e))
    }
}

impl From<http::Error> for Error {
    fn from(e: http::Error) -> Error {
        Error::BuildRequestError(e)
    }
}
