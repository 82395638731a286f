//! Response data types from Airship

use http::{HeaderMap, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// The unparsed result of one HTTP call, as returned by a
/// [Transport](../transport/trait.Transport.html).
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// Headers sent back by the server.
    pub headers: HeaderMap,
    /// The response body as text.
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
struct PushResponseBody {
    #[serde(default)]
    ok: Option<bool>,
    #[serde(default)]
    operation_id: Option<String>,
    #[serde(default)]
    push_ids: Option<Vec<String>>,
    #[serde(default)]
    schedule_urls: Option<Vec<String>>,
}

/// The acknowledgment of an accepted push, batch push or schedule request.
///
/// Built once per [send](../client/struct.Client.html#method.send) and never
/// changed afterwards.
#[derive(Debug, Clone)]
pub struct PushResponse {
    status: StatusCode,
    headers: HeaderMap,
    raw_body: String,
    ok: Option<bool>,
    operation_id: Option<String>,
    push_ids: Option<Vec<String>>,
    schedule_urls: Option<Vec<String>>,
}

impl PushResponse {
    /// The HTTP status code, usually `201` or `202`.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    /// The `ok` flag of the body.
    pub fn ok(&self) -> Option<bool> {
        self.ok
    }

    pub fn operation_id(&self) -> Option<&str> {
        self.operation_id.as_deref()
    }

    /// One id per notification in the request, in request order.
    pub fn push_ids(&self) -> Option<&[String]> {
        self.push_ids.as_deref()
    }

    /// The URLs of the created schedules.
    pub fn schedule_urls(&self) -> Option<&[String]> {
        self.schedule_urls.as_deref()
    }

    /// Looks up the acknowledged ids by their body key, `push_ids` or
    /// `schedule_urls`.
    pub fn ids(&self, key: &str) -> Option<&[String]> {
        match key {
            "push_ids" => self.push_ids(),
            "schedule_urls" => self.schedule_urls(),
            _ => None,
        }
    }
}

impl From<RawResponse> for PushResponse {
    /// A success body which is not JSON leaves all the parsed fields empty;
    /// the text stays available through `raw_body`.
    fn from(response: RawResponse) -> Self {
        let body: PushResponseBody = serde_json::from_str(&response.body).unwrap_or_default();

        Self {
            status: response.status,
            headers: response.headers,
            raw_body: response.body,
            ok: body.ok,
            operation_id: body.operation_id,
            push_ids: body.push_ids,
            schedule_urls: body.schedule_urls,
        }
    }
}

/// The `error_code` of an error body. Airship sends either a number or a
/// numeric string, the value is kept as it was received.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ErrorCode {
    Number(i64),
    Text(String),
    /// Any other JSON value, e.g. a float, so the rest of the body still parses.
    Other(Value),
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Number(code) => write!(f, "{}", code),
            ErrorCode::Text(code) => f.write_str(code),
            ErrorCode::Other(code) => write!(f, "{}", code),
        }
    }
}

/// The JSON body Airship sends with a failed request.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    /// A human readable description of the failure.
    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub error_code: Option<ErrorCode>,

    /// More information about the failure. Can be a string or an object
    /// pointing to the offending part of the payload.
    #[serde(default)]
    pub details: Option<Value>,
}

/// A request which Airship didn't accept (status 300 or more).
#[derive(Debug, Clone)]
pub struct ApiError {
    /// The HTTP status code.
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// The response body as it was received.
    pub raw_body: String,
    /// The parsed body, if it was a JSON error object.
    pub body: Option<ErrorBody>,
}

impl ApiError {
    /// The `error` message of the body.
    pub fn error(&self) -> Option<&str> {
        self.body.as_ref().and_then(|b| b.error.as_deref())
    }

    pub fn error_code(&self) -> Option<&ErrorCode> {
        self.body.as_ref().and_then(|b| b.error_code.as_ref())
    }

    pub fn details(&self) -> Option<&Value> {
        self.body.as_ref().and_then(|b| b.details.as_ref())
    }
}

impl From<RawResponse> for ApiError {
    fn from(response: RawResponse) -> Self {
        let body = serde_json::from_str(&response.body).ok();

        Self {
            status: response.status,
            headers: response.headers,
            raw_body: response.body,
            body,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status: {}", self.status.as_u16())?;

        if let Some(error) = self.error() {
            write!(f, ", error: {}", error)?;
        }

        if let Some(code) = self.error_code() {
            write!(f, ", error_code: {}", code)?;
        }

        Ok(())
    }
}
