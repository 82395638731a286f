//! The client module for sending requests and parsing responses

use crate::devices::{ApidEntry, ChannelEntry, DeviceTokenEntry, PagedList};
use crate::error::Error;
use crate::request::payload::PushRequestLike;
use crate::response::{ApiError, PushResponse, RawResponse};
use crate::transport::{Credentials, HyperTransport, Transport, TransportRequest};
use http::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, Method};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;
const DEFAULT_API_VERSION: u8 = 3;

/// The Airship service endpoint to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// The production environment (go.urbanairship.com)
    Production,
    /// Any other base URL, e.g. a proxy or a local test server.
    Custom(String),
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base_url = match self {
            Endpoint::Production => "https://go.urbanairship.com",
            Endpoint::Custom(base_url) => base_url,
        };

        write!(f, "{}", base_url)
    }
}

/// Uses [`Endpoint::Production`] and API version 3 by default.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The timeout of the HTTP requests
    pub request_timeout_secs: Option<u64>,
    /// The timeout for idle sockets being kept alive
    pub pool_idle_timeout_secs: Option<u64>,
    /// The endpoint where the requests are sent to
    pub endpoint: Endpoint,
    /// The API version pinned in the `Accept` header
    pub api_version: u8,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            pool_idle_timeout_secs: Some(600),
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
            endpoint: Endpoint::Production,
            api_version: DEFAULT_API_VERSION,
        }
    }
}

impl ClientOptions {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            ..Default::default()
        }
    }

    pub fn with_api_version(mut self, version: u8) -> Self {
        self.api_version = version;
        self
    }

    pub fn with_request_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = Some(seconds);
        self
    }

    pub fn with_pool_idle_timeout(mut self, seconds: u64) -> Self {
        self.pool_idle_timeout_secs = Some(seconds);
        self
    }

    pub(crate) fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS))
    }
}

/// Sends authenticated requests to the Airship API and maps the responses.
///
/// Every call is one request and one response. A status of 300 or more fails
/// with [`Error::ApiError`], which holds the parsed error body and the raw
/// response for handling.
///
/// ```no_run
/// # use airship::{Client, PushRequest};
/// # use airship::request::{audience, notification};
/// # async fn run() -> Result<(), airship::Error> {
/// let client = Client::new("app_key", "master_secret");
///
/// let push = PushRequest::new()
///     .set_audience(audience::alias("some_alias"))
///     .set_notification(notification::simple_alert("Hello")?)
///     .set_device_types(notification::device_types(&["ios", "android"])?);
///
/// let response = client.send(&push).await?;
/// println!("{:?}", response.push_ids());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client<T = HyperTransport> {
    credentials: Credentials,
    options: ClientOptions,
    transport: T,
}

impl Client<HyperTransport> {
    /// A client for the production endpoint using the default options.
    pub fn new<K, S>(app_key: K, master_secret: S) -> Self
    where
        K: Into<String>,
        S: Into<String>,
    {
        Self::with_options(app_key, master_secret, ClientOptions::default())
    }

    pub fn with_options<K, S>(app_key: K, master_secret: S, options: ClientOptions) -> Self
    where
        K: Into<String>,
        S: Into<String>,
    {
        let transport = HyperTransport::new(&options);
        Self::with_transport(app_key, master_secret, options, transport)
    }
}

impl<T: Transport> Client<T> {
    /// A client sending its requests through the given transport.
    pub fn with_transport<K, S>(app_key: K, master_secret: S, options: ClientOptions, transport: T) -> Self
    where
        K: Into<String>,
        S: Into<String>,
    {
        Client {
            credentials: Credentials::new(app_key, master_secret),
            options,
            transport,
        }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// Appends `path` to the endpoint, keeping any path the endpoint has, and
    /// adds the URL encoded `args` as the query string, in the given order.
    pub fn build_url(&self, path: &str, args: Option<&[(&str, &str)]>) -> Result<String, Error> {
        let base = self.options.endpoint.to_string();
        let mut url = Url::parse(&format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))?;

        if let Some(args) = args {
            url.query_pairs_mut().extend_pairs(args.iter());
        }

        Ok(url.into())
    }

    /// Sends an authenticated request with the version pinned in the `Accept`
    /// header and returns the raw response.
    ///
    /// Fails with [`Error::ApiError`] if the status is 300 or more.
    pub async fn request(
        &self,
        method: Method,
        body: Option<String>,
        uri: &str,
        content_type: Option<&str>,
        version: u8,
    ) -> Result<RawResponse, Error> {
        let mut headers = HeaderMap::new();
        let accept = format!("application/vnd.urbanairship+json; version={};", version);
        headers.insert(ACCEPT, HeaderValue::from_str(&accept).map_err(http::Error::from)?);

        if let Some(content_type) = content_type {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_str(content_type).map_err(http::Error::from)?,
            );
        }

        debug!(%method, uri, ?headers, ?body, "Making request");

        let response = self
            .transport
            .send(TransportRequest {
                method,
                uri: uri.to_string(),
                credentials: self.credentials.clone(),
                body,
                headers,
            })
            .await?;

        debug!(
            status = response.status.as_u16(),
            headers = ?response.headers,
            body = %response.body,
            "Received response"
        );

        if response.status.as_u16() >= 300 {
            return Err(ApiError::from(response).into());
        }

        Ok(response)
    }

    /// Sends a push, batch push or scheduled push.
    pub async fn send<R: PushRequestLike>(&self, request: &R) -> Result<PushResponse, Error> {
        let uri = self.build_url(request.target_path(), None)?;
        let body = request.to_json_string()?;

        let response = self
            .request(
                Method::POST,
                Some(body),
                &uri,
                Some("application/json"),
                self.options.api_version,
            )
            .await?;

        let response = PushResponse::from(response);
        let key = request.response_key();

        info!(key, ids = ?response.ids(key), "{}", request.log_message());

        Ok(response)
    }

    /// Lists the iOS device tokens of the app, `limit` entries per page.
    pub fn list_device_tokens(&self, limit: Option<u32>) -> Result<PagedList<'_, T, DeviceTokenEntry>, Error> {
        PagedList::new(self, limit)
    }

    /// Lists the Android APIDs of the app, `limit` entries per page.
    pub fn list_apids(&self, limit: Option<u32>) -> Result<PagedList<'_, T, ApidEntry>, Error> {
        PagedList::new(self, limit)
    }

    /// Lists the channels of the app, `limit` entries per page.
    pub fn list_channels(&self, limit: Option<u32>) -> Result<PagedList<'_, T, ChannelEntry>, Error> {
        PagedList::new(self, limit)
    }
}
