//! The HTTP layer below the client: one request in, one raw response out

use crate::client::ClientOptions;
use crate::error::Error;
use crate::response::RawResponse;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::header::{AUTHORIZATION, CONTENT_LENGTH};
use http::{HeaderMap, Method};
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client as HttpClient;
use hyper_util::rt::TokioExecutor;
use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

type HyperConnector = HttpsConnector<HttpConnector>;

/// The app key and master secret, sent with every request as basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub app_key: String,
    pub master_secret: String,
}

impl Credentials {
    pub fn new<K, S>(app_key: K, master_secret: S) -> Self
    where
        K: Into<String>,
        S: Into<String>,
    {
        Self {
            app_key: app_key.into(),
            master_secret: master_secret.into(),
        }
    }

    /// The value of the `Authorization` header.
    pub fn basic_auth(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.app_key, self.master_secret));
        format!("Basic {}", encoded)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_key", &self.app_key)
            .field("master_secret", &"<redacted>")
            .finish()
    }
}

/// Everything a transport needs to perform one call.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub uri: String,
    pub credentials: Credentials,
    pub body: Option<String>,
    pub headers: HeaderMap,
}

impl TransportRequest {
    fn into_http(self) -> Result<hyper::Request<BoxBody<Bytes, Infallible>>, Error> {
        let mut builder = hyper::Request::builder()
            .method(self.method)
            .uri(&self.uri)
            .header(AUTHORIZATION, self.credentials.basic_auth());

        for (name, value) in self.headers.iter() {
            builder = builder.header(name, value);
        }

        let body = self.body.unwrap_or_default();
        builder = builder.header(CONTENT_LENGTH, body.len());

        let request_body = Full::from(body.into_bytes()).boxed();
        builder.body(request_body).map_err(Error::BuildRequestError)
    }
}

/// Performs exactly one network call per `send`. Connection handling, TLS and
/// timeouts live here, the [Client](../client/struct.Client.html) only deals
/// with the Airship API on top.
pub trait Transport {
    fn send(&self, request: TransportRequest) -> impl Future<Output = Result<RawResponse, Error>> + Send;
}

/// The default transport, a pooled hyper client over rustls.
#[derive(Debug, Clone)]
pub struct HyperTransport {
    http_client: HttpClient<HyperConnector, BoxBody<Bytes, Infallible>>,
    request_timeout: Duration,
}

impl HyperTransport {
    pub fn new(options: &ClientOptions) -> Self {
        let http_client = HttpClient::builder(TokioExecutor::new())
            .pool_idle_timeout(options.pool_idle_timeout_secs.map(Duration::from_secs))
            .build(default_connector());

        Self {
            http_client,
            request_timeout: options.request_timeout(),
        }
    }
}

impl Transport for HyperTransport {
    async fn send(&self, request: TransportRequest) -> Result<RawResponse, Error> {
        let request = request.into_http()?;
        let requesting = self.http_client.request(request);

        let Ok(response_result) = timeout(self.request_timeout, requesting).await else {
            return Err(Error::RequestTimeout(self.request_timeout.as_secs()));
        };

        let (parts, body) = response_result?.into_parts();
        let body = body.collect().await?.to_bytes();

        Ok(RawResponse::new(
            parts.status,
            parts.headers,
            String::from_utf8_lossy(&body).into_owned(),
        ))
    }
}

fn default_connector() -> HyperConnector {
    HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .build()
}


#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{ACCEPT, CONTENT_TYPE};
    use http::HeaderValue;
    use tokio::net::TcpListener;

    fn request(body: Option<&str>) -> TransportRequest {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.urbanairship+json; version=3;"),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        TransportRequest {
            method: Method::POST,
            uri: "https://go.urbanairship.com/api/push/".to_string(),
            credentials: Credentials::new("key", "secret"),
            body: body.map(String::from),
            headers,
        }
    }

    #[test]
    fn test_basic_auth_header() {
        let credentials = Credentials::new("key", "secret");

        // base64("key:secret")
        assert_eq!("Basic a2V5OnNlY3JldA==", credentials.basic_auth());
    }

    #[test]
    fn test_credentials_debug_hides_the_secret() {
        let debug = format!("{:?}", Credentials::new("key", "very-secret"));

        assert!(debug.contains("key"));
        assert!(!debug.contains("very-secret"));
    }

    #[test]
    fn test_http_request_method_and_uri() {
        let http_request = request(None).into_http().unwrap();

        assert_eq!(&Method::POST, http_request.method());
        assert_eq!("https://go.urbanairship.com/api/push/", http_request.uri().to_string());
    }

    #[test]
    fn test_http_request_headers() {
        let http_request = request(Some("{}")).into_http().unwrap();
        let headers = http_request.headers();

        assert_eq!("Basic a2V5OnNlY3JldA==", headers.get(AUTHORIZATION).unwrap());
        assert_eq!(
            "application/vnd.urbanairship+json; version=3;",
            headers.get(ACCEPT).unwrap()
        );
        assert_eq!("application/json", headers.get(CONTENT_TYPE).unwrap());
        assert_eq!("2", headers.get(CONTENT_LENGTH).unwrap());
    }

    #[test]
    fn test_http_request_invalid_uri() {
        let mut invalid = request(None);
        invalid.uri = "\r\n".to_string();

        assert!(matches!(invalid.into_http(), Err(Error::BuildRequestError(_))));
    }

    #[tokio::test]
    async fn test_http_request_body() {
        let http_request = request(Some(r#"{"audience":"all"}"#)).into_http().unwrap();

        let body = http_request.into_body().collect().await.unwrap().to_bytes();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        assert_eq!(r#"{"audience":"all"}"#, body_str);
    }

    fn local_request(port: u16) -> TransportRequest {
        TransportRequest {
            method: Method::GET,
            uri: format!("http://127.0.0.1:{}/api/channels/", port),
            credentials: Credentials::new("key", "secret"),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        // accepts the connection and never answers
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });

        let transport = HyperTransport::new(&ClientOptions::default().with_request_timeout(1));
        let result = transport.send(local_request(port)).await;

        server.abort();

        assert!(matches!(result, Err(Error::RequestTimeout(1))), "got {:?}", result);
    }

    #[tokio::test]
    async fn test_closed_port_is_a_connection_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let transport = HyperTransport::new(&ClientOptions::default());
        let result = transport.send(local_request(port)).await;

        assert!(matches!(result, Err(Error::ConnectionError(_))), "got {:?}", result);
    }
}
