//! Paginated listings of the devices registered to the app

use crate::client::Client;
use crate::error::Error;
use crate::transport::Transport;
use http::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::VecDeque;
use tracing::debug;

/// An entry of a paginated listing endpoint.
pub trait ListEntry: DeserializeOwned {
    /// The API path of the listing.
    const PATH: &'static str;
    /// The key of the page body holding the entries.
    const DATA_ATTRIBUTE: &'static str;
}

/// An iOS device token registered to the app.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DeviceTokenEntry {
    pub device_token: String,
    pub active: bool,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created: Option<String>,
}

impl ListEntry for DeviceTokenEntry {
    const PATH: &'static str = "/api/device_tokens/";
    const DATA_ATTRIBUTE: &'static str = "device_tokens";
}

/// An Android APID registered to the app.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ApidEntry {
    pub apid: String,
    pub active: bool,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ListEntry for ApidEntry {
    const PATH: &'static str = "/api/apids/";
    const DATA_ATTRIBUTE: &'static str = "apids";
}

/// A channel of any platform registered to the app.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChannelEntry {
    pub channel_id: String,
    pub device_type: String,
    pub installed: bool,
    pub opt_in: bool,
    #[serde(default)]
    pub push_address: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub last_registration: Option<String>,
}

impl ListEntry for ChannelEntry {
    const PATH: &'static str = "/api/channels/";
    const DATA_ATTRIBUTE: &'static str = "channels";
}

/// A lazy walk over a paginated listing. A page is only requested when the
/// entries of the previous one are used up, following the `next_page` link
/// of each page.
///
/// ```no_run
/// # use airship::Client;
/// # async fn run() -> Result<(), airship::Error> {
/// let client = Client::new("app_key", "master_secret");
/// let mut tokens = client.list_device_tokens(Some(100))?;
///
/// while let Some(token) = tokens.next().await? {
///     println!("{} active: {}", token.device_token, token.active);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PagedList<'a, T, E> {
    client: &'a Client<T>,
    next_url: Option<String>,
    entries: VecDeque<E>,
}

impl<'a, T: Transport, E: ListEntry> PagedList<'a, T, E> {
    pub(crate) fn new(client: &'a Client<T>, limit: Option<u32>) -> Result<Self, Error> {
        let limit = limit.map(|l| l.to_string());
        let args = limit.as_deref().map(|l| [("limit", l)]);
        let url = client.build_url(E::PATH, args.as_ref().map(|a| &a[..]))?;

        Ok(Self {
            client,
            next_url: Some(url),
            entries: VecDeque::new(),
        })
    }

    /// The next entry, or `None` after the last page.
    pub async fn next(&mut self) -> Result<Option<E>, Error> {
        loop {
            if let Some(entry) = self.entries.pop_front() {
                return Ok(Some(entry));
            }

            let Some(url) = self.next_url.take() else {
                return Ok(None);
            };

            self.fetch_page(&url).await?;
        }
    }

    /// Walks the remaining pages and returns every entry.
    pub async fn collect_all(mut self) -> Result<Vec<E>, Error> {
        let mut entries = Vec::new();

        while let Some(entry) = self.next().await? {
            entries.push(entry);
        }

        Ok(entries)
    }

    async fn fetch_page(&mut self, url: &str) -> Result<(), Error> {
        let version = self.client.options().api_version;
        let response = self.client.request(Method::GET, None, url, None, version).await?;

        let mut page: Map<String, Value> = serde_json::from_str(&response.body)?;

        let entries: Vec<E> = match page.remove(E::DATA_ATTRIBUTE) {
            Some(entries) => serde_json::from_value(entries)?,
            None => Vec::new(),
        };

        debug!(url, entries = entries.len(), "Fetched {} page", E::DATA_ATTRIBUTE);

        // an empty page ends the listing even if it links to another one
        if !entries.is_empty() {
            self.next_url = page.get("next_page").and_then(Value::as_str).map(String::from);
        }

        self.entries.extend(entries);

        Ok(())
    }
}
