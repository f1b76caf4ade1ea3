//! Blocking etcd v2 client.
//!
//! ## Protocol
//!
//! - `get(key)` → `GET /v2/keys/{key}`
//! - `set(key, value)` → `PUT /v2/keys/{key}` with form body `value=...`
//! - `delete(key)` → `DELETE /v2/keys/{key}`
//! - `compare_and_swap(key, old, new)` → `PUT` with `value` and `prevValue`
//!
//! Errors come back as `{"errorCode", "message", "cause", "index"}`.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use url::Url;

use kvtree_core::{ChildProxy, Error as CoreError, StoreClient};

use crate::error::Error;
use crate::types::{EtcdErrorBody, EtcdResponse, Node};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A client for etcd's v2 keys API.
///
/// Every call is a single blocking round trip. The client holds no state
/// besides the connection pool, so it can be shared between threads.
#[derive(Debug, Clone)]
pub struct EtcdClient {
    client: Client,
    base_url: Url,
}

impl EtcdClient {
    /// Create a client for the etcd server at `base_url`, e.g. `http://localhost:4001`.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client whose requests time out after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    /// Create a client with a custom reqwest client.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl {
                message: format!("{} cannot be a base URL", base_url),
            });
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/v2/keys/{key}`, percent-encoding each key segment.
    ///
    /// Empty segments collapse (`/a//b` is `/a/b`, as etcd itself treats
    /// it). `.` and `..` are rejected: `url` would drop them silently and
    /// address a different key.
    fn keys_url(&self, key: &str) -> Result<Url, Error> {
        if key.split('/').any(|s| s == "." || s == "..") {
            return Err(Error::invalid_argument(format!(
                "key '{}' contains a '.' or '..' segment",
                key
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl {
                message: format!("{} cannot be a base URL", self.base_url),
            })?
            .pop_if_empty()
            .extend(["v2", "keys"])
            .extend(key.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }

    /// Send a request and decode either a response or an etcd error body.
    fn execute(&self, request: RequestBuilder) -> Result<EtcdResponse, Error> {
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        tracing::debug!(status = status.as_u16(), "etcd responded");

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        match serde_json::from_str::<EtcdErrorBody>(&body) {
            Ok(error) => Err(Error::Etcd(error)),
            Err(_) => Err(Error::UnexpectedResponse {
                status: status.as_u16(),
                body,
            }),
        }
    }

    /// Fetch the node at `key` (one level of children). `None` if missing.
    pub fn get_node(&self, key: &str) -> Result<Option<Node>, Error> {
        require_non_empty("key", key)?;
        let url = self.keys_url(key)?;
        tracing::debug!(%url, "GET");

        match self.execute(self.client.get(url)) {
            Ok(response) => match response.node {
                Some(node) => Ok(Some(node)),
                None => Err(Error::MissingNode {
                    action: response.action,
                }),
            },
            Err(e) if e.is_key_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// The value at `key`, or `None` if the key does not exist.
    ///
    /// A directory has no value and also yields `None`.
    pub fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.get_node(key)?.and_then(|node| node.value))
    }

    /// Set `key` to `value`.
    pub fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        require_non_empty("key", key)?;
        require_non_empty("value", value)?;
        self.put(key, &[("value", value.to_string())])
    }

    /// Set `key` to `value`, expiring after `ttl` seconds.
    pub fn set_with_ttl(&self, key: &str, value: &str, ttl: u64) -> Result<(), Error> {
        require_non_empty("key", key)?;
        require_non_empty("value", value)?;
        if ttl == 0 {
            return Err(Error::invalid_argument("ttl must be positive"));
        }
        self.put(
            key,
            &[("value", value.to_string()), ("ttl", ttl.to_string())],
        )
    }

    /// Delete `key`.
    pub fn delete(&self, key: &str) -> Result<(), Error> {
        require_non_empty("key", key)?;
        let url = self.keys_url(key)?;
        tracing::debug!(%url, "DELETE");
        self.execute(self.client.delete(url))?;
        Ok(())
    }

    /// Leaf children of `path`, keyed by full key path. Sub-directories
    /// are skipped.
    pub fn list(&self, path: &str) -> Result<BTreeMap<String, String>, Error> {
        let children = match self.get_node(path)? {
            Some(node) => node.nodes,
            None => Vec::new(),
        };
        Ok(children
            .into_iter()
            .filter_map(|node| node.value.map(|value| (node.key, value)))
            .collect())
    }

    /// Set `key` to `new_value` only if it currently holds `old_value`.
    ///
    /// A mismatch surfaces as etcd error 101 ("Compare failed").
    pub fn compare_and_swap(
        &self,
        key: &str,
        old_value: &str,
        new_value: &str,
    ) -> Result<(), Error> {
        require_non_empty("key", key)?;
        require_non_empty("old value", old_value)?;
        require_non_empty("new value", new_value)?;
        if old_value == new_value {
            return Err(Error::invalid_argument(
                "old and new values must differ",
            ));
        }
        self.put(
            key,
            &[
                ("value", new_value.to_string()),
                ("prevValue", old_value.to_string()),
            ],
        )
    }

    fn put(&self, key: &str, form: &[(&str, String)]) -> Result<(), Error> {
        let url = self.keys_url(key)?;
        tracing::debug!(%url, "PUT");
        let response = self.execute(self.client.put(url).form(form))?;
        if response.node.is_none() {
            return Err(Error::MissingNode {
                action: response.action,
            });
        }
        Ok(())
    }
}

fn require_non_empty(what: &str, s: &str) -> Result<(), Error> {
    if s.is_empty() {
        return Err(Error::invalid_argument(format!("{} must not be empty", what)));
    }
    Ok(())
}

impl StoreClient for EtcdClient {
    fn fetch_children(&self, path: &str) -> Result<Vec<ChildProxy>, CoreError> {
        let children = match self.get_node(path)? {
            Some(node) => node.nodes,
            None => Vec::new(),
        };
        Ok(children.into_iter().map(ChildProxy::from).collect())
    }
}
