//! # kvtree-http
//!
//! etcd v2 HTTP client for kvtree.
//!
//! [`EtcdClient`] speaks the `/v2/keys` API over a blocking `reqwest`
//! client. It offers the plain key operations (get, set, delete, list,
//! compare-and-swap) and implements [`kvtree_core::StoreClient`], so it
//! can drive a [`kvtree_core::TreeWalker`]:
//!
//! ```ignore
//! use kvtree_core::TreeWalker;
//! use kvtree_http::EtcdClient;
//!
//! let client = EtcdClient::new("http://localhost:4001")?;
//! client.set("/app/hosts/0", "a.example")?;
//! client.set("/app/hosts/1", "b.example")?;
//!
//! let walker = TreeWalker::new(client);
//! let nested = walker.list_nested("/app")?;
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::EtcdClient;
pub use error::Error;
pub use types::{EtcdErrorBody, EtcdResponse, Node};
