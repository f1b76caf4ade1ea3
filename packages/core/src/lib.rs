//! kvtree core: subtree materialization over a hierarchical key-value store.
//!
//! The store organizes keys as a tree. A key is either a leaf holding a
//! string or a directory holding child keys. This crate turns a directory
//! subtree into a nested [`Value`], and recognizes directories whose
//! children are named `0`, `1`, `2`, ... as lists.
//!
//! - [`KeyPath`]: a non-empty key path
//! - [`Value`]: `Leaf | Directory | List`
//! - [`StoreClient`]: single-level child listing, implemented by transports
//! - [`TreeWalker`]: `list_keys`, `is_directory`, `list_nested`
//!
//! # Example
//!
//! ```rust
//! use kvtree_core::{ChildProxy, Error, StoreClient, TreeWalker, Value};
//!
//! /// `/app/name = demo`, `/app/hosts/0 = a`, `/app/hosts/1 = b`
//! struct Fixed;
//!
//! impl StoreClient for Fixed {
//!     fn fetch_children(&self, path: &str) -> Result<Vec<ChildProxy>, Error> {
//!         Ok(match path {
//!             "/app" => vec![
//!                 ChildProxy::leaf("/app/name", "demo"),
//!                 ChildProxy::directory("/app/hosts"),
//!             ],
//!             "/app/hosts" => vec![
//!                 ChildProxy::leaf("/app/hosts/0", "a"),
//!                 ChildProxy::leaf("/app/hosts/1", "b"),
//!             ],
//!             _ => vec![],
//!         })
//!     }
//! }
//!
//! let walker = TreeWalker::new(Fixed);
//! let nested = walker.list_nested("/app").unwrap();
//! assert_eq!(nested["/app/name"], Value::from("demo"));
//! assert_eq!(nested["/app/hosts"], Value::from(vec!["a", "b"]));
//! ```

mod error;
mod list_inference;
mod path;
mod traits;
mod value;
mod walker;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use error::{Error, ErrorKind};
pub use list_inference::convert_if_really_list;
pub use path::KeyPath;
pub use traits::{ChildProxy, StoreClient};
pub use value::{trim_keys, Value, ValueMap};
pub use walker::TreeWalker;
