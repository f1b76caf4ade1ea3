//! Subcommands and their execution.
//!
//! - `nested <path> [--trim] [--json]` - materialize a subtree
//! - `keys <path>` - list child keys
//! - `is-dir <path>` - print `true` or `false`
//! - `list <path>` - leaf children as `key=value`
//! - `get <key>`, `set <key> <value> [--ttl N]`, `rm <key>`, `cas <key> <old> <new>`

use clap::Subcommand;

use kvtree_core::{trim_keys, StoreClient, TreeWalker};
use kvtree_http::EtcdClient;

use crate::error::Error;
use crate::render::{render_map, RenderOptions};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Materialize and print the subtree under a path
    Nested {
        path: String,
        /// Reduce every key to its last path segment
        #[arg(long)]
        trim: bool,
        /// Print JSON instead of the indented layout
        #[arg(long)]
        json: bool,
    },
    /// List the child keys of a path
    Keys { path: String },
    /// Print whether a path has children
    IsDir { path: String },
    /// List leaf children of a path as key=value
    List { path: String },
    /// Print the value of a key
    Get { key: String },
    /// Set a key
    Set {
        key: String,
        value: String,
        /// Expire the key after this many seconds
        #[arg(long)]
        ttl: Option<u64>,
    },
    /// Delete a key
    Rm { key: String },
    /// Set a key only if it holds an expected value
    Cas {
        key: String,
        old: String,
        new: String,
    },
}

/// Run a command against etcd; returns what to print (possibly nothing).
pub fn execute(
    command: &Command,
    client: &EtcdClient,
    options: &RenderOptions,
) -> Result<Option<String>, Error> {
    let walker = TreeWalker::new(client);
    match command {
        Command::Nested { path, trim, json } => {
            nested(&walker, path, *trim, *json, options).map(Some)
        }
        Command::Keys { path } => keys(&walker, path).map(Some),
        Command::IsDir { path } => is_dir(&walker, path).map(Some),
        Command::List { path } => {
            let listed = client.list(path)?;
            Ok(Some(
                listed
                    .iter()
                    .map(|(k, v)| format!("{}={}\n", k, v))
                    .collect(),
            ))
        }
        Command::Get { key } => Ok(client.get(key)?.map(|v| format!("{}\n", v))),
        Command::Set { key, value, ttl } => {
            match ttl {
                Some(ttl) => client.set_with_ttl(key, value, *ttl)?,
                None => client.set(key, value)?,
            }
            Ok(None)
        }
        Command::Rm { key } => {
            client.delete(key)?;
            Ok(None)
        }
        Command::Cas { key, old, new } => {
            client.compare_and_swap(key, old, new)?;
            Ok(None)
        }
    }
}

/// Materialize `path` and lay it out as text or JSON.
pub fn nested<S: StoreClient>(
    walker: &TreeWalker<S>,
    path: &str,
    trim: bool,
    json: bool,
    options: &RenderOptions,
) -> Result<String, Error> {
    let mut level = walker.list_nested(path)?;
    if trim {
        level = trim_keys(&level);
    }

    if json {
        let mut out = serde_json::to_string_pretty(&level)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(render_map(&level, options))
    }
}

pub fn keys<S: StoreClient>(walker: &TreeWalker<S>, path: &str) -> Result<String, Error> {
    Ok(walker
        .list_keys(path)?
        .into_iter()
        .map(|k| format!("{}\n", k))
        .collect())
}

pub fn is_dir<S: StoreClient>(walker: &TreeWalker<S>, path: &str) -> Result<String, Error> {
    Ok(format!("{}\n", walker.is_directory(path)?))
}
