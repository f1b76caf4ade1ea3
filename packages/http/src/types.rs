use serde::{Deserialize, Serialize};

use kvtree_core::ChildProxy;

/// Body of a successful `/v2/keys` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EtcdResponse {
    /// `get`, `set`, `delete`, `compareAndSwap`, ...
    pub action: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<Node>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_node: Option<Node>,
}

/// A node of the etcd tree.
///
/// A plain `GET` only populates one level of `nodes`; grandchildren of a
/// directory child are absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Full key path. etcd omits it for the root.
    #[serde(default)]
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub dir: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_index: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_index: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
}

impl Node {
    pub fn leaf(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn directory(key: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            key: key.into(),
            dir: true,
            nodes,
            ..Default::default()
        }
    }
}

impl From<Node> for ChildProxy {
    fn from(node: Node) -> Self {
        ChildProxy {
            key: node.key,
            value: node.value,
        }
    }
}

/// Body of an etcd error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EtcdErrorBody {
    pub error_code: i64,

    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
}
