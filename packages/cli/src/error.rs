#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Tree(#[from] kvtree_core::Error),

    #[error(transparent)]
    Etcd(#[from] kvtree_http::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
