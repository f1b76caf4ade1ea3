//! Key paths as reported by the store.

use std::fmt;

use crate::Error;

/// A non-empty key path.
///
/// Unlike a filesystem path, a key path is kept verbatim: the store reports
/// child keys as full paths (e.g. `/app/hosts/0`) and the walker compares
/// them by string equality, so no normalization is applied.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct KeyPath {
    raw: String,
}

impl KeyPath {
    /// Validate a key path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvtree_core::KeyPath;
    ///
    /// let path = KeyPath::new("/app/hosts").unwrap();
    /// assert_eq!(path.as_str(), "/app/hosts");
    ///
    /// assert!(KeyPath::new("").is_err());
    /// ```
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let raw = s.into();
        if raw.is_empty() {
            return Err(Error::invalid_argument("key path must not be empty"));
        }
        Ok(KeyPath { raw })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The key a list element at `index` would have under this path.
    pub fn index_child(&self, index: usize) -> String {
        format!("{}/{}", self.raw, index)
    }

    /// Iterate over non-empty `/`-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split('/').filter(|s| !s.is_empty())
    }

    /// The final segment, or the whole path if it has none (e.g. `/`).
    pub fn last_segment(&self) -> &str {
        self.segments().last().unwrap_or(self.raw.as_str())
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for KeyPath {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl TryFrom<&str> for KeyPath {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        KeyPath::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn empty_path_rejected() {
        let err = KeyPath::new("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn path_kept_verbatim() {
        // Keys are opaque to the store; hyphens, dots and slashes survive as-is.
        let p = KeyPath::new("/svc//my-app.cfg/").unwrap();
        assert_eq!(p.as_str(), "/svc//my-app.cfg/");
        assert_eq!(p.to_string(), "/svc//my-app.cfg/");
    }

    #[test]
    fn index_child_concatenates() {
        let p = KeyPath::new("/app/hosts").unwrap();
        assert_eq!(p.index_child(0), "/app/hosts/0");
        assert_eq!(p.index_child(12), "/app/hosts/12");

        let relative = KeyPath::new("app").unwrap();
        assert_eq!(relative.index_child(3), "app/3");
    }

    #[test]
    fn segments_skip_empty() {
        let p = KeyPath::new("/a//b/c/").unwrap();
        let segments: Vec<&str> = p.segments().collect();
        assert_eq!(segments, vec!["a", "b", "c"]);
    }

    #[test]
    fn last_segment() {
        assert_eq!(KeyPath::new("/app/hosts/0").unwrap().last_segment(), "0");
        assert_eq!(KeyPath::new("name").unwrap().last_segment(), "name");
        assert_eq!(KeyPath::new("/").unwrap().last_segment(), "/");
    }

    #[test]
    fn try_from_str() {
        assert!(KeyPath::try_from("/x").is_ok());
        assert!(KeyPath::try_from("").is_err());
    }
}
