use std::borrow::Borrow;
use std::fmt;

use bytes::BufMut;
use serde::{Deserialize, Serialize};

use crate::Encode;

/// Strip the namespace (`minecraft:`) from a resource location.
pub fn strip_namespace(name: &str) -> &str {
    name.split_once(':').map_or(name, |(_, path)| path)
}

/// A resource location with its namespace removed.
///
/// The client assumes the `minecraft` namespace for bare paths, so everything
/// written to the wire goes through this type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(strip_namespace(name.as_ref()).to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        match name.split_once(':') {
            Some((_, path)) => Self(path.to_owned()),
            None => Self(name),
        }
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<Identifier> for String {
    fn from(ident: Identifier) -> Self {
        ident.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Encode for Identifier {
    fn encode<B: BufMut>(&self, buf: &mut B) {
        self.0.encode(buf);
    }
}
