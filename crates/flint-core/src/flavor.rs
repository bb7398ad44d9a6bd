//! Symbolic flavor tags.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::FlavorError;

/// An immutable tag naming one build variant, e.g. `linux-x86_64`.
///
/// Two flavors are equal iff their tags are equal. Cloning shares the
/// underlying string, so flavors can be handed out freely as map keys.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Flavor(Arc<str>);

impl Flavor {
    /// Create a flavor, rejecting tags outside the flavor alphabet.
    pub fn new(name: impl AsRef<str>) -> Result<Self, FlavorError> {
        let name = name.as_ref();
        if !Self::is_valid(name) {
            return Err(FlavorError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(Self(Arc::from(name)))
    }

    /// Whether `name` is a legal flavor tag.
    pub fn is_valid(name: &str) -> bool {
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    }

    /// Build a flavor from arbitrary text by replacing illegal characters with `_`.
    pub fn sanitized(name: &str) -> Self {
        let cleaned: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        if cleaned.is_empty() {
            Self(Arc::from("_"))
        } else {
            Self(Arc::from(cleaned))
        }
    }

    /// The tag text.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flavor({})", self.0)
    }
}

impl AsRef<str> for Flavor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Flavor {
    type Error = FlavorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Flavor {
    type Error = FlavorError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Flavor> for String {
    fn from(flavor: Flavor) -> Self {
        flavor.0.to_string()
    }
}

impl std::str::FromStr for Flavor {
    type Err = FlavorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
