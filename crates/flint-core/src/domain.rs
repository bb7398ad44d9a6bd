//! Flavor-keyed domains.
//!
//! A domain is the set of values one flavor dimension can take, for
//! example every configured C/C++ platform. Domains are built once and then
//! only read, so they can be shared across threads without locking.

use indexmap::IndexMap;

use crate::error::DomainError;
use crate::flavor::Flavor;

/// A value that carries the flavor it belongs to.
pub trait Flavored {
    /// The owning flavor.
    fn flavor(&self) -> &Flavor;
}

/// A named, insertion-ordered mapping from [`Flavor`] to `T` with unique keys.
#[derive(Debug, Clone, PartialEq)]
pub struct FlavorDomain<T> {
    name: String,
    translation: IndexMap<Flavor, T>,
}

impl<T> FlavorDomain<T> {
    /// Build a domain from `(flavor, value)` pairs.
    ///
    /// A repeated flavor keeps the last value, at the position where the
    /// flavor first appeared.
    pub fn new(name: impl Into<String>, entries: impl IntoIterator<Item = (Flavor, T)>) -> Self {
        let mut translation = IndexMap::new();
        for (flavor, value) in entries {
            translation.insert(flavor, value);
        }
        Self {
            name: name.into(),
            translation,
        }
    }

    /// Display name used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up the value for `flavor`.
    pub fn get(&self, flavor: &Flavor) -> Result<&T, DomainError> {
        self.translation
            .get(flavor)
            .ok_or_else(|| DomainError::UnknownFlavor {
                domain: self.name.clone(),
                flavor: flavor.to_string(),
                available: self.translation.keys().map(Flavor::to_string).collect(),
            })
    }

    pub fn contains(&self, flavor: &Flavor) -> bool {
        self.translation.contains_key(flavor)
    }

    /// Iterate `(flavor, value)` pairs in insertion order.
    ///
    /// The iterator is `Clone`, so a pass can be restarted from any point.
    pub fn entries(&self) -> indexmap::map::Iter<'_, Flavor, T> {
        self.translation.iter()
    }

    pub fn flavors(&self) -> impl Iterator<Item = &Flavor> + Clone {
        self.translation.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + Clone {
        self.translation.values()
    }

    pub fn len(&self) -> usize {
        self.translation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translation.is_empty()
    }

    /// Find the member of this domain named by a target's flavor set.
    ///
    /// Returns `Ok(None)` when no flavor in the set belongs to the domain
    /// and an error when more than one does.
    pub fn select<'a>(
        &self,
        flavors: impl IntoIterator<Item = &'a Flavor>,
    ) -> Result<Option<(&Flavor, &T)>, DomainError> {
        let mut matched: Vec<(&Flavor, &T)> = Vec::new();
        for flavor in flavors {
            if let Some((key, value)) = self.translation.get_key_value(flavor) {
                if !matched.iter().any(|(seen, _)| *seen == key) {
                    matched.push((key, value));
                }
            }
        }
        match matched.len() {
            0 => Ok(None),
            1 => Ok(matched.pop()),
            _ => Err(DomainError::MultipleFlavors {
                domain: self.name.clone(),
                flavors: matched.iter().map(|(f, _)| f.to_string()).collect(),
            }),
        }
    }

    /// Like [`select`](Self::select), falling back to `default` when the set
    /// names no member of the domain.
    pub fn select_or<'a, 'b>(
        &'b self,
        flavors: impl IntoIterator<Item = &'a Flavor>,
        default: &'b T,
    ) -> Result<&'b T, DomainError> {
        Ok(self.select(flavors)?.map(|(_, v)| v).unwrap_or(default))
    }
}

impl<T: Flavored> FlavorDomain<T> {
    /// Build a domain keyed by each value's own flavor.
    pub fn from_flavored(name: impl Into<String>, values: impl IntoIterator<Item = T>) -> Self {
        Self::new(
            name,
            values.into_iter().map(|value| (value.flavor().clone(), value)),
        )
    }
}

impl<'a, T> IntoIterator for &'a FlavorDomain<T> {
    type Item = (&'a Flavor, &'a T);
    type IntoIter = indexmap::map::Iter<'a, Flavor, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}
