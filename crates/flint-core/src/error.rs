//! Error types for flavor parsing and domain lookups.

/// Errors raised when constructing a [`Flavor`](crate::Flavor).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlavorError {
    /// The tag is empty or contains characters outside `[A-Za-z0-9_.-]`.
    #[error("invalid flavor name '{name}': flavors may only contain letters, digits, '_', '.' and '-'")]
    InvalidName {
        /// The rejected tag.
        name: String,
    },
}

/// Errors raised by [`FlavorDomain`](crate::FlavorDomain) lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// The requested flavor is not a member of the domain.
    #[error("{domain} '{flavor}' is not configured (available: {})", available.join(", "))]
    UnknownFlavor {
        /// Display name of the domain.
        domain: String,
        /// The flavor that was looked up.
        flavor: String,
        /// Every flavor the domain does contain, in insertion order.
        available: Vec<String>,
    },

    /// A flavor set names more than one member of the domain.
    #[error("multiple {domain} flavors requested: {}", flavors.join(", "))]
    MultipleFlavors {
        /// Display name of the domain.
        domain: String,
        /// The conflicting flavors.
        flavors: Vec<String>,
    },
}
