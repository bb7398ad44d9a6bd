//! Flavor tags and flavor-keyed domains for the Flint build tool.
//!
//! A [`Flavor`] names one variant of a build (a C/C++ platform, a linker
//! mode, ...). A [`FlavorDomain`] groups the values a single dimension can
//! take, so a build target's flavor set can be mapped back to the concrete
//! value it asks for.

pub mod domain;
pub mod error;
pub mod flavor;

pub use domain::{FlavorDomain, Flavored};
pub use error::{DomainError, FlavorError};
pub use flavor::Flavor;
