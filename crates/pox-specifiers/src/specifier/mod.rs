//! Specifier types for version matching

mod operator;
mod specifier;
mod specifier_set;
mod version_like;

use thiserror::Error;

pub use operator::Operator;
pub use specifier::Specifier;
pub use specifier_set::{Filter, SpecifierSet};
pub use version_like::VersionLike;

/// Error raised when a specifier cannot be constructed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecifierError {
    #[error("Invalid version specifier: unable to parse \"{0}\"")]
    InvalidSpecifier(String),
    #[error("Invalid version specifier: unsupported wildcard operator \"{0}\"")]
    UnsupportedWildcardOperator(Operator),
    #[error("Invalid version specifier: unsupported operator \"{0}\"")]
    UnsupportedOperator(String),
}
