//! Version specifier matching compatible with Python packaging
//!
//! This crate parses comparison specifiers such as `>=1.2,<2.0`, `~=1.4` or
//! `==1.2.*`, checks versions against them, and filters candidate lists.

pub mod specifier;
mod version;

pub use specifier::{Filter, Operator, Specifier, SpecifierError, SpecifierSet, VersionLike};
pub use version::{InvalidVersionError, LocalSegment, PreRelease, Version};
