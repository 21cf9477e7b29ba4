//! Candidate coercion for filtering

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

use crate::version::Version;

/// Anything that can report its own version string.
///
/// Implement this for release descriptors so they can be passed to
/// [`SpecifierSet::filter`](super::SpecifierSet::filter) directly.
pub trait VersionLike {
    fn version_str(&self) -> Cow<'_, str>;
}

impl VersionLike for str {
    fn version_str(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl VersionLike for String {
    fn version_str(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl VersionLike for Cow<'_, str> {
    fn version_str(&self) -> Cow<'_, str> {
        Cow::Borrowed(&**self)
    }
}

impl VersionLike for Version {
    fn version_str(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

impl<T: VersionLike + ?Sized> VersionLike for &T {
    fn version_str(&self) -> Cow<'_, str> {
        (**self).version_str()
    }
}

impl<T: VersionLike + ?Sized> VersionLike for Box<T> {
    fn version_str(&self) -> Cow<'_, str> {
        (**self).version_str()
    }
}

impl<T: VersionLike + ?Sized> VersionLike for Rc<T> {
    fn version_str(&self) -> Cow<'_, str> {
        (**self).version_str()
    }
}

impl<T: VersionLike + ?Sized> VersionLike for Arc<T> {
    fn version_str(&self) -> Cow<'_, str> {
        (**self).version_str()
    }
}
