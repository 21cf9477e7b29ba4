//! SpecifierSet - conjunction of version specifiers

use std::fmt;
use std::str::FromStr;

use super::{Specifier, SpecifierError, VersionLike};
use crate::version::InvalidVersionError;

/// A comma separated list of specifiers that must all match.
///
/// An empty set matches every version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SpecifierSet {
    specifiers: Vec<Specifier>,
}

impl SpecifierSet {
    /// Create a set that matches any version
    pub fn empty() -> Self {
        SpecifierSet::default()
    }

    /// Parse a comma separated list such as `">=1.0, <2.0"`.
    ///
    /// Empty clauses are ignored. The first clause that fails to parse aborts the
    /// whole set.
    pub fn parse(specifiers: &str) -> Result<Self, SpecifierError> {
        let specifiers = specifiers
            .split(',')
            .map(str::trim)
            .filter(|clause| !clause.is_empty())
            .map(Specifier::parse)
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("Parsed {} specifier(s)", specifiers.len());

        Ok(SpecifierSet { specifiers })
    }

    /// Get the specifiers in parse order
    pub fn specifiers(&self) -> &[Specifier] {
        &self.specifiers
    }

    /// Iterate over the specifiers in parse order
    pub fn iter(&self) -> std::slice::Iter<'_, Specifier> {
        self.specifiers.iter()
    }

    /// Number of specifiers in the set
    pub fn len(&self) -> usize {
        self.specifiers.len()
    }

    /// Check if the set has no specifiers and therefore matches everything
    pub fn is_empty(&self) -> bool {
        self.specifiers.is_empty()
    }

    /// Check whether `candidate` satisfies every specifier.
    ///
    /// An unparsable version is returned as an error.
    pub fn contains(&self, candidate: &str) -> Result<bool, InvalidVersionError> {
        for specifier in &self.specifiers {
            if !specifier.contains(candidate)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Lazily yield the candidates that satisfy every specifier, in input order.
    ///
    /// Candidates that are not valid versions are skipped instead of reported.
    /// `prereleases` is accepted for API compatibility and currently ignored.
    pub fn filter<I>(&self, candidates: I, prereleases: Option<bool>) -> Filter<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: VersionLike,
    {
        let _ = prereleases;
        Filter {
            specifiers: self,
            candidates: candidates.into_iter(),
        }
    }

    fn admits<V: VersionLike + ?Sized>(&self, item: &V) -> bool {
        let candidate = item.version_str();
        match self.contains(&candidate) {
            Ok(matched) => matched,
            Err(err) => {
                log::debug!("Skipping candidate {:?}: {}", candidate, err);
                false
            }
        }
    }
}

/// Iterator returned by [`SpecifierSet::filter`]
#[derive(Debug, Clone)]
pub struct Filter<'a, I> {
    specifiers: &'a SpecifierSet,
    candidates: I,
}

impl<I> Iterator for Filter<'_, I>
where
    I: Iterator,
    I::Item: VersionLike,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let specifiers = self.specifiers;
        self.candidates.find(|item| specifiers.admits(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.candidates.size_hint().1)
    }
}

impl<'a> IntoIterator for &'a SpecifierSet {
    type Item = &'a Specifier;
    type IntoIter = std::slice::Iter<'a, Specifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.specifiers.iter()
    }
}

impl FromIterator<Specifier> for SpecifierSet {
    fn from_iter<T: IntoIterator<Item = Specifier>>(iter: T) -> Self {
        SpecifierSet {
            specifiers: iter.into_iter().collect(),
        }
    }
}

impl FromStr for SpecifierSet {
    type Err = SpecifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpecifierSet::parse(s)
    }
}

impl fmt::Display for SpecifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.specifiers.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", rendered.join(","))
    }
}
