//! Version parsing and ordering
//!
//! Versions follow the PEP 440 layout: `[N!]N(.N)*[{a|b|rc}N][.postN][.devN][+local]`.
//! Common alternate spellings (`alpha`, `beta`, `c`, `pre`, `preview`, `rev`, `r`,
//! `-N` post releases, a leading `v`) are accepted and normalized.
//!
//! Every numeric segment (epoch, release, pre, post, dev) must fit in a `u64`;
//! larger numbers are rejected as invalid versions. Oversized local segments are
//! kept and compared as text.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use thiserror::Error;

/// Error returned when a string cannot be parsed as a version
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid version: \"{0}\"")]
pub struct InvalidVersionError(pub String);

impl InvalidVersionError {
    pub fn new(version: impl Into<String>) -> Self {
        InvalidVersionError(version.into())
    }

    /// The string that failed to parse
    pub fn version(&self) -> &str {
        &self.0
    }
}

lazy_static! {
    static ref VERSION_RE: Regex = Regex::new(
        r"(?ix)
        ^\s*
        v?
        (?:(?P<epoch>[0-9]+)!)?
        (?P<release>[0-9]+(?:\.[0-9]+)*)
        (?P<pre>
            [-_.]?
            (?P<pre_l>alpha|a|beta|b|preview|pre|c|rc)
            [-_.]?
            (?P<pre_n>[0-9]+)?
        )?
        (?P<post>
            (?:-(?P<post_n1>[0-9]+))
            |
            (?:
                [-_.]?
                (?P<post_l>post|rev|r)
                [-_.]?
                (?P<post_n2>[0-9]+)?
            )
        )?
        (?P<dev>
            [-_.]?
            (?P<dev_l>dev)
            [-_.]?
            (?P<dev_n>[0-9]+)?
        )?
        (?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?
        \s*$"
    ).unwrap();

    static ref LOCAL_SEPARATOR_RE: Regex = Regex::new(r"[-_.]").unwrap();
}

/// Pre-release kinds, in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreRelease {
    Alpha,
    Beta,
    Rc,
}

impl PreRelease {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreRelease::Alpha => "a",
            PreRelease::Beta => "b",
            PreRelease::Rc => "rc",
        }
    }

    fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "a" | "alpha" => PreRelease::Alpha,
            "b" | "beta" => PreRelease::Beta,
            _ => PreRelease::Rc,
        }
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One dot-separated part of a local version label.
///
/// Alphanumeric segments sort before numeric ones, which the variant order encodes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LocalSegment {
    String(String),
    Number(u64),
}

impl fmt::Display for LocalSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalSegment::String(s) => write!(f, "{}", s),
            LocalSegment::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A parsed, totally ordered version
#[derive(Debug, Clone)]
pub struct Version {
    epoch: u64,
    release: Vec<u64>,
    pre: Option<(PreRelease, u64)>,
    post: Option<u64>,
    dev: Option<u64>,
    local: Vec<LocalSegment>,
}

impl Version {
    /// Create a final release from its release components
    pub fn new(release: impl Into<Vec<u64>>) -> Self {
        Version {
            epoch: 0,
            release: release.into(),
            pre: None,
            post: None,
            dev: None,
            local: Vec::new(),
        }
    }

    /// Parse a version string.
    ///
    /// Fails when the string does not match the grammar or when a numeric segment
    /// exceeds `u64::MAX`.
    pub fn parse(version: &str) -> Result<Self, InvalidVersionError> {
        let invalid = || InvalidVersionError::new(version);
        let caps = VERSION_RE.captures(version).ok_or_else(invalid)?;

        let epoch = match caps.name("epoch") {
            Some(m) => parse_number(m.as_str()).ok_or_else(invalid)?,
            None => 0,
        };

        let release = caps["release"]
            .split('.')
            .map(parse_number)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(invalid)?;

        let pre = match caps.name("pre_l") {
            Some(label) => Some((
                PreRelease::from_label(label.as_str()),
                optional_number(&caps, "pre_n").ok_or_else(invalid)?,
            )),
            None => None,
        };

        let post = if caps.name("post_n1").is_some() {
            Some(optional_number(&caps, "post_n1").ok_or_else(invalid)?)
        } else if caps.name("post_l").is_some() {
            Some(optional_number(&caps, "post_n2").ok_or_else(invalid)?)
        } else {
            None
        };

        let dev = match caps.name("dev_l") {
            Some(_) => Some(optional_number(&caps, "dev_n").ok_or_else(invalid)?),
            None => None,
        };

        let local = match caps.name("local") {
            Some(m) => LOCAL_SEPARATOR_RE
                .split(m.as_str())
                .map(|segment| match segment.parse::<u64>() {
                    Ok(n) => LocalSegment::Number(n),
                    Err(_) => LocalSegment::String(segment.to_ascii_lowercase()),
                })
                .collect(),
            None => Vec::new(),
        };

        Ok(Version {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        })
    }

    /// Set the epoch
    pub fn with_epoch(mut self, epoch: u64) -> Self {
        self.epoch = epoch;
        self
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Release components, e.g. `[1, 4, 5]` for `1.4.5`
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    pub fn pre(&self) -> Option<(PreRelease, u64)> {
        self.pre
    }

    pub fn post(&self) -> Option<u64> {
        self.post
    }

    pub fn dev(&self) -> Option<u64> {
        self.dev
    }

    pub fn local(&self) -> &[LocalSegment] {
        &self.local
    }

    /// Check if this is a pre-release or a development release
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some() || self.dev.is_some()
    }

    pub fn is_postrelease(&self) -> bool {
        self.post.is_some()
    }

    /// Release components with trailing zeros removed, so `1.0` and `1.0.0` compare equal
    fn trimmed_release(&self) -> &[u64] {
        let len = self
            .release
            .iter()
            .rposition(|&n| n != 0)
            .map_or(0, |i| i + 1);
        &self.release[..len]
    }

    /// Ordering key for everything after the release.
    ///
    /// dev-only < alpha < beta < rc < final < post. A missing dev number sorts above
    /// any dev release of the same pre/post, a missing post number below any post.
    fn suffix_key(&self) -> (u8, u64, Option<u64>, (bool, u64)) {
        match (self.pre, self.post, self.dev) {
            (None, None, Some(dev)) => (0, 0, None, dev_key(Some(dev))),
            (Some((kind, n)), post, dev) => (1 + kind as u8, n, post, dev_key(dev)),
            (None, None, None) => (4, 0, None, dev_key(None)),
            (None, Some(post), dev) => (5, 0, Some(post), dev_key(dev)),
        }
    }
}

/// `(false, n)` for `.devN`, `(true, 0)` for no dev segment, so absence sorts above every N
fn dev_key(dev: Option<u64>) -> (bool, u64) {
    match dev {
        Some(n) => (false, n),
        None => (true, 0),
    }
}

fn parse_number(s: &str) -> Option<u64> {
    s.parse().ok()
}

/// Numeric capture that defaults to zero when the label is present without a number
fn optional_number(caps: &Captures<'_>, name: &str) -> Option<u64> {
    match caps.name(name) {
        Some(m) => parse_number(m.as_str()),
        None => Some(0),
    }
}

impl FromStr for Version {
    type Err = InvalidVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| self.trimmed_release().cmp(other.trimmed_release()))
            .then_with(|| self.suffix_key().cmp(&other.suffix_key()))
            .then_with(|| self.local.cmp(&other.local))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.epoch.hash(state);
        self.trimmed_release().hash(state);
        self.suffix_key().hash(state);
        self.local.hash(state);
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}!", self.epoch)?;
        }
        let release: Vec<String> = self.release.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", release.join("."))?;
        if let Some((kind, n)) = self.pre {
            write!(f, "{}{}", kind, n)?;
        }
        if let Some(post) = self.post {
            write!(f, ".post{}", post)?;
        }
        if let Some(dev) = self.dev {
            write!(f, ".dev{}", dev)?;
        }
        if !self.local.is_empty() {
            let local: Vec<String> = self.local.iter().map(|s| s.to_string()).collect();
            write!(f, "+{}", local.join("."))?;
        }
        Ok(())
    }
}
