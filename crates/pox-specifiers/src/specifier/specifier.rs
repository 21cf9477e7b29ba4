//! Single version specifier implementation

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use super::{Operator, SpecifierError};
use crate::version::{InvalidVersionError, Version};

lazy_static! {
    // Alternation order follows Operator::ALL, so `===` wins over `==`
    static ref SPECIFIER_RE: Regex = Regex::new(&format!(
        r"^\s*({})\s*(\S.*?)\s*$",
        Operator::ALL
            .iter()
            .map(|op| regex::escape(op.as_str()))
            .collect::<Vec<_>>()
            .join("|")
    ))
    .unwrap();
}

/// A single version specifier (e.g., ">=1.0" or "==1.2.*")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Specifier {
    operator: Operator,
    version: String,
}

impl Specifier {
    /// Parse a specifier clause such as `">= 1.0"`
    pub fn parse(spec: &str) -> Result<Self, SpecifierError> {
        let caps = SPECIFIER_RE
            .captures(spec)
            .ok_or_else(|| SpecifierError::InvalidSpecifier(spec.to_string()))?;

        let operator: Operator = caps[1].parse()?;
        let version = caps[2].trim().to_string();

        if version.contains('*') && !operator.allows_wildcard() {
            return Err(SpecifierError::UnsupportedWildcardOperator(operator));
        }

        log::trace!("Parsed specifier {:?} as {}{}", spec, operator, version);

        Ok(Specifier { operator, version })
    }

    /// Get the operator
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Get the version expression exactly as written
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Check if the version expression contains a `*` wildcard
    pub fn is_wildcard(&self) -> bool {
        self.wildcard_prefix().is_some()
    }

    fn wildcard_prefix(&self) -> Option<&str> {
        self.version.find('*').map(|pos| &self.version[..pos])
    }

    /// Check whether `candidate` satisfies this specifier.
    ///
    /// Version parse failures on either side are returned as errors rather than
    /// treated as a mismatch.
    pub fn contains(&self, candidate: &str) -> Result<bool, InvalidVersionError> {
        let candidate = candidate.trim();

        if let Some(prefix) = self.wildcard_prefix() {
            let matched = candidate.starts_with(prefix);
            return Ok(match self.operator {
                Operator::NotEqual => !matched,
                _ => matched,
            });
        }

        match self.operator {
            Operator::ArbitraryEqual => Ok(candidate == self.version),
            Operator::Compatible => {
                let (candidate, spec) = self.parse_both(candidate)?;
                let upper = compatible_upper_bound(&spec)?;
                Ok(spec <= candidate && candidate < upper)
            }
            Operator::Equal => self.parse_both(candidate).map(|(c, s)| c == s),
            Operator::NotEqual => self.parse_both(candidate).map(|(c, s)| c != s),
            Operator::GreaterThan => self.parse_both(candidate).map(|(c, s)| c > s),
            Operator::GreaterThanOrEqual => self.parse_both(candidate).map(|(c, s)| c >= s),
            Operator::LessThan => self.parse_both(candidate).map(|(c, s)| c < s),
            Operator::LessThanOrEqual => self.parse_both(candidate).map(|(c, s)| c <= s),
        }
    }

    fn parse_both(&self, candidate: &str) -> Result<(Version, Version), InvalidVersionError> {
        Ok((Version::parse(candidate)?, Version::parse(&self.version)?))
    }
}

/// Exclusive upper bound for `~=`: `1.4.5` gives `1.5`, `2` gives `3`
fn compatible_upper_bound(version: &Version) -> Result<Version, InvalidVersionError> {
    let invalid = || InvalidVersionError::new(version.to_string());
    let release = match version.release() {
        [] => return Err(invalid()),
        [major] => vec![major.checked_add(1).ok_or_else(invalid)?],
        [major, minor, ..] => vec![*major, minor.checked_add(1).ok_or_else(invalid)?],
    };
    Ok(Version::new(release).with_epoch(version.epoch()))
}

impl FromStr for Specifier {
    type Err = SpecifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Specifier::parse(s)
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(s: &str) -> Specifier {
        Specifier::parse(s).unwrap()
    }

    #[test]
    fn test_parse() {
        let s = spec(">=1.0");
        assert_eq!(s.operator(), Operator::GreaterThanOrEqual);
        assert_eq!(s.version(), "1.0");

        let s = spec("  ~=  1.4.5  ");
        assert_eq!(s.operator(), Operator::Compatible);
        assert_eq!(s.version(), "1.4.5");

        assert_eq!(spec("===1.0").operator(), Operator::ArbitraryEqual);
        assert_eq!(spec("==1.0").operator(), Operator::Equal);
        assert_eq!(spec("<=1.0").operator(), Operator::LessThanOrEqual);
        assert_eq!(spec("<1.0").operator(), Operator::LessThan);
        assert_eq!(spec(">1.0").operator(), Operator::GreaterThan);
        assert_eq!(spec("!=1.0").operator(), Operator::NotEqual);
    }

    #[test]
    fn test_parse_keeps_version_verbatim() {
        assert_eq!(spec("==V1.0.0-RC1").version(), "V1.0.0-RC1");
        assert_eq!(spec("==1.2.*").version(), "1.2.*");
        assert_eq!(spec("===foo bar").version(), "foo bar");
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "   ", "1.0", "=1.0", "==", ">=   ", "~1.0", "^1.0", "=>1.0"] {
            assert_eq!(
                Specifier::parse(input),
                Err(SpecifierError::InvalidSpecifier(input.to_string())),
                "{:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_rejects_embedded_newline() {
        assert_eq!(
            Specifier::parse("==1.0\nx"),
            Err(SpecifierError::InvalidSpecifier("==1.0\nx".to_string()))
        );
        assert_eq!(spec("==1.0\n").version(), "1.0");
    }

    #[test]
    fn test_parse_rejects_unsupported_wildcards() {
        for (input, op) in [
            (">1.*", Operator::GreaterThan),
            (">=1.*", Operator::GreaterThanOrEqual),
            ("<1.*", Operator::LessThan),
            ("<=1.*", Operator::LessThanOrEqual),
            ("~=1.*", Operator::Compatible),
            ("===1.*", Operator::ArbitraryEqual),
        ] {
            assert_eq!(
                Specifier::parse(input),
                Err(SpecifierError::UnsupportedWildcardOperator(op))
            );
        }
    }

    #[test]
    fn test_display_round_trip() {
        for input in ["===1.0", "==1.2.*", "!=1.5", "~=1.4.5", ">=1.0", "<=2", ">0.1a1", "<3.0.dev0"] {
            assert_eq!(spec(input).to_string(), input);
        }
        assert_eq!(spec(" >=  1.0 ").to_string(), ">=1.0");
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(spec(">=1.0"), spec(" >= 1.0"));
        assert_ne!(spec(">=1.0"), spec(">=1.0.0"));
        assert_ne!(spec(">=1.0"), spec(">1.0"));
    }

    #[test]
    fn test_wildcard_equality() {
        let s = spec("==1.2.*");
        assert!(s.is_wildcard());
        assert!(s.contains("1.2.5").unwrap());
        assert!(s.contains("1.2").unwrap());
        assert!(!s.contains("1.3.0").unwrap());
        assert!(s.contains(" 1.2.0 ").unwrap());
    }

    #[test]
    fn test_wildcard_inequality() {
        let s = spec("!=1.2.*");
        assert!(!s.contains("1.2.5").unwrap());
        assert!(s.contains("1.3.0").unwrap());
    }

    #[test]
    fn test_wildcard_matches_prefix_before_first_marker() {
        let s = spec("==1.**");
        assert!(s.contains("1.9").unwrap());
        let s = spec("==1.*.3.*");
        assert!(s.contains("1.7").unwrap());
        assert!(!s.contains("2.0").unwrap());
        // Prefix matching does not parse the candidate
        assert!(s.contains("1.anything").unwrap());
    }

    #[test]
    fn test_equality() {
        assert!(spec("==1.0").contains("1.0.0").unwrap());
        assert!(spec("==1.0").contains("v1.0").unwrap());
        assert!(!spec("==1.0").contains("1.0.1").unwrap());
        assert!(spec("!=1.0").contains("1.0.1").unwrap());
        assert!(!spec("!=1.0").contains("1.0.0").unwrap());
    }

    #[test]
    fn test_ordering_operators() {
        assert!(spec(">1.0").contains("1.0.1").unwrap());
        assert!(!spec(">1.0").contains("1.0").unwrap());
        assert!(spec(">=1.0").contains("1.0").unwrap());
        assert!(!spec(">=1.0").contains("1.0rc1").unwrap());
        assert!(spec("<2.0").contains("1.9.9").unwrap());
        assert!(!spec("<2.0").contains("2.0").unwrap());
        assert!(spec("<=2.0").contains("2.0.0").unwrap());
        assert!(!spec("<=2.0").contains("2.0.post1").unwrap());
    }

    #[test]
    fn test_compatible_release() {
        let s = spec("~=1.4.5");
        assert!(s.contains("1.4.5").unwrap());
        assert!(s.contains("1.4.9").unwrap());
        assert!(!s.contains("1.5.0").unwrap());
        assert!(!s.contains("1.4.0").unwrap());

        let s = spec("~=2");
        assert!(s.contains("2.9").unwrap());
        assert!(!s.contains("3.0").unwrap());
        assert!(!s.contains("1.9").unwrap());

        let s = spec("~=1.4");
        assert!(s.contains("1.9").unwrap());
        assert!(!s.contains("2.0").unwrap());
    }

    #[test]
    fn test_compatible_upper_bound() {
        let bound = |s: &str| compatible_upper_bound(&Version::parse(s).unwrap()).unwrap();
        assert_eq!(bound("1.4.5"), Version::parse("1.5").unwrap());
        assert_eq!(bound("1.4"), Version::parse("1.5").unwrap());
        assert_eq!(bound("2"), Version::parse("3").unwrap());
        assert_eq!(bound("1.4.5rc1").release(), &[1, 5]);
        assert_eq!(bound("1!1.4").to_string(), "1!1.5");

        assert!(compatible_upper_bound(&Version::new(Vec::new())).is_err());
    }

    #[test]
    fn test_arbitrary_equality() {
        assert!(!spec("===1.0").contains("1.0.0").unwrap());
        assert!(spec("===1.0").contains("1.0").unwrap());
        assert!(spec("===1.0").contains(" 1.0 ").unwrap());
        assert!(spec("===foobar").contains("foobar").unwrap());
        assert!(!spec("===foobar").contains("1.0").unwrap());
    }

    #[test]
    fn test_invalid_version_propagates() {
        let err = spec(">=1.0").contains("not-a-version").unwrap_err();
        assert_eq!(err.version(), "not-a-version");

        let err = spec("==banana").contains("1.0").unwrap_err();
        assert_eq!(err.version(), "banana");

        assert!(spec("~=1.0").contains("").is_err());
    }
}
