//! Comparison operators for version specifiers

use std::fmt;
use std::str::FromStr;

use super::SpecifierError;

/// Comparison operators, listed in the order they are tried when parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Arbitrary string equality (===)
    ArbitraryEqual,
    /// Equal (==)
    Equal,
    /// Not equal (!=)
    NotEqual,
    /// Compatible release (~=)
    Compatible,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Less than (<)
    LessThan,
}

impl Operator {
    /// All operators in parse precedence order, longest token first
    pub const ALL: [Operator; 8] = [
        Operator::ArbitraryEqual,
        Operator::Equal,
        Operator::NotEqual,
        Operator::Compatible,
        Operator::GreaterThanOrEqual,
        Operator::LessThanOrEqual,
        Operator::GreaterThan,
        Operator::LessThan,
    ];

    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::ArbitraryEqual => "===",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::Compatible => "~=",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
        }
    }

    /// Check if this operator accepts a `*` wildcard in its version
    pub fn allows_wildcard(&self) -> bool {
        matches!(self, Operator::Equal | Operator::NotEqual)
    }

    /// Get all supported operator tokens
    pub fn supported_operators() -> Vec<&'static str> {
        Self::ALL.iter().map(Operator::as_str).collect()
    }
}

impl FromStr for Operator {
    type Err = SpecifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| SpecifierError::UnsupportedOperator(s.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
