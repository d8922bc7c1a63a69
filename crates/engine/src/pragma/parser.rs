// solpick - Solidity compiler version picker
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Parsing of `pragma solidity` directives into version constraints.

use std::{fmt, str::FromStr, sync::OnceLock};

use regex::{Captures, Regex};

use super::PragmaError;

/// Comparison operator in front of a pragma version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PragmaOperator {
    /// No operator
    #[default]
    Unspecified,
    /// `^`, compatible release
    Caret,
    /// `=`
    Eq,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Ge,
    /// `<=`
    Le,
}

impl PragmaOperator {
    /// The operator as written in source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::Caret => "^",
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
        }
    }
}

impl fmt::Display for PragmaOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PragmaOperator {
    type Err = PragmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "" => Self::Unspecified,
            "^" => Self::Caret,
            "=" => Self::Eq,
            ">" => Self::Gt,
            "<" => Self::Lt,
            ">=" => Self::Ge,
            "<=" => Self::Le,
            _ => return Err(PragmaError::Grammar { line: s.to_string() }),
        })
    }
}

/// A `major.minor[.patch]` version as written in a pragma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PragmaVersion {
    /// Major version
    pub major: u64,
    /// Minor version
    pub minor: u64,
    /// Patch version, if written
    pub patch: Option<u64>,
}

impl PragmaVersion {
    /// New version with an explicit patch component.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch: Some(patch) }
    }
}

impl fmt::Display for PragmaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(patch) = self.patch {
            write!(f, ".{patch}")?;
        }
        Ok(())
    }
}

impl FromStr for PragmaVersion {
    type Err = PragmaError;

    /// Parses `major.minor[.patch]`, ignoring any whitespace around the dots.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let invalid = || PragmaError::Grammar { line: s.to_string() };

        let mut parts = compact.split('.').map(|p| p.parse::<u64>().map_err(|_| invalid()));
        let major = parts.next().ok_or_else(invalid)??;
        let minor = parts.next().ok_or_else(invalid)??;
        let patch = parts.next().transpose()?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self { major, minor, patch })
    }
}

/// An operator applied to a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionBound {
    /// The operator, possibly [`PragmaOperator::Unspecified`]
    pub operator: PragmaOperator,
    /// The version
    pub version: PragmaVersion,
}

impl fmt::Display for VersionBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}

/// The version constraint declared by a `pragma solidity` directive.
///
/// Only the lower bound is mandatory. The optional upper bound covers range
/// pragmas such as `>=0.4.0 <0.6.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PragmaConstraint {
    /// The first (lower) bound
    pub min: VersionBound,
    /// The second (upper) bound of a range pragma
    pub max: Option<VersionBound>,
}

impl PragmaConstraint {
    /// Operator of the first bound.
    pub fn min_operator(&self) -> PragmaOperator {
        self.min.operator
    }

    /// Version of the first bound.
    pub fn min_version(&self) -> PragmaVersion {
        self.min.version
    }

    /// Operator of the second bound, if any.
    pub fn max_operator(&self) -> Option<PragmaOperator> {
        self.max.map(|b| b.operator)
    }

    /// Version of the second bound, if any.
    pub fn max_version(&self) -> Option<PragmaVersion> {
        self.max.map(|b| b.version)
    }
}

impl fmt::Display for PragmaConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.min)?;
        if let Some(max) = &self.max {
            write!(f, " {max}")?;
        }
        Ok(())
    }
}

impl FromStr for PragmaConstraint {
    type Err = PragmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_pragma(s)
    }
}

fn pragma_regex() -> &'static Regex {
    static PRAGMA: OnceLock<Regex> = OnceLock::new();
    PRAGMA.get_or_init(|| {
        const VERSION: &str = r"\d+\s*\.\s*\d+(?:\s*\.\s*\d+)?";
        Regex::new(&format!(
            r"^pragma\s+solidity\s*(?P<min_op>\^|>=|<=|>|<|=)?\s*(?P<min>{VERSION})(?:\s*(?P<max_op>>=|<=|>|<|=)\s*(?P<max>{VERSION}))?"
        ))
        .unwrap()
    })
}

/// Parse a `pragma solidity` line into a [`PragmaConstraint`].
///
/// The line must start at the `pragma` keyword; a trailing `;` is allowed but
/// not required. Only the leading `[op] version [op version]` part is read, so
/// anything after a complete constraint (such as `|| ^0.7.0`) is ignored.
///
/// # Example
///
/// ```rust
/// use solpick_engine::{parse_pragma, PragmaOperator};
///
/// let constraint = parse_pragma("pragma solidity >=0.4.21<0.6.0").unwrap();
/// assert_eq!(constraint.min_operator(), PragmaOperator::Ge);
/// assert_eq!(constraint.min_version().to_string(), "0.4.21");
/// assert_eq!(constraint.max_operator(), Some(PragmaOperator::Lt));
/// assert_eq!(constraint.max_version().unwrap().to_string(), "0.6.0");
/// ```
pub fn parse_pragma(line: &str) -> Result<PragmaConstraint, PragmaError> {
    let caps = pragma_regex()
        .captures(line)
        .ok_or_else(|| PragmaError::Grammar { line: line.to_string() })?;

    let bound = |op: &str, version: &str| -> Result<Option<VersionBound>, PragmaError> {
        let Some(version) = caps.name(version) else { return Ok(None) };
        Ok(Some(VersionBound {
            operator: operator_at(&caps, op)?,
            version: version.as_str().parse()?,
        }))
    };

    let min =
        bound("min_op", "min")?.ok_or_else(|| PragmaError::Grammar { line: line.to_string() })?;
    let max = bound("max_op", "max")?;

    Ok(PragmaConstraint { min, max })
}

fn operator_at(caps: &Captures<'_>, name: &str) -> Result<PragmaOperator, PragmaError> {
    caps.name(name).map_or(Ok(PragmaOperator::Unspecified), |m| m.as_str().parse())
}
