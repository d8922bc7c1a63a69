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

//! Resolution of pragma constraints to concrete compiler releases.

use semver::{Version, VersionReq};
use tracing::{debug, trace};

use crate::{PragmaConstraint, PragmaError, PragmaOperator, VersionBound};

/// Compiler releases that are never selected, as `(major, minor, patch)`.
///
/// - `0.5.17` fails to compile a large share of otherwise valid sources.
pub const EXCLUDED_VERSIONS: &[(u64, u64, u64)] = &[(0, 5, 17)];

/// Whether `version` is on the [`EXCLUDED_VERSIONS`] list.
pub fn is_excluded(version: &Version) -> bool {
    EXCLUDED_VERSIONS.contains(&(version.major, version.minor, version.patch))
}

/// A bound as a `semver` comparator; a bound without operator is an exact match.
fn comparator(bound: &VersionBound) -> String {
    match bound.operator {
        PragmaOperator::Unspecified => format!("={}", bound.version),
        _ => bound.to_string(),
    }
}

impl PragmaConstraint {
    /// The requirement string handed to `semver`.
    ///
    /// Range pragmas keep both operators (`>=0.4.21,<0.6.0`). A single bound is
    /// reduced to an exact match on its version (`^0.5.0` becomes `=0.5.0`). A
    /// partial version such as `=0.8` still matches every `0.8.x` release.
    pub fn requirement_string(&self) -> String {
        match &self.max {
            Some(max) => format!("{},{}", comparator(&self.min), comparator(max)),
            None => format!("={}", self.min.version),
        }
    }

    /// The constraint as a [`VersionReq`].
    pub fn version_req(&self) -> Result<VersionReq, PragmaError> {
        let requirement = self.requirement_string();
        VersionReq::parse(&requirement)
            .map_err(|source| PragmaError::Requirement { requirement, source })
    }
}

/// Parse a registry entry, tolerating a leading `v`.
fn parse_candidate(candidate: &str) -> Option<Version> {
    let candidate = candidate.trim();
    Version::parse(candidate.strip_prefix('v').unwrap_or(candidate))
        .inspect_err(|err| trace!(candidate, %err, "skipping unparsable registry entry"))
        .ok()
}

/// Pick the first registry entry satisfying `constraint`.
///
/// The registry is walked in the given order and excluded releases are skipped.
/// `Ok(None)` means no usable compiler version is known.
///
/// # Example
///
/// ```rust
/// use solpick_engine::{parse_pragma, resolve};
///
/// let constraint = parse_pragma("pragma solidity ^0.8.0").unwrap();
/// let registry = ["0.7.6", "0.8.0", "0.8.1"];
/// assert_eq!(resolve(&constraint, &registry).unwrap().as_deref(), Some("0.8.0"));
/// ```
pub fn resolve<S: AsRef<str>>(
    constraint: &PragmaConstraint,
    registry: &[S],
) -> Result<Option<String>, PragmaError> {
    let req = constraint.version_req()?;
    trace!(%req, candidates = registry.len(), "resolving compiler version");

    for version in registry.iter().filter_map(|c| parse_candidate(c.as_ref())) {
        if !req.matches(&version) {
            continue;
        }
        if is_excluded(&version) {
            debug!(%version, "skipping excluded compiler release");
            continue;
        }
        debug!(%req, %version, "resolved compiler version");
        return Ok(Some(version.to_string()));
    }

    debug!(%req, "no known compiler release satisfies the pragma");
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_pragma;

    fn constraint(line: &str) -> PragmaConstraint {
        parse_pragma(line).unwrap()
    }

    #[test]
    fn test_requirement_string() {
        assert_eq!(constraint("pragma solidity ^0.5.0").requirement_string(), "=0.5.0");
        assert_eq!(constraint("pragma solidity >=0.5.0").requirement_string(), "=0.5.0");
        assert_eq!(constraint("pragma solidity 0.8").requirement_string(), "=0.8");
        assert_eq!(
            constraint("pragma solidity >=0.4.21<0.6.0").requirement_string(),
            ">=0.4.21,<0.6.0"
        );
        assert_eq!(constraint("pragma solidity 0.4.0 <0.6").requirement_string(), "=0.4.0,<0.6");
    }

    #[test]
    fn test_first_match_in_registry_order() {
        let c = constraint("pragma solidity ^0.8.0");
        let registry = ["0.7.6", "0.8.0", "0.8.1"];
        assert_eq!(resolve(&c, &registry).unwrap().as_deref(), Some("0.8.0"));

        // a partial version matches the whole minor series
        let c = constraint("pragma solidity 0.8");
        let newest_first = ["0.8.19", "0.8.18", "0.7.6"];
        assert_eq!(resolve(&c, &newest_first).unwrap().as_deref(), Some("0.8.19"));
    }

    #[test]
    fn test_range_constraint() {
        let c = constraint("pragma solidity >=0.4.21<0.6.0");
        let registry = ["0.8.0", "0.6.0", "0.5.17", "0.5.16", "0.4.26"];
        assert_eq!(resolve(&c, &registry).unwrap().as_deref(), Some("0.5.16"));
    }

    #[test]
    fn test_excluded_release_is_never_returned() {
        let registry = ["0.5.17", "0.5.16"];
        for line in [
            "pragma solidity ^0.5.0",
            "pragma solidity 0.5.17",
            "pragma solidity 0.5",
            "pragma solidity >=0.5.17<0.5.18",
            "pragma solidity >0.5.0 <0.6.0",
        ] {
            let resolved = resolve(&constraint(line), &registry).unwrap();
            assert_ne!(resolved.as_deref(), Some("0.5.17"), "{line}");
        }

        assert_eq!(resolve(&constraint("pragma solidity =0.5.17"), &["0.5.17"]).unwrap(), None);
        assert!(is_excluded(&Version::new(0, 5, 17)));
        assert!(!is_excluded(&Version::new(0, 5, 16)));
    }

    #[test]
    fn test_nothing_old_enough() {
        let registry = ["0.8.1", "0.6.12", "0.4.11"];
        for line in [
            "pragma solidity ^0.3.0",
            "pragma solidity <0.4.0",
            "pragma solidity <=0.4.10",
            "pragma solidity >=0.1.0<0.4.0",
        ] {
            assert_eq!(resolve(&constraint(line), &registry).unwrap(), None, "{line}");
        }
    }

    #[test]
    fn test_single_bound_is_an_exact_match() {
        let registry = ["0.5.16", "0.5.0", "0.4.26"];
        let resolved = resolve(&constraint("pragma solidity ^0.5.0"), &registry).unwrap();
        assert_eq!(resolved.as_deref(), Some("0.5.0"));

        let registry = ["0.8.21", "0.6.12", "0.6.0"];
        let resolved = resolve(&constraint("pragma solidity >=0.6.0"), &registry).unwrap();
        assert_eq!(resolved.as_deref(), Some("0.6.0"));

        let resolved = resolve(&constraint("pragma solidity ^0.6.1"), &registry).unwrap();
        assert_eq!(resolved, None);
    }

    #[test]
    fn test_empty_registry() {
        let empty: [&str; 0] = [];
        assert_eq!(resolve(&constraint("pragma solidity ^0.8.0"), &empty).unwrap(), None);
    }

    #[test]
    fn test_unparsable_entries_are_skipped() {
        let c = constraint("pragma solidity 0.6");
        let registry = ["nightly", "0.6", "v0.6.12", "0.6.11"];
        assert_eq!(resolve(&c, &registry).unwrap().as_deref(), Some("0.6.12"));
    }

    #[test]
    fn test_missing_patch_in_range() {
        let c = constraint("pragma solidity >=0.6 <0.7");
        let registry = ["0.7.0", "0.6.12"];
        assert_eq!(resolve(&c, &registry).unwrap().as_deref(), Some("0.6.12"));
    }

    #[test]
    fn test_owned_registry() {
        let registry = vec!["0.4.26".to_string(), "0.4.25".to_string()];
        let c = constraint("pragma solidity ^0.4.25");
        assert_eq!(resolve(&c, &registry).unwrap().as_deref(), Some("0.4.25"));
    }
}
