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

//! `pragma solidity` extraction.
//!
//! Source text flows through three steps:
//!
//! 1. [`strip_comments_and_strings`] removes comments and string literal bodies,
//!    so commented-out or quoted pragmas are never picked up.
//! 2. [`find_pragma_line`] locates the first line declaring `pragma solidity`.
//! 3. [`parse_pragma`] turns that line into a [`PragmaConstraint`].
//!
//! Resolving the constraint against known compiler releases lives in
//! [`crate::resolve`].

mod parser;
pub use parser::*;

mod strip;
pub use strip::*;

use thiserror::Error;
use tracing::{debug, trace};

/// The directive marker searched for in cleaned source text.
pub const PRAGMA_SOLIDITY: &str = "pragma solidity";

/// Errors raised while interpreting a `pragma solidity` directive.
#[derive(Debug, Error)]
pub enum PragmaError {
    /// The directive does not follow the `pragma solidity [op]version [op version]` grammar
    #[error("`{line}` is not a supported `pragma solidity` directive")]
    Grammar {
        /// The offending text
        line: String,
    },

    /// The constraint could not be turned into a semantic version requirement
    #[error("invalid version requirement `{requirement}`: {source}")]
    Requirement {
        /// The requirement string built from the pragma
        requirement: String,
        /// Parser error from `semver`
        source: semver::Error,
    },
}

/// Find the first `pragma solidity` line in already cleaned source text.
///
/// The returned slice starts at the `pragma` keyword, with trailing whitespace
/// and a single trailing `;` removed. Later pragma lines are ignored.
pub fn find_pragma_line(cleaned: &str) -> Option<&str> {
    let line = cleaned.split('\n').find(|line| line.contains(PRAGMA_SOLIDITY))?.trim_end();
    let line = line.strip_suffix(';').unwrap_or(line);
    line.find(PRAGMA_SOLIDITY).map(|start| &line[start..])
}

/// Extract the version constraint declared by a Solidity source.
///
/// Returns `Ok(None)` if the source has no `pragma solidity` directive outside of
/// comments and strings. A directive that is present but malformed is an error.
pub fn extract_constraint(source: &str) -> Result<Option<PragmaConstraint>, PragmaError> {
    let cleaned = strip_comments_and_strings(source);
    let Some(line) = find_pragma_line(&cleaned) else {
        debug!("no `pragma solidity` directive found");
        return Ok(None);
    };

    trace!(line, "found pragma line");
    parse_pragma(line).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_pragma_line_trims() {
        let cleaned = "\n  pragma solidity ^0.8.0;  \ncontract C {}";
        assert_eq!(find_pragma_line(cleaned), Some("pragma solidity ^0.8.0"));
    }

    #[test]
    fn test_find_pragma_line_starts_at_solidity_pragma() {
        let cleaned = "pragma experimental ABIEncoderV2; pragma solidity 0.5.0;";
        assert_eq!(find_pragma_line(cleaned), Some("pragma solidity 0.5.0"));
    }

    #[test]
    fn test_find_pragma_line_first_match_wins() {
        let cleaned = "pragma solidity ^0.6.0;\npragma solidity ^0.7.0;";
        assert_eq!(find_pragma_line(cleaned), Some("pragma solidity ^0.6.0"));
    }

    #[test]
    fn test_find_pragma_line_missing() {
        assert_eq!(find_pragma_line("contract C {}"), None);
        assert_eq!(find_pragma_line("pragma abicoder v2;"), None);
    }

    #[test]
    fn test_extract_constraint_skips_comments() {
        let source = "// pragma solidity 0.4.0;\n/* pragma solidity 0.4.1; */\npragma solidity ^0.8.0;\n";
        let constraint = extract_constraint(source).unwrap().unwrap();
        assert_eq!(constraint.to_string(), "^0.8.0");
    }

    #[test]
    fn test_extract_constraint_absent() {
        assert!(extract_constraint("contract C { string s = \"pragma solidity 0.5.0;\"; }")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_extract_constraint_propagates_grammar_errors() {
        let err = extract_constraint("pragma solidity ~0.8.0;").unwrap_err();
        assert!(matches!(err, PragmaError::Grammar { .. }));
    }
}
