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

//! Environment variable name constants for solpick configuration.
//!
//! This module provides constant string names for all environment variables read by
//! solpick, so the binary, the engine and the tests agree on a single spelling.
//!
//! # Environment Variables
//!
//! ## Compiler Selection
//! - [`SOLC`] - Compiler binary used when no version could be resolved
//! - [`SOLPICK_SOLC_ARGS`] - Extra arguments passed to the compiler
//!
//! ## Version Registry
//! - [`SOLPICK_SOLC_LIST_URL`] - Base URL of the release listing
//! - [`SOLPICK_OFFLINE`] - Skip the network listing entirely

/// Environment variable overriding the default compiler binary.
///
/// Only consulted when the source file carries no usable `pragma solidity`
/// directive, or when no known compiler release satisfies it. In that case the
/// binary named here is used instead of plain `solc` from `PATH`.
///
/// # Examples
///
/// ```bash
/// SOLC=/opt/solc-0.8.19 solpick binary Token.sol
/// ```
pub const SOLC: &str = "SOLC";

/// Environment variable holding extra compiler arguments.
///
/// The value is split on whitespace. When set, the arguments replace the default
/// `--allow-paths .,/` that follows `--standard-json` on the compiler command line.
///
/// # Examples
///
/// ```bash
/// SOLPICK_SOLC_ARGS="--allow-paths /work --base-path /work" solpick compile Token.sol
/// ```
pub const SOLPICK_SOLC_ARGS: &str = "SOLPICK_SOLC_ARGS";

/// Environment variable for the base URL of the compiler release listing.
///
/// The registry requests `<base>/<platform>/list.json` from this host.
///
/// # Default
///
/// [`DEFAULT_SOLC_LIST_URL`] when unset.
pub const SOLPICK_SOLC_LIST_URL: &str = "SOLPICK_SOLC_LIST_URL";

/// Default base URL of the compiler release listing.
pub const DEFAULT_SOLC_LIST_URL: &str = "https://binaries.soliditylang.org";

/// Environment variable forcing offline registry mode.
///
/// Any value other than an empty string, `0` or `false` makes the registry skip
/// the network listing and read the locally installed compilers instead.
///
/// # Related
///
/// Also available as the `--offline` CLI flag.
pub const SOLPICK_OFFLINE: &str = "SOLPICK_OFFLINE";

/// Returns `true` if the given environment variable is set to a truthy value.
pub fn is_truthy(name: &str) -> bool {
    std::env::var(name)
        .map(|v| {
            let v = v.trim();
            !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false")
        })
        .unwrap_or(false)
}
