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

//! Entry points tying pragma extraction, version resolution and compiler
//! installation together.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr};
use foundry_compilers::solc::Solc;
use semver::Version;
use solpick_common::env::SOLC;
use tracing::{debug, info};

use crate::{extract_constraint, resolve, PragmaError, VersionRegistry};

/// Compiler binary used when no version can be resolved.
pub const DEFAULT_SOLC_BINARY: &str = "solc";

/// Resolve the compiler version for `source` against the process-wide registry.
///
/// Returns `Ok(None)` without touching the registry if the source declares no
/// `pragma solidity`, and `Ok(None)` if no known release satisfies it.
pub fn extract_version(source: &str) -> Result<Option<String>> {
    let Some(constraint) = extract_constraint(source)? else { return Ok(None) };
    let registry = VersionRegistry::global()?;
    debug!(%constraint, registry = registry.source_name(), "resolving pragma");
    Ok(resolve(&constraint, registry.versions())?)
}

/// Resolve the compiler version for `source` against an explicit registry.
pub fn extract_version_with<S: AsRef<str>>(
    source: &str,
    registry: &[S],
) -> Result<Option<String>, PragmaError> {
    match extract_constraint(source)? {
        Some(constraint) => resolve(&constraint, registry),
        None => Ok(None),
    }
}

/// The compiler binary to use when no version was resolved: `$SOLC` or `solc`.
pub fn default_binary() -> PathBuf {
    env::var_os(SOLC)
        .filter(|binary| !binary.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOLC_BINARY))
}

/// Make sure compiler `version` is installed and return its binary.
pub fn solc_exists(version: &str) -> Result<PathBuf> {
    let parsed = Version::parse(version.trim_start_matches('v'))
        .wrap_err_with(|| format!("invalid compiler version `{version}`"))?;
    let solc = Solc::find_or_install(&parsed)
        .wrap_err_with(|| format!("failed to install solc {parsed}"))?;
    info!(version = %parsed, binary = %solc.solc.display(), "using solc");
    Ok(solc.solc)
}

/// Pick the compiler binary for the Solidity file at `file`.
///
/// Returns the binary and the resolved version. Without a resolved version the
/// binary is [`default_binary`].
pub fn extract_binary(file: &Path) -> Result<(PathBuf, Option<String>)> {
    let source = fs::read_to_string(file)
        .wrap_err_with(|| format!("failed to read {}", file.display()))?;

    match extract_version(&source)? {
        Some(version) => Ok((solc_exists(&version)?, Some(version))),
        None => {
            let binary = default_binary();
            debug!(
                file = %file.display(),
                binary = %binary.display(),
                "no usable compiler version, using default binary"
            );
            Ok((binary, None))
        }
    }
}
