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

//! `version` and `binary` commands

use std::{fs, path::Path};

use eyre::{Result, WrapErr};
use solpick_engine::{extract_binary, extract_version};

use super::NONE;

/// Print the compiler version resolved for `file`, or `none`.
pub fn print_version(file: &Path) -> Result<()> {
    let source = fs::read_to_string(file)
        .wrap_err_with(|| format!("failed to read {}", file.display()))?;
    let version = extract_version(&source)?;
    tracing::info!(file = %file.display(), ?version, "Resolved compiler version");

    println!("{}", version.as_deref().unwrap_or(NONE));
    Ok(())
}

/// Print the compiler binary and version picked for `file`.
pub fn print_binary(file: &Path) -> Result<()> {
    let (binary, version) = extract_binary(file)?;

    println!("{}", binary.display());
    println!("{}", version.as_deref().unwrap_or(NONE));
    Ok(())
}
