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

//! `pragma` command

use std::{fs, path::Path};

use eyre::{Result, WrapErr};
use solpick_engine::extract_constraint;

use super::NONE;

/// Print the pragma constraint of `file` and the requirement it resolves with.
pub fn print_pragma(file: &Path) -> Result<()> {
    let source = fs::read_to_string(file)
        .wrap_err_with(|| format!("failed to read {}", file.display()))?;

    match extract_constraint(&source)? {
        Some(constraint) => {
            println!("pragma: {constraint}");
            println!("requirement: {}", constraint.version_req()?);
        }
        None => println!("{NONE}"),
    }
    Ok(())
}
