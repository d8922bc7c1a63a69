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

//! `compile` command

use std::path::Path;

use eyre::{Result, WrapErr};
use solpick_engine::{extract_binary, StandardJsonCompiler};

/// Compile `file` and print the compiler artifacts as JSON.
///
/// Without an explicit `solc`, the binary is picked from the file's pragma.
/// `solc_args` takes precedence over `SOLPICK_SOLC_ARGS`.
pub fn compile_file(
    file: &Path,
    solc: Option<&Path>,
    settings: Option<&Path>,
    solc_args: Option<&str>,
) -> Result<()> {
    let binary = match solc {
        Some(solc) => solc.to_path_buf(),
        None => extract_binary(file)?.0,
    };

    let mut compiler = StandardJsonCompiler::from_env(binary);
    if let Some(args) = solc_args.filter(|args| !args.trim().is_empty()) {
        compiler = compiler.with_extra_args(args);
    }

    tracing::info!(file = %file.display(), binary = %compiler.binary().display(), "Compiling");
    let output = compiler
        .compile(file, settings)
        .wrap_err_with(|| format!("failed to compile {}", file.display()))?;

    for warning in output.warnings() {
        tracing::warn!("{}", warning.display_message());
    }

    println!("{}", serde_json::to_string_pretty(&output.artifacts)?);
    Ok(())
}
