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

//! `versions` command

use eyre::Result;
use solpick_engine::VersionRegistry;

/// Print where the registry came from, then one version per line.
pub fn list_versions() -> Result<()> {
    let registry = VersionRegistry::global()?;
    tracing::debug!(count = registry.versions().len(), "Loaded version registry");

    println!("# {}", registry.source_name());
    for version in registry.versions() {
        println!("{version}");
    }
    Ok(())
}
