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

//! solpick engine
//!
//! Picks the Solidity compiler for a source file and drives it:
//!
//! - [`pragma`] - comment/string stripping and `pragma solidity` parsing
//! - [`resolve`] - resolution of pragma constraints against known releases
//! - [`registry`] - the process-wide registry of known compiler versions
//! - [`compiler`] - compiler invocation over the standard JSON interface
//! - [`extract`] - the `extract_version` / `extract_binary` entry points

pub mod compiler;
pub use compiler::*;

pub mod extract;
pub use extract::*;

pub mod pragma;
pub use pragma::*;

pub mod registry;
pub use registry::*;

pub mod resolve;
pub use resolve::*;
