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

//! solpick common - shared functionality for solpick components
//!
//! This crate provides the pieces used by both the solpick binary and the
//! engine crate: logging setup, environment variable names, and small
//! byte/address helpers.

/// Hex decoding and placeholder address generation
pub mod bytes;
/// Environment variable names read across the workspace
pub mod env;
/// Logging setup and utilities for consistent logging across solpick components
pub mod logging;

pub use bytes::*;
