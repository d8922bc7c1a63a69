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

//! Byte and address helpers.

use alloy_primitives::Address;
pub use hex::FromHexError;

/// Decode a hex string, with or without a leading `0x`.
///
/// # Example
///
/// ```rust
/// use solpick_common::safe_decode;
///
/// assert_eq!(safe_decode("0x6080").unwrap(), vec![0x60, 0x80]);
/// assert_eq!(safe_decode("6080").unwrap(), vec![0x60, 0x80]);
/// ```
pub fn safe_decode(hex_encoded: &str) -> Result<Vec<u8>, FromHexError> {
    hex::decode(hex_encoded.strip_prefix("0x").unwrap_or(hex_encoded))
}

/// A random 20-byte address as 40 lowercase hex characters, without `0x`.
pub fn random_address() -> String {
    hex::encode(Address::random())
}

/// A recognisable placeholder address for the given index.
///
/// The hex digits of `index` are repeated 40 times behind a `0x` prefix, so
/// `indexed_address(10)` is `0xaaaa…aaaa`. Only indices below 16 yield a
/// well-formed 20-byte address.
pub fn indexed_address(index: u64) -> String {
    format!("0x{}", format!("{index:x}").repeat(40))
}
