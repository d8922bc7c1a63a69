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

//! Removal of comments and string literal bodies from Solidity source.
//!
//! This is not a lexer. It only needs to find comment and string boundaries
//! reliably enough that a `pragma solidity` directive can be located with a
//! plain substring search afterwards. Malformed input (an unterminated block
//! comment or string) never fails: the output is truncated at that point.

use std::sync::OnceLock;

use regex::Regex;

/// Matches the start of anything that has to be removed.
fn void_start() -> &'static Regex {
    static VOID_START: OnceLock<Regex> = OnceLock::new();
    VOID_START.get_or_init(|| Regex::new(r#"//|/\*|"|'"#).unwrap())
}

/// Strip line comments, block comments and the contents of string literals.
///
/// - `// ...` is dropped up to, but not including, the next newline.
/// - `/* ... */` is replaced by a single space.
/// - A quoted literal is dropped together with both quotes. A quote preceded by
///   a backslash does not close the literal.
///
/// Everything else is copied verbatim, so the newline structure is preserved.
///
/// # Example
///
/// ```rust
/// use solpick_engine::strip_comments_and_strings;
///
/// let cleaned = strip_comments_and_strings("a /* b */ c // d\nstring s = \"e\";");
/// assert_eq!(cleaned, "a   c \nstring s = ;");
/// ```
pub fn strip_comments_and_strings(text: &str) -> String {
    let mut done = String::with_capacity(text.len());
    let mut todo = text;

    while let Some(m) = void_start().find(todo) {
        done.push_str(&todo[..m.start()]);
        let rest = &todo[m.end()..];

        match m.as_str() {
            "//" => match rest.find('\n') {
                // the newline itself is kept
                Some(end) => todo = &rest[end..],
                None => return done,
            },
            "/*" => match rest.find("*/") {
                Some(end) => {
                    done.push(' ');
                    todo = &rest[end + 2..];
                }
                None => return done,
            },
            quote => match find_closing_quote(rest, quote.as_bytes()[0]) {
                Some(end) => todo = &rest[end + 1..],
                // unterminated string
                None => return done,
            },
        }
    }

    done.push_str(todo);
    done
}

/// Byte offset of the first `quote` in `rest` not preceded by a backslash.
fn find_closing_quote(rest: &str, quote: u8) -> Option<usize> {
    let bytes = rest.as_bytes();
    (0..bytes.len()).find(|&i| bytes[i] == quote && (i == 0 || bytes[i - 1] != b'\\'))
}
