// Copyright (C) 2026 The rphonescan Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::borrow::Cow;

/// Strips prefix of given string Cow. Returns option with `Some` if
/// prefix found and stripped.
///
/// Calls `drain` if string is owned and returns slice if string is borrowed
pub fn strip_cow_prefix<'a>(cow: Cow<'a, str>, prefix: &str) -> Option<Cow<'a, str>> {
    match cow {
        Cow::Borrowed(s) => s.strip_prefix(prefix).map(Cow::Borrowed),
        Cow::Owned(mut s) => {
            if s.starts_with(prefix) {
                s.drain(0..prefix.len());
                return Some(Cow::Owned(s));
            }
            None
        }
    }
}

/// Returns the leading substring of `s` that is `n` characters long, or all
/// of `s` when it is shorter. Candidate lists in the prefix matcher are
/// measured in characters (the fullwidth plus sign is multi-byte), so the
/// byte boundary has to be recomputed per length.
pub fn leading_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((byte_index, _)) => &s[..byte_index],
        None => s,
    }
}

/// Advances past the first `n` characters of `s`.
pub fn advance_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((byte_index, _)) => &s[byte_index..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{advance_chars, leading_chars, strip_cow_prefix};

    #[test]
    fn test_strip_cow_prefix() {
        let str_to_strip = Cow::Owned("971501234567".to_owned());
        let stripped = strip_cow_prefix(str_to_strip, "971");
        assert_eq!(stripped, Some(Cow::Owned("501234567".to_owned())));

        let str_to_strip = Cow::Borrowed("501234567");
        let stripped = strip_cow_prefix(str_to_strip, "971");
        assert_eq!(stripped, None)
    }

    #[test]
    fn test_char_slicing() {
        assert_eq!(leading_chars("0011 54", 4), "0011");
        assert_eq!(leading_chars("＋44", 1), "＋");
        assert_eq!(leading_chars("00", 4), "00");

        assert_eq!(advance_chars("＋44", 1), "44");
        assert_eq!(advance_chars("12", 5), "");
    }
}
