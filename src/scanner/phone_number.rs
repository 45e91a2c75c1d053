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

use super::enums::{NumberFormat, UsageType};

/// The structured representation of one parsed phone number.
///
/// [`PhoneNumberScanner::parse`](super::scanner::PhoneNumberScanner::parse)
/// returns a finished value; afterwards the setters let a caller adjust
/// fields before re-rendering. Unresolved fields are empty strings (or
/// `None` for the usage type), never placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhoneNumber {
    format: NumberFormat,
    international_prefix: String,
    calling_code: String,
    country: String,
    number_type: Option<UsageType>,
    national_number: String,
    extension: String,
    params: Vec<(String, Option<String>)>,
}

impl PhoneNumber {
    pub fn new() -> Self {
        Self::default()
    }

    /// The textual convention this number was parsed from, and the default
    /// one it renders to.
    pub fn format(&self) -> NumberFormat {
        self.format
    }

    pub fn set_format(&mut self, format: NumberFormat) {
        self.format = format;
    }

    /// The international dialing prefix literally present in the input,
    /// e.g. `"00"` or `"+"`. Empty when none was found.
    pub fn international_prefix(&self) -> &str {
        &self.international_prefix
    }

    pub fn set_international_prefix(&mut self, international_prefix: impl Into<String>) {
        self.international_prefix = international_prefix.into();
    }

    /// The resolved calling code digits, e.g. `"971"`. Empty if unresolved.
    pub fn calling_code(&self) -> &str {
        &self.calling_code
    }

    pub fn set_calling_code(&mut self, calling_code: impl Into<String>) {
        self.calling_code = calling_code.into();
    }

    /// The resolved ISO alpha-2 country. Empty if unresolved.
    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn set_country(&mut self, country: impl Into<String>) {
        self.country = country.into();
    }

    pub fn number_type(&self) -> Option<UsageType> {
        self.number_type
    }

    pub fn set_number_type(&mut self, number_type: UsageType) {
        self.number_type = Some(number_type);
    }

    pub fn clear_number_type(&mut self) {
        self.number_type = None;
    }

    /// The national significant number. Always pure ASCII digits.
    pub fn national_number(&self) -> &str {
        &self.national_number
    }

    /// Stores the national number, keeping only ASCII digits so the
    /// digits-only invariant holds no matter what the caller passes.
    pub fn set_national_number(&mut self, national_number: impl Into<String>) {
        let mut national_number = national_number.into();
        national_number.retain(|c| c.is_ascii_digit());
        self.national_number = national_number;
    }

    /// The extension digits, from a `~` marker or an `ext` parameter.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn set_extension(&mut self, extension: impl Into<String>) {
        let mut extension = extension.into();
        extension.retain(|c| c.is_ascii_digit());
        self.extension = extension;
    }

    /// Generic RFC 3966 parameters in insertion order. A `None` value is a
    /// bare `;key` with no `=`.
    pub fn params(&self) -> &[(String, Option<String>)] {
        &self.params
    }

    /// The value of one parameter: `None` when the key is absent,
    /// `Some(None)` for a bare key.
    pub fn param(&self, key: &str) -> Option<Option<&str>> {
        self.params
            .iter()
            .find(|(stored_key, _)| stored_key == key)
            .map(|(_, value)| value.as_deref())
    }

    /// Sets a parameter. An existing key keeps its position; a new one is
    /// appended, preserving insertion order.
    pub fn set_param(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        if let Some(entry) = self.params.iter_mut().find(|(stored_key, _)| *stored_key == key) {
            entry.1 = value;
        } else {
            self.params.push((key, value));
        }
    }

    /// Removes a parameter, returning its value when it was present.
    pub fn remove_param(&mut self, key: &str) -> Option<Option<String>> {
        let index = self.params.iter().position(|(stored_key, _)| stored_key == key)?;
        Some(self.params.remove(index).1)
    }
}

#[cfg(test)]
mod tests {
    use super::PhoneNumber;

    #[test]
    fn national_number_keeps_digits_only() {
        let mut number = PhoneNumber::new();
        number.set_national_number("202 555-0123");
        assert_eq!(number.national_number(), "2025550123");
    }

    #[test]
    fn params_preserve_insertion_order() {
        let mut number = PhoneNumber::new();
        number.set_param("foo", Some("1".to_owned()));
        number.set_param("bar", None);
        number.set_param("foo", Some("2".to_owned()));

        assert_eq!(
            number.params(),
            &[
                ("foo".to_owned(), Some("2".to_owned())),
                ("bar".to_owned(), None),
            ]
        );
        assert_eq!(number.param("bar"), Some(None));
        assert_eq!(number.param("missing"), None);

        assert_eq!(number.remove_param("foo"), Some(Some("2".to_owned())));
        assert_eq!(number.param("foo"), None);
    }
}
