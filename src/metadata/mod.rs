//! The injected, read-only data source the engine runs on.
//!
//! A [`NumberMetadata`] value is built once at startup from per-calling-code
//! entries and never mutated afterwards, so it can be shared freely between
//! threads. Regex patterns are kept as their string sources; the engine
//! compiles them on demand through its cache.

use std::collections::HashMap;

use crate::scanner::errors::UnknownCallingCodeError;
use crate::scanner::UsageType;

/// One way a number under a country can be used, together with the pattern
/// and digit-count constraints that identify it.
///
/// Declaration order is semantically load-bearing: classification takes the
/// first matching pattern, not the best one, so these are kept in an ordered
/// list rather than a map.
#[derive(Debug, Clone)]
pub struct UsagePattern {
    usage: UsageType,
    pattern: String,
    national_lengths: Vec<usize>,
    local_lengths: Vec<usize>,
}

impl UsagePattern {
    pub fn new(usage: UsageType, pattern: impl Into<String>) -> Self {
        Self {
            usage,
            pattern: pattern.into(),
            national_lengths: Vec::new(),
            local_lengths: Vec::new(),
        }
    }

    pub fn with_national_lengths(mut self, lengths: impl IntoIterator<Item = usize>) -> Self {
        self.national_lengths = lengths.into_iter().collect();
        self
    }

    pub fn with_local_lengths(mut self, lengths: impl IntoIterator<Item = usize>) -> Self {
        self.local_lengths = lengths.into_iter().collect();
        self
    }

    pub fn usage(&self) -> UsageType {
        self.usage
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn national_lengths(&self) -> &[usize] {
        &self.national_lengths
    }

    pub fn local_lengths(&self) -> &[usize] {
        &self.local_lengths
    }

    /// An empty pair of length sets accepts any digit count; otherwise the
    /// count must appear in one of them.
    pub(crate) fn allows_length(&self, digit_count: usize) -> bool {
        if self.national_lengths.is_empty() && self.local_lengths.is_empty() {
            return true;
        }
        self.national_lengths.contains(&digit_count) || self.local_lengths.contains(&digit_count)
    }
}

/// A country reachable under a calling code: its ISO alpha-2 code, the
/// pattern its national significant numbers match, and the ordered usage
/// classification table.
#[derive(Debug, Clone)]
pub struct CountryEntry {
    country: String,
    national_pattern: Option<String>,
    usage_patterns: Vec<UsagePattern>,
}

impl CountryEntry {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            national_pattern: None,
            usage_patterns: Vec::new(),
        }
    }

    pub fn with_national_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.national_pattern = Some(pattern.into());
        self
    }

    pub fn with_usage(mut self, usage_pattern: UsagePattern) -> Self {
        self.usage_patterns.push(usage_pattern);
        self
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn national_pattern(&self) -> Option<&str> {
        self.national_pattern.as_deref()
    }

    pub fn usage_patterns(&self) -> &[UsagePattern] {
        &self.usage_patterns
    }
}

/// A national-number rendering rule: numbers fully matching `pattern` (and
/// `leading_digits`, when present) are rewritten through the capture
/// template.
#[derive(Debug, Clone)]
pub struct FormatRule {
    pattern: String,
    leading_digits: Option<String>,
    template: String,
    intl_template: Option<String>,
}

impl FormatRule {
    pub fn new(pattern: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            leading_digits: None,
            template: template.into(),
            intl_template: None,
        }
    }

    pub fn with_leading_digits(mut self, leading_digits: impl Into<String>) -> Self {
        self.leading_digits = Some(leading_digits.into());
        self
    }

    pub fn with_intl_template(mut self, intl_template: impl Into<String>) -> Self {
        self.intl_template = Some(intl_template.into());
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn leading_digits(&self) -> Option<&str> {
        self.leading_digits.as_deref()
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn intl_template(&self) -> Option<&str> {
        self.intl_template.as_deref()
    }
}

/// Everything known about one calling code: the countries sharing it (in
/// declaration order), the format rules for rendering its national numbers,
/// and the optional main country that wins score ties.
#[derive(Debug, Clone)]
pub struct CallingCodeEntry {
    calling_code: String,
    countries: Vec<CountryEntry>,
    formats: Vec<FormatRule>,
    main_country: Option<String>,
}

impl CallingCodeEntry {
    pub fn new(calling_code: impl Into<String>) -> Self {
        Self {
            calling_code: calling_code.into(),
            countries: Vec::new(),
            formats: Vec::new(),
            main_country: None,
        }
    }

    pub fn with_country(mut self, country: CountryEntry) -> Self {
        self.countries.push(country);
        self
    }

    pub fn with_format_rule(mut self, rule: FormatRule) -> Self {
        self.formats.push(rule);
        self
    }

    pub fn with_main_country(mut self, main_country: impl Into<String>) -> Self {
        self.main_country = Some(main_country.into());
        self
    }

    pub fn calling_code(&self) -> &str {
        &self.calling_code
    }

    pub fn countries(&self) -> &[CountryEntry] {
        &self.countries
    }

    pub fn country(&self, country: &str) -> Option<&CountryEntry> {
        self.countries.iter().find(|entry| entry.country() == country)
    }

    pub fn formats(&self) -> &[FormatRule] {
        &self.formats
    }

    pub fn main_country(&self) -> Option<&str> {
        self.main_country.as_deref()
    }
}

/// The provider handed to [`PhoneNumberScanner`](crate::PhoneNumberScanner)
/// at construction. Lookup is by calling code; the length-descending code
/// index the matcher needs is derived eagerly here instead of living in a
/// lazily initialized global.
pub struct NumberMetadata {
    entries: HashMap<String, CallingCodeEntry>,
    codes_by_length: Vec<String>,
}

impl NumberMetadata {
    /// Builds the provider and its derived index.
    ///
    /// Panics when an entry declares a main country that is not in its own
    /// country list; that is corrupted metadata, not bad input.
    pub fn new(entries: impl IntoIterator<Item = CallingCodeEntry>) -> Self {
        let mut map = HashMap::new();
        for entry in entries {
            if let Some(main_country) = entry.main_country() {
                assert!(
                    entry.country(main_country).is_some(),
                    "Main country {} is not listed under calling code {}; the metadata is corrupted",
                    main_country,
                    entry.calling_code(),
                );
            }
            map.insert(entry.calling_code().to_owned(), entry);
        }

        let mut codes_by_length: Vec<String> = map.keys().cloned().collect();
        // Longest first; ties ordered by code so the scan order is stable.
        codes_by_length.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        Self {
            entries: map,
            codes_by_length,
        }
    }

    pub fn get(&self, calling_code: &str) -> Option<&CallingCodeEntry> {
        self.entries.get(calling_code)
    }

    /// Like [`get`](Self::get), but with an explicit error for callers that
    /// treat an unknown calling code as a failure rather than a soft miss.
    pub fn require(
        &self,
        calling_code: &str,
    ) -> Result<&CallingCodeEntry, UnknownCallingCodeError> {
        self.get(calling_code)
            .ok_or_else(|| UnknownCallingCodeError(calling_code.to_owned()))
    }

    /// All known calling codes, longest first.
    pub fn calling_codes_by_length(&self) -> &[String] {
        &self.codes_by_length
    }

    pub fn all_calling_codes(&self) -> impl Iterator<Item = &str> {
        self.codes_by_length.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::{CallingCodeEntry, CountryEntry, NumberMetadata};

    fn sample() -> NumberMetadata {
        NumberMetadata::new([
            CallingCodeEntry::new("1")
                .with_country(CountryEntry::new("US"))
                .with_country(CountryEntry::new("CA"))
                .with_main_country("US"),
            CallingCodeEntry::new("44").with_country(CountryEntry::new("GB")),
            CallingCodeEntry::new("971").with_country(CountryEntry::new("AE")),
            CallingCodeEntry::new("7").with_country(CountryEntry::new("RU")),
        ])
    }

    #[test]
    fn codes_are_indexed_longest_first() {
        let metadata = sample();
        assert_eq!(metadata.calling_codes_by_length(), &["971", "44", "1", "7"]);
    }

    #[test]
    fn lookup_is_explicit_about_unknown_codes() {
        let metadata = sample();
        assert!(metadata.get("44").is_some());
        assert!(metadata.get("999").is_none());
        assert!(metadata.require("999").is_err());
    }

    #[test]
    #[should_panic(expected = "is not listed under calling code")]
    fn main_country_must_belong_to_its_calling_code() {
        NumberMetadata::new([CallingCodeEntry::new("1")
            .with_country(CountryEntry::new("US"))
            .with_main_country("GB")]);
    }
}
