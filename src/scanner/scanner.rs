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

use std::{borrow::Cow, collections::HashSet, sync::Arc};

use log::{trace, warn};
use regex::Regex;

use crate::{
    metadata::{CallingCodeEntry, CountryEntry, FormatRule, NumberMetadata},
    regex_util::{RegexConsume, RegexFullMatch},
    regexp_cache::InvalidRegexError,
    string_util::{advance_chars, leading_chars, strip_cow_prefix},
};

use super::{
    enums::{MatchResolution, NumberFormat, UsageType},
    errors::expect_valid_metadata,
    helper_constants::{
        EXTENSION_MARKER, INTERNATIONAL_PREFIXES, MAX_LENGTH_CALLING_CODE, PARAM_SEPARATOR,
        PLUS_SIGN, RFC3966_EXT_KEY, RFC3966_ISDN_SUBADDRESS_KEY, RFC3966_PREFIX,
    },
    helper_functions::{
        get_supported_usage_types, normalize_digits, render_param, resolve_scores, url_decode,
    },
    phone_number::PhoneNumber,
    scan_regexps_and_mappings::ScanRegExpsAndMappings,
};

// Helper type for Result
pub(crate) type Result<T> = std::result::Result<T, InvalidRegexError>;

/// The engine: parses arbitrary strings into [`PhoneNumber`] values and
/// renders them back in any of the supported formats.
///
/// Construction takes the metadata provider as an injected dependency; a
/// partial or synthetic provider works the same way the full one does.
/// Every method is read-only after construction, so a scanner can be shared
/// freely between threads.
pub struct PhoneNumberScanner {
    /// The injected read-only data source, including its eagerly derived
    /// length-sorted calling-code index.
    metadata: NumberMetadata,

    /// Helper struct holding compiled character classes, keypad mappings
    /// and the regex cache metadata patterns are compiled through.
    reg_exps: ScanRegExpsAndMappings,
}

impl PhoneNumberScanner {
    pub fn new(metadata: NumberMetadata) -> Self {
        Self {
            metadata,
            reg_exps: ScanRegExpsAndMappings::new(),
        }
    }

    pub fn metadata(&self) -> &NumberMetadata {
        &self.metadata
    }

    /// Normalizes a phone-number-ish string down to ASCII digits: Unicode
    /// digit variants are folded, keypad letters become their ITU E.161
    /// digit, everything else is dropped. Idempotent, never fails.
    pub fn normalize(&self, phone_number: &str) -> String {
        normalize_digits(&self.reg_exps.keypad_mappings, phone_number)
    }

    /// Longest-match search over the fixed international-prefix list.
    /// Returns the matched literal without consuming anything.
    ///
    /// The candidate list is sorted longest first and the input head is
    /// re-sliced only when the candidate length changes, so same-length
    /// candidates reuse one slice.
    pub fn match_international_prefix(input: &str) -> Option<&'static str> {
        let mut previous_length = 0usize;
        let mut head = "";
        for candidate in INTERNATIONAL_PREFIXES {
            let candidate_length = candidate.chars().count();
            if candidate_length != previous_length {
                previous_length = candidate_length;
                head = leading_chars(input, candidate_length);
            }
            if head == *candidate {
                return Some(candidate);
            }
        }
        None
    }

    /// Scores every known calling code against the leading digits of
    /// `digits`. In guess mode, falls back to pattern-based guessing when no
    /// code literally matched. A supplied fallback calling code gets a +1
    /// tie-break bias, not an override.
    pub fn match_calling_code(
        &self,
        digits: &str,
        fallback_calling_code: Option<&str>,
        guess: bool,
    ) -> MatchResolution {
        expect_valid_metadata(self.match_calling_code_helper(digits, fallback_calling_code, guess))
    }

    fn match_calling_code_helper(
        &self,
        digits: &str,
        fallback_calling_code: Option<&str>,
        guess: bool,
    ) -> Result<MatchResolution> {
        let mut scores: Vec<(String, u32)> = Vec::new();
        let mut exact_match_scored = false;
        let mut previous_length = 0usize;
        let mut head = "";
        for calling_code in self.metadata.calling_codes_by_length() {
            // Calling codes are ASCII digits, so byte length is char length.
            let candidate_length = calling_code.len();
            debug_assert!(
                candidate_length <= MAX_LENGTH_CALLING_CODE,
                "Calling codes are at most {MAX_LENGTH_CALLING_CODE} digits"
            );
            if candidate_length != previous_length {
                previous_length = candidate_length;
                head = leading_chars(digits, candidate_length);
            }
            let mut score = 0u32;
            if head == calling_code.as_str() {
                score += 1;
                exact_match_scored = true;
            }
            if fallback_calling_code == Some(calling_code.as_str()) {
                score += 1;
            }
            if score > 0 {
                scores.push((calling_code.clone(), score));
            }
        }

        if guess && !exact_match_scored {
            return self.guess_calling_code(digits, fallback_calling_code);
        }
        Ok(resolve_scores(scores, None))
    }

    /// Pattern-based calling-code guessing: every candidate code is stripped
    /// from the front of the digits (when present) and each of its countries
    /// scores a point when its national pattern matches the stripped or the
    /// original digits, plus one more for the first usage pattern that fits.
    /// Scores accumulate across all countries under a code.
    fn guess_calling_code(
        &self,
        digits: &str,
        fallback_calling_code: Option<&str>,
    ) -> Result<MatchResolution> {
        let mut scores: Vec<(String, u32)> = Vec::new();
        for calling_code in self.metadata.calling_codes_by_length() {
            let stripped = digits.strip_prefix(calling_code.as_str()).unwrap_or(digits);
            let mut score = 0u32;
            if fallback_calling_code == Some(calling_code.as_str()) {
                score += 1;
            }
            // The index is derived from the entry table, so the lookup
            // cannot miss.
            let Some(entry) = self.metadata.get(calling_code) else {
                continue;
            };
            for country in entry.countries() {
                let Some(pattern_source) = country.national_pattern() else {
                    continue;
                };
                let national_pattern = self.reg_exps.regexp_cache.get_regex(pattern_source)?;
                if !national_pattern.full_match(stripped) && !national_pattern.full_match(digits) {
                    continue;
                }
                score += 1;
                if self.first_matching_usage(country, stripped)?.is_some() {
                    score += 1;
                }
            }
            if score > 0 {
                trace!("Calling code {calling_code} scored {score} for '{digits}'");
                scores.push((calling_code.clone(), score));
            }
        }
        Ok(resolve_scores(scores, None))
    }

    /// Scores every country under `calling_code` against a national number:
    /// one point for a national-pattern match, one more for the first
    /// matching usage pattern. A unique top score wins; the calling code's
    /// main country breaks ties; anything else is ambiguous.
    pub fn find_country(&self, calling_code: &str, national_number: &str) -> MatchResolution {
        expect_valid_metadata(self.find_country_helper(calling_code, national_number))
    }

    fn find_country_helper(
        &self,
        calling_code: &str,
        national_number: &str,
    ) -> Result<MatchResolution> {
        let Some(entry) = self.metadata.get(calling_code) else {
            warn!("Unknown calling code ({calling_code}) provided");
            return Ok(MatchResolution::NoMatch);
        };
        let mut scores: Vec<(String, u32)> = Vec::new();
        for country in entry.countries() {
            let Some(pattern_source) = country.national_pattern() else {
                continue;
            };
            let national_pattern = self.reg_exps.regexp_cache.get_regex(pattern_source)?;
            if !national_pattern.full_match(national_number) {
                continue;
            }
            let mut score = 1u32;
            if self.first_matching_usage(country, national_number)?.is_some() {
                score += 1;
            }
            trace!(
                "Country {} scored {score} for '{national_number}'",
                country.country()
            );
            scores.push((country.country().to_owned(), score));
        }
        Ok(resolve_scores(scores, entry.main_country()))
    }

    /// Classifies a national number under one country. The country's
    /// national pattern must match at all; after that the first usage
    /// pattern (in metadata declaration order) whose length set and regex
    /// both fit wins.
    pub fn find_type(
        &self,
        calling_code: &str,
        country: &str,
        national_number: &str,
    ) -> Option<UsageType> {
        expect_valid_metadata(self.find_type_helper(calling_code, country, national_number))
    }

    fn find_type_helper(
        &self,
        calling_code: &str,
        country: &str,
        national_number: &str,
    ) -> Result<Option<UsageType>> {
        let Some(entry) = self.metadata.get(calling_code) else {
            warn!("Unknown calling code ({calling_code}) provided");
            return Ok(None);
        };
        let Some(country_entry) = entry.country(country) else {
            debug_assert!(
                false,
                "Country {country} is not listed under calling code {calling_code}"
            );
            warn!("Country {country} does not belong to calling code {calling_code}");
            return Ok(None);
        };
        let Some(pattern_source) = country_entry.national_pattern() else {
            return Ok(None);
        };
        let national_pattern = self.reg_exps.regexp_cache.get_regex(pattern_source)?;
        if !national_pattern.full_match(national_number) {
            trace!(
                "Number '{national_number}' type unknown - doesn't match the national number \
                 pattern of {country}"
            );
            return Ok(None);
        }
        let usage = self.first_matching_usage(country_entry, national_number)?;
        match usage {
            Some(usage) => trace!("Number '{national_number}' classified as {usage:?}"),
            None => trace!(
                "Number '{national_number}' type unknown - doesn't match any usage pattern of \
                 {country}"
            ),
        }
        Ok(usage)
    }

    /// First usage pattern, in declaration order, whose length set admits
    /// the digit count and whose regex matches. First match wins, not best
    /// match.
    fn first_matching_usage(
        &self,
        country: &CountryEntry,
        digits: &str,
    ) -> Result<Option<UsageType>> {
        let digit_count = digits.len();
        for usage_pattern in country.usage_patterns() {
            if !usage_pattern.allows_length(digit_count) {
                continue;
            }
            let pattern = self.reg_exps.regexp_cache.get_regex(usage_pattern.pattern())?;
            if pattern.full_match(digits) {
                return Ok(Some(usage_pattern.usage()));
            }
        }
        Ok(None)
    }

    /// The usage types a country declares classification patterns for, or
    /// `None` for an unknown calling code / country pair.
    pub fn supported_usage_types(
        &self,
        calling_code: &str,
        country: &str,
    ) -> Option<HashSet<UsageType>> {
        self.metadata
            .get(calling_code)
            .and_then(|entry| entry.country(country))
            .map(get_supported_usage_types)
            .or_else(|| {
                warn!("Invalid or unknown calling code/country pair provided: {calling_code}/{country}");
                None
            })
    }

    /// The main country of a calling code, when the metadata declares one.
    pub fn main_country(&self, calling_code: &str) -> Option<&str> {
        self.metadata.get(calling_code).and_then(CallingCodeEntry::main_country)
    }

    /// Parses an arbitrary string into a [`PhoneNumber`].
    ///
    /// This never fails: malformed input yields a best-effort partial value
    /// with empty fields where extraction stopped, and callers judge
    /// confidence by checking which fields are populated. A fallback calling
    /// code, when supplied and known to the metadata, is used when the input
    /// itself does not carry one.
    pub fn parse(&self, input: &str, fallback_calling_code: Option<&str>) -> PhoneNumber {
        expect_valid_metadata(self.parse_helper(input, fallback_calling_code, false))
    }

    /// Like [`parse`](Self::parse), but also tries to recognize a calling
    /// code in inputs that carry no international prefix, by literal match
    /// first and by national-pattern guessing second.
    pub fn parse_guessing_calling_code(
        &self,
        input: &str,
        fallback_calling_code: Option<&str>,
    ) -> PhoneNumber {
        expect_valid_metadata(self.parse_helper(input, fallback_calling_code, true))
    }

    fn parse_helper(
        &self,
        input: &str,
        fallback_calling_code: Option<&str>,
        guess_calling_code: bool,
    ) -> Result<PhoneNumber> {
        let mut number = PhoneNumber::new();
        let mut rest = input;

        // A tel: scheme fixes the format before any digits are seen.
        let scheme = leading_chars(rest, RFC3966_PREFIX.len());
        if scheme.eq_ignore_ascii_case(RFC3966_PREFIX) {
            number.set_format(NumberFormat::Tel);
            rest = &rest[scheme.len()..];
        }

        // Everything before the first digit or plus sign is lead-in junk.
        let Some(start) = self.reg_exps.number_start_pattern.find(rest) else {
            return Ok(number);
        };
        rest = &rest[start.start()..];

        // International dialing prefix, longest candidate first.
        if let Some(prefix) = Self::match_international_prefix(rest) {
            number.set_international_prefix(prefix);
            rest = &rest[prefix.len()..];
        }

        // The raw number run the calling code (if any) lives in. The run
        // starts at the first digit; only the junk before it is consumed
        // here, the run itself is a lookahead until the calling-code length
        // is known.
        let Some(first_digit) = self.reg_exps.digit_pattern.find(rest) else {
            return Ok(number);
        };
        rest = &rest[first_digit.start()..];
        let Some(run) = self.reg_exps.number_run_pattern.find_start(rest) else {
            return Ok(number);
        };
        let num = self.normalize(run.as_str());

        // Calling-code resolution happens only when the input claimed to be
        // international, or the caller asked for guessing.
        if !number.international_prefix().is_empty() || guess_calling_code {
            if let MatchResolution::Single(calling_code) =
                self.match_calling_code_helper(&num, fallback_calling_code, guess_calling_code)?
            {
                number.set_calling_code(calling_code);
            }
        }

        // The fallback calling code applies outside of guess mode, and only
        // when the metadata knows it.
        if number.calling_code().is_empty() && !guess_calling_code {
            if let Some(fallback) = fallback_calling_code {
                if let Some(entry) = self.metadata.get(fallback) {
                    number.set_calling_code(fallback);
                    if let Some(main_country) = entry.main_country() {
                        number.set_country(main_country);
                    }
                }
            }
        }

        // With a calling code in hand: strip it from the run, resolve the
        // country and usage type, and decide whether the run was written raw
        // (code and national digits fused, no separator).
        let mut written_raw = false;
        if !number.calling_code().is_empty() {
            let calling_code = number.calling_code().to_owned();
            let num_no_code = strip_cow_prefix(Cow::Borrowed(num.as_str()), &calling_code)
                .unwrap_or(Cow::Borrowed(num.as_str()));

            if number.country().is_empty() {
                if let MatchResolution::Single(country) =
                    self.find_country_helper(&calling_code, &num_no_code)?
                {
                    number.set_country(country);
                }
            }
            if !number.country().is_empty() {
                let country = number.country().to_owned();
                if let Some(usage) = self.find_type_helper(&calling_code, &country, &num_no_code)? {
                    number.set_number_type(usage);
                }
            }

            written_raw = match self.country_pattern(&calling_code, number.country())? {
                Some(pattern) => {
                    pattern.full_match(&num_no_code) && !pattern.full_match(&num)
                }
                None => num_no_code.as_ref() != num.as_str(),
            };
            if written_raw {
                // The national digits start right after the code characters.
                rest = advance_chars(rest, calling_code.chars().count());
            }
        }

        // Format detection from the first literal character after the code.
        if number.format() != NumberFormat::Tel {
            if !number.calling_code().is_empty() {
                match rest.chars().next() {
                    Some(' ') => {
                        number.set_format(NumberFormat::Nat);
                        rest = &rest[1..];
                    }
                    Some('.') => {
                        number.set_format(NumberFormat::Epp);
                        rest = &rest[1..];
                    }
                    _ => {
                        let format = if !number.international_prefix().is_empty() {
                            NumberFormat::Int
                        } else if written_raw {
                            NumberFormat::Raw
                        } else {
                            NumberFormat::Num
                        };
                        number.set_format(format);
                    }
                }
            } else {
                number.set_format(NumberFormat::Num);
            }
        }

        // The national number run.
        let Some(first_digit) = self.reg_exps.digit_pattern.find(rest) else {
            return Ok(number);
        };
        rest = &rest[first_digit.start()..];
        let Some(run) = self.reg_exps.number_run_pattern.find_start(rest) else {
            return Ok(number);
        };
        let raw_run = run.as_str();
        number.set_national_number(self.normalize(raw_run));
        if number.format() == NumberFormat::Num && raw_run.contains(' ') {
            // Embedded grouping separators make this a local-format number.
            number.set_format(NumberFormat::Loc);
        }
        rest = &rest[run.end()..];

        // A ~ marker introduces the extension digits.
        if rest.starts_with(EXTENSION_MARKER) {
            rest = &rest[1..];
            if let Some(extension_run) = self.reg_exps.digit_run_pattern.find(rest) {
                number.set_extension(extension_run.as_str());
                rest = &rest[extension_run.end()..];
            }
        }

        // RFC 3966 generic parameters, tel: URIs only.
        if number.format() == NumberFormat::Tel {
            if let Some(separator_index) = rest.find(PARAM_SEPARATOR) {
                for param in rest[separator_index + 1..].split(PARAM_SEPARATOR) {
                    if param.is_empty() {
                        continue;
                    }
                    let (key, value) = match param.split_once('=') {
                        Some((key, value)) => (key, Some(url_decode(value))),
                        None => (param, None),
                    };
                    if key == RFC3966_EXT_KEY {
                        // The extension field owns this; it is never kept as
                        // a generic parameter as well.
                        if let Some(extension) = value {
                            number.set_extension(extension);
                        }
                        continue;
                    }
                    number.set_param(key, value);
                }
            }
        }

        Ok(number)
    }

    /// Renders a number in `target_format`, or in the number's own format
    /// when none is given. Formatting a well-formed number always succeeds;
    /// an empty number renders to an empty or near-empty string.
    pub fn format(&self, number: &PhoneNumber, target_format: Option<NumberFormat>) -> String {
        expect_valid_metadata(self.format_helper(number, target_format))
    }

    fn format_helper(
        &self,
        number: &PhoneNumber,
        target_format: Option<NumberFormat>,
    ) -> Result<String> {
        let target = target_format.unwrap_or(number.format());

        // A stray ext param stands in for the extension field when the
        // field itself is empty; either way it never renders as a generic
        // parameter.
        let mut extension = Cow::Borrowed(number.extension());
        if extension.is_empty() {
            if let Some(Some(param_extension)) = number.param(RFC3966_EXT_KEY) {
                extension = Cow::Owned(param_extension.to_owned());
            }
        }

        let mut formatted_number = String::new();
        if target == NumberFormat::Tel {
            formatted_number.push_str(RFC3966_PREFIX);
        }

        if !number.calling_code().is_empty()
            && !matches!(target, NumberFormat::Loc | NumberFormat::Num)
        {
            if target != NumberFormat::Raw {
                if number.international_prefix().is_empty() {
                    formatted_number.push_str(PLUS_SIGN);
                } else {
                    formatted_number.push_str(number.international_prefix());
                }
            }
            formatted_number.push_str(number.calling_code());
            match target {
                NumberFormat::Nat => formatted_number.push(' '),
                NumberFormat::Epp => formatted_number.push('.'),
                _ => {}
            }
        }

        let national_number = self.render_national_number(number, target)?;
        formatted_number.push_str(&national_number);

        if target == NumberFormat::Tel {
            // ext and isdn-subaddress render first, in that order, per
            // RFC 3966; the remaining params keep their stored order.
            if !extension.is_empty() {
                formatted_number.push_str(&render_param(RFC3966_EXT_KEY, Some(extension.as_ref())));
            }
            if let Some(isdn_subaddress) = number.param(RFC3966_ISDN_SUBADDRESS_KEY) {
                formatted_number
                    .push_str(&render_param(RFC3966_ISDN_SUBADDRESS_KEY, isdn_subaddress));
            }
            for (key, value) in number.params() {
                if key == RFC3966_EXT_KEY || key == RFC3966_ISDN_SUBADDRESS_KEY {
                    continue;
                }
                formatted_number.push_str(&render_param(key, value.as_deref()));
            }
        } else if !extension.is_empty() {
            formatted_number.push(EXTENSION_MARKER);
            formatted_number.push_str(&extension);
        }

        Ok(formatted_number)
    }

    /// National-number rendering: the country's first matching format rule
    /// for LOC and NAT targets, bare digits for everything else.
    fn render_national_number<'b>(
        &self,
        number: &'b PhoneNumber,
        target: NumberFormat,
    ) -> Result<Cow<'b, str>> {
        let national_number = number.national_number();
        if !matches!(target, NumberFormat::Loc | NumberFormat::Nat) || national_number.is_empty() {
            return Ok(Cow::Borrowed(national_number));
        }
        let Some(entry) = self.metadata.get(number.calling_code()) else {
            return Ok(Cow::Borrowed(national_number));
        };
        let Some(rule) = self.choose_format_rule(entry.formats(), national_number)? else {
            return Ok(Cow::Borrowed(national_number));
        };
        let pattern = self.reg_exps.regexp_cache.get_regex(rule.pattern())?;
        // Behind "+<code> " the international variant of the rule takes
        // precedence when the metadata declares one.
        let template = if target == NumberFormat::Nat {
            rule.intl_template().unwrap_or_else(|| rule.template())
        } else {
            rule.template()
        };
        Ok(pattern.replace(national_number, template))
    }

    /// First format rule, in declaration order, whose pattern fully matches
    /// the national number and whose leading-digits regex, when present,
    /// matches at the start.
    fn choose_format_rule<'b>(
        &self,
        available_rules: &'b [FormatRule],
        national_number: &str,
    ) -> Result<Option<&'b FormatRule>> {
        for rule in available_rules {
            if let Some(leading_digits) = rule.leading_digits() {
                let leading_digits_pattern = self.reg_exps.regexp_cache.get_regex(leading_digits)?;
                if !leading_digits_pattern.matches_start(national_number) {
                    continue;
                }
            }
            let pattern = self.reg_exps.regexp_cache.get_regex(rule.pattern())?;
            if pattern.full_match(national_number) {
                return Ok(Some(rule));
            }
        }
        Ok(None)
    }

    /// The compiled national pattern of one country under one calling code,
    /// when both exist and a pattern is declared.
    fn country_pattern(&self, calling_code: &str, country: &str) -> Result<Option<Arc<Regex>>> {
        if country.is_empty() {
            return Ok(None);
        }
        let Some(country_entry) = self
            .metadata
            .get(calling_code)
            .and_then(|entry| entry.country(country))
        else {
            return Ok(None);
        };
        let Some(pattern_source) = country_entry.national_pattern() else {
            return Ok(None);
        };
        Ok(Some(self.reg_exps.regexp_cache.get_regex(pattern_source)?))
    }
}
