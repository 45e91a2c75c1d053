use std::collections::{HashMap, HashSet};

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use strum::IntoEnumIterator;

use crate::metadata::CountryEntry;

use super::enums::{MatchResolution, UsageType};

/// Characters serialized bare in RFC 3966 parameter values: the RFC 3986
/// unreserved set. Everything else is percent-encoded.
const PARAM_VALUE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Normalizes a string of characters representing a phone number down to
/// ASCII digits.
///
/// Unicode decimal digits (fullwidth, Arabic-Indic, Eastern-Arabic and the
/// rest of `Nd`) are folded to `0`..`9` first; then every character with an
/// entry in the keypad map (ASCII digits mapped to themselves, letters of
/// either case mapped to their ITU E.161 keypad digit) is replaced, and every
/// other character is dropped. Applying this twice is the same as applying
/// it once.
pub(super) fn normalize_digits(keypad_mappings: &HashMap<char, char>, phone_number: &str) -> String {
    let decimalized = dec_from_char::normalize_decimals(phone_number);
    let mut normalized = String::with_capacity(decimalized.len());
    for phone_char in decimalized.chars() {
        if let Some(replacement) = keypad_mappings.get(&phone_char.to_ascii_uppercase()) {
            normalized.push(*replacement);
        }
        // Neither a digit nor a keypad letter: dropped.
    }
    normalized
}

/// Percent-decodes an RFC 3966 parameter value. Lossy on broken UTF-8
/// sequences; parameter handling never fails a parse.
pub(super) fn url_decode(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

/// Serializes one RFC 3966 parameter, `;key` or `;key=value` with the value
/// percent-encoded.
pub(super) fn render_param(key: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => {
            let encoded = utf8_percent_encode(value, PARAM_VALUE_SET).to_string();
            fast_cat::concat_str!(";", key, "=", &encoded)
        }
        None => fast_cat::concat_str!(";", key),
    }
}

/// Resolution shared by every scored search: a unique top score wins, the
/// preferred candidate (a calling code's main country) breaks ties among
/// the maxima, and anything else hands back every scored candidate,
/// weakest first.
pub(super) fn resolve_scores(
    mut scores: Vec<(String, u32)>,
    preferred: Option<&str>,
) -> MatchResolution {
    let Some(top_score) = scores.iter().map(|(_, score)| *score).max() else {
        return MatchResolution::NoMatch;
    };
    {
        let top: Vec<&str> = scores
            .iter()
            .filter(|(_, score)| *score == top_score)
            .map(|(candidate, _)| candidate.as_str())
            .collect();
        if let [winner] = top.as_slice() {
            return MatchResolution::Single((*winner).to_owned());
        }
        if let Some(preferred) = preferred {
            if top.contains(&preferred) {
                return MatchResolution::Single(preferred.to_owned());
            }
        }
    }
    // The sort is stable, so equal scores keep the candidate scan order.
    scores.sort_by_key(|(_, score)| *score);
    MatchResolution::Ambiguous(scores.into_iter().map(|(candidate, _)| candidate).collect())
}

/// Returns the usage types a country declares classification patterns for.
pub(super) fn get_supported_usage_types(country: &CountryEntry) -> HashSet<UsageType> {
    UsageType::iter()
        .filter(|usage| {
            country
                .usage_patterns()
                .iter()
                .any(|usage_pattern| usage_pattern.usage() == *usage)
        })
        .collect()
}
