use std::sync::Once;

use log::LevelFilter;

use crate::{MatchResolution, NumberFormat, PhoneNumber, PhoneNumberScanner, UsageType};

use super::test_metadata::test_metadata;

static ONCE: Once = Once::new();

fn scanner() -> PhoneNumberScanner {
    ONCE.call_once(|| {
        colog::default_builder()
            .filter_level(LevelFilter::Trace)
            .init()
    });
    PhoneNumberScanner::new(test_metadata())
}

#[test]
fn normalize_replaces_keypad_letters() {
    let scanner = scanner();
    assert_eq!(scanner.normalize("1-800-Flowers"), "18003569377");
    assert_eq!(scanner.normalize("034-I-am-HUNGRY"), "034426486479");
}

#[test]
fn normalize_folds_unicode_digits() {
    let scanner = scanner();
    // Fullwidth, Arabic-Indic and Eastern-Arabic digits in one string.
    assert_eq!(scanner.normalize("(２０２) ٥٥٥-۰۱۲۳"), "2025550123");
}

#[test]
fn normalize_is_idempotent() {
    let scanner = scanner();
    for input in ["", "1-800-Flowers", "(２０２) ٥٥٥-۰۱۲۳", "no digits at all"] {
        let once = scanner.normalize(input);
        assert_eq!(scanner.normalize(&once), once);
    }
}

#[test]
fn international_prefixes_match_longest_first() {
    assert_eq!(
        PhoneNumberScanner::match_international_prefix("0011 54 9 11"),
        Some("0011")
    );
    // "00" must win over "0" when both would match.
    assert_eq!(
        PhoneNumberScanner::match_international_prefix("0044 20 7946"),
        Some("00")
    );
    assert_eq!(
        PhoneNumberScanner::match_international_prefix("020 7946 0853"),
        Some("020")
    );
    assert_eq!(PhoneNumberScanner::match_international_prefix("+1 202"), Some("+"));
    assert_eq!(
        PhoneNumberScanner::match_international_prefix("＋44 20"),
        Some("＋")
    );
    assert_eq!(PhoneNumberScanner::match_international_prefix("1 202"), None);
}

#[test]
fn calling_code_prefers_longest_match() {
    let scanner = scanner();
    assert_eq!(
        scanner.match_calling_code("8761234567", None, false),
        MatchResolution::Single("876".to_owned())
    );
    assert_eq!(
        scanner.match_calling_code("442079460853", None, false),
        MatchResolution::Single("44".to_owned())
    );
    assert_eq!(
        scanner.match_calling_code("5551234", None, false),
        MatchResolution::NoMatch
    );
}

#[test]
fn fallback_bias_is_not_an_override() {
    let scanner = scanner();
    // The literal match and the biased fallback tie; the caller gets the
    // whole scored list back, weakest first.
    assert_eq!(
        scanner.match_calling_code("8761234567", Some("1"), false),
        MatchResolution::Ambiguous(vec!["876".to_owned(), "1".to_owned()])
    );
}

#[test]
fn guessing_scores_national_patterns() {
    let scanner = scanner();
    // 501234567 fits the AE and IL plans equally well.
    assert_eq!(
        scanner.match_calling_code("501234567", None, true),
        MatchResolution::Ambiguous(vec!["971".to_owned(), "972".to_owned()])
    );
    // The fallback bias breaks exactly this kind of tie.
    assert_eq!(
        scanner.match_calling_code("501234567", Some("971"), true),
        MatchResolution::Single("971".to_owned())
    );
    // Scores accumulate across the countries sharing a code: both RU and KZ
    // accept ten digits, which beats the single US match.
    assert_eq!(
        scanner.match_calling_code("9123456789", None, true),
        MatchResolution::Single("7".to_owned())
    );
}

#[test]
fn find_country_scores_usage_patterns() {
    let scanner = scanner();
    assert_eq!(
        scanner.find_country("1", "2025550123"),
        MatchResolution::Single("US".to_owned())
    );
    assert_eq!(
        scanner.find_country("7", "9123456789"),
        MatchResolution::Single("RU".to_owned())
    );
}

#[test]
fn find_country_breaks_ties_with_main_country() {
    let scanner = scanner();
    // 2045550123 matches both the US and the CA entries with equal scores.
    assert_eq!(
        scanner.find_country("1", "2045550123"),
        MatchResolution::Single("US".to_owned())
    );
}

#[test]
fn find_country_reports_ambiguity() {
    let scanner = scanner();
    assert_eq!(
        scanner.find_country("876", "1234567"),
        MatchResolution::Ambiguous(vec!["XA".to_owned(), "XB".to_owned()])
    );
    assert_eq!(scanner.find_country("999", "123"), MatchResolution::NoMatch);
}

#[test]
fn find_type_takes_first_declared_match() {
    let scanner = scanner();
    // The toll-free pattern is declared before the catch-all mobile one.
    assert_eq!(
        scanner.find_type("1", "US", "8002345678"),
        Some(UsageType::TollFree)
    );
    assert_eq!(
        scanner.find_type("1", "US", "2025550123"),
        Some(UsageType::FixedLine)
    );
    assert_eq!(
        scanner.find_type("44", "GB", "7911123456"),
        Some(UsageType::Mobile)
    );
}

#[test]
fn find_type_requires_national_pattern_and_length() {
    let scanner = scanner();
    // National pattern mismatch.
    assert_eq!(scanner.find_type("1", "US", "1234"), None);
    // Nine digits fit the GB national pattern but not the mobile length set.
    assert_eq!(scanner.find_type("44", "GB", "791112345"), None);
    // Unknown calling code never resolves.
    assert_eq!(scanner.find_type("999", "US", "2025550123"), None);
}

#[test]
fn supported_usage_types_follow_declared_patterns() {
    let scanner = scanner();
    let types = scanner
        .supported_usage_types("1", "US")
        .expect("country should exist");
    assert!(types.contains(&UsageType::FixedLine));
    assert!(types.contains(&UsageType::TollFree));
    assert!(types.contains(&UsageType::Mobile));
    assert!(!types.contains(&UsageType::Pager));

    assert!(scanner.supported_usage_types("1", "GB").is_none());
}

#[test]
fn main_country_lookup() {
    let scanner = scanner();
    assert_eq!(scanner.main_country("1"), Some("US"));
    assert_eq!(scanner.main_country("876"), None);
    assert_eq!(scanner.main_country("999"), None);
}

#[test]
fn parse_national_number_with_fallback() {
    let scanner = scanner();
    let number = scanner.parse("(202) 555-0123", Some("1"));

    assert_eq!(number.calling_code(), "1");
    assert_eq!(number.country(), "US");
    assert_eq!(number.national_number(), "2025550123");
    assert_eq!(number.number_type(), Some(UsageType::FixedLine));
    assert_eq!(number.format(), NumberFormat::Loc);
    assert_eq!(number.international_prefix(), "");

    assert_eq!(
        scanner.format(&number, Some(NumberFormat::Nat)),
        "+1 202 555-0123"
    );
}

#[test]
fn parse_detects_national_display_format() {
    let scanner = scanner();
    let number = scanner.parse("+1 202 555 0123", None);

    assert_eq!(number.format(), NumberFormat::Nat);
    assert_eq!(number.international_prefix(), "+");
    assert_eq!(number.calling_code(), "1");
    assert_eq!(number.country(), "US");
    assert_eq!(number.national_number(), "2025550123");
}

#[test]
fn parse_detects_international_and_raw_formats() {
    let scanner = scanner();
    let number = scanner.parse("+12025550123", None);
    assert_eq!(number.format(), NumberFormat::Int);
    assert_eq!(number.calling_code(), "1");
    assert_eq!(number.national_number(), "2025550123");

    let number = scanner.parse_guessing_calling_code("12025550123", None);
    assert_eq!(number.format(), NumberFormat::Raw);
    assert_eq!(number.calling_code(), "1");
    assert_eq!(number.country(), "US");
    assert_eq!(number.national_number(), "2025550123");
}

#[test]
fn parse_detects_epp_format() {
    let scanner = scanner();
    let number = scanner.parse("+1.2025550123", None);

    assert_eq!(number.format(), NumberFormat::Epp);
    assert_eq!(number.calling_code(), "1");
    assert_eq!(number.national_number(), "2025550123");
    assert_eq!(scanner.format(&number, None), "+1.2025550123");
}

#[test]
fn parse_consumes_idd_prefix() {
    let scanner = scanner();
    let number = scanner.parse("0011 44 20 7946 0853", None);

    assert_eq!(number.international_prefix(), "0011");
    assert_eq!(number.calling_code(), "44");
    assert_eq!(number.country(), "GB");
    assert_eq!(number.number_type(), Some(UsageType::FixedLine));
    assert_eq!(number.format(), NumberFormat::Nat);
    assert_eq!(number.national_number(), "2079460853");

    // The stored prefix literal is reused on output.
    assert_eq!(
        scanner.format(&number, Some(NumberFormat::Int)),
        "0011442079460853"
    );
}

#[test]
fn parse_tilde_extension() {
    let scanner = scanner();
    let number = scanner.parse("(650) 253-0000~7", Some("1"));

    assert_eq!(number.national_number(), "6502530000");
    assert_eq!(number.extension(), "7");
    assert_eq!(number.number_type(), Some(UsageType::FixedLine));
    assert_eq!(scanner.format(&number, None), "650 253-0000~7");
}

#[test]
fn parse_tel_uri_with_extension() {
    let scanner = scanner();
    let number = scanner.parse("tel:+1-202-555-0123;ext=42", None);

    assert_eq!(number.format(), NumberFormat::Tel);
    assert_eq!(number.calling_code(), "1");
    assert_eq!(number.national_number(), "2025550123");
    assert_eq!(number.extension(), "42");
    // The extension is owned by its field, never kept as a generic param.
    assert_eq!(number.param("ext"), None);

    let rendered = scanner.format(&number, None);
    assert_eq!(rendered, "tel:+12025550123;ext=42");

    let reparsed = scanner.parse(&rendered, None);
    assert_eq!(reparsed.extension(), "42");
    assert_eq!(reparsed.national_number(), "2025550123");
    assert_eq!(reparsed.calling_code(), "1");
}

#[test]
fn parse_tel_uri_generic_params() {
    let scanner = scanner();
    let number = scanner.parse("tel:+12025550123;foo=b%20ar;bar;isdn-subaddress=70", None);

    assert_eq!(
        number.params(),
        &[
            ("foo".to_owned(), Some("b ar".to_owned())),
            ("bar".to_owned(), None),
            ("isdn-subaddress".to_owned(), Some("70".to_owned())),
        ]
    );

    // isdn-subaddress is forced to the front on output; the rest keep
    // their stored order.
    assert_eq!(
        scanner.format(&number, None),
        "tel:+12025550123;isdn-subaddress=70;foo=b%20ar;bar"
    );
}

#[test]
fn parse_never_fails_on_malformed_input() {
    let scanner = scanner();
    assert_eq!(scanner.parse("", None), PhoneNumber::new());
    assert_eq!(scanner.parse("?!--", None), PhoneNumber::new());
    assert_eq!(scanner.parse("no digits here", None), PhoneNumber::new());

    let mut tel_only = PhoneNumber::new();
    tel_only.set_format(NumberFormat::Tel);
    assert_eq!(scanner.parse("tel:", None), tel_only);
}

#[test]
fn parse_without_context_stays_local() {
    let scanner = scanner();
    let number = scanner.parse("(202) 555-0123", None);

    assert_eq!(number.calling_code(), "");
    assert_eq!(number.country(), "");
    assert_eq!(number.format(), NumberFormat::Loc);
    assert_eq!(number.national_number(), "2025550123");

    let number = scanner.parse("202-555-0123", None);
    assert_eq!(number.format(), NumberFormat::Num);
}

#[test]
fn guess_mode_reports_ambiguity_by_resolving_nothing() {
    let scanner = scanner();
    let number = scanner.parse_guessing_calling_code("501234567", None);

    assert_eq!(number.calling_code(), "");
    assert_eq!(number.country(), "");
    assert_eq!(number.national_number(), "501234567");
}

#[test]
fn guess_mode_strips_embedded_calling_code() {
    let scanner = scanner();
    let number = scanner.parse_guessing_calling_code("971501234567", None);

    assert_eq!(number.calling_code(), "971");
    assert_eq!(number.country(), "AE");
    assert_eq!(number.number_type(), Some(UsageType::Mobile));
    assert_eq!(number.format(), NumberFormat::Raw);
    assert_eq!(number.national_number(), "501234567");
}

#[test]
fn format_all_targets() {
    let scanner = scanner();
    let mut number = PhoneNumber::new();
    number.set_calling_code("1");
    number.set_country("US");
    number.set_national_number("2025550123");

    assert_eq!(scanner.format(&number, Some(NumberFormat::Num)), "2025550123");
    assert_eq!(
        scanner.format(&number, Some(NumberFormat::Loc)),
        "202 555-0123"
    );
    assert_eq!(
        scanner.format(&number, Some(NumberFormat::Nat)),
        "+1 202 555-0123"
    );
    assert_eq!(scanner.format(&number, Some(NumberFormat::Raw)), "12025550123");
    assert_eq!(scanner.format(&number, Some(NumberFormat::Int)), "+12025550123");
    assert_eq!(
        scanner.format(&number, Some(NumberFormat::Epp)),
        "+1.2025550123"
    );
    assert_eq!(
        scanner.format(&number, Some(NumberFormat::Tel)),
        "tel:+12025550123"
    );
}

#[test]
fn format_uses_intl_template_behind_calling_code() {
    let scanner = scanner();
    let mut number = PhoneNumber::new();
    number.set_calling_code("44");
    number.set_country("GB");
    number.set_national_number("2079460853");

    assert_eq!(
        scanner.format(&number, Some(NumberFormat::Loc)),
        "20 7946 0853"
    );
    assert_eq!(
        scanner.format(&number, Some(NumberFormat::Nat)),
        "+44 20-7946-0853"
    );
    // No rule matches the mobile leading digits; bare digits come back.
    number.set_national_number("7911123456");
    assert_eq!(
        scanner.format(&number, Some(NumberFormat::Nat)),
        "+44 7911123456"
    );
}

#[test]
fn format_promotes_ext_param() {
    let scanner = scanner();
    let mut number = PhoneNumber::new();
    number.set_calling_code("1");
    number.set_national_number("2025550123");
    number.set_param("ext", Some("9".to_owned()));

    assert_eq!(
        scanner.format(&number, Some(NumberFormat::Int)),
        "+12025550123~9"
    );
    let rendered = scanner.format(&number, Some(NumberFormat::Tel));
    assert_eq!(rendered, "tel:+12025550123;ext=9");
    assert_eq!(rendered.matches("ext=").count(), 1);
}

#[test]
fn format_survives_empty_and_unknown_numbers() {
    let scanner = scanner();
    let empty = PhoneNumber::new();
    assert_eq!(scanner.format(&empty, None), "");
    assert_eq!(scanner.format(&empty, Some(NumberFormat::Tel)), "tel:");

    let mut unknown = PhoneNumber::new();
    unknown.set_calling_code("999");
    unknown.set_national_number("123456");
    assert_eq!(scanner.format(&unknown, Some(NumberFormat::Int)), "+999123456");
    assert_eq!(scanner.format(&unknown, Some(NumberFormat::Nat)), "+999 123456");
}

#[test]
fn e164_round_trip() {
    let scanner = scanner();
    let parsed = scanner.parse("+1 (650) 253-0000", None);
    assert_eq!(parsed.format(), NumberFormat::Nat);

    let international = scanner.format(&parsed, Some(NumberFormat::Int));
    assert_eq!(international, "+16502530000");

    let reparsed = scanner.parse(&international, None);
    let raw = scanner.format(&reparsed, Some(NumberFormat::Raw));
    assert_eq!(raw, "16502530000");

    let final_pass = scanner.parse_guessing_calling_code(&raw, None);
    assert_eq!(final_pass.calling_code(), reparsed.calling_code());
    assert_eq!(final_pass.national_number(), reparsed.national_number());
}
