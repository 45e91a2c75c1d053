use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rphonescan::{
    CallingCodeEntry, CountryEntry, FormatRule, NumberMetadata, PhoneNumberScanner, UsagePattern,
    UsageType,
};

fn bench_metadata() -> NumberMetadata {
    NumberMetadata::new([
        CallingCodeEntry::new("1")
            .with_main_country("US")
            .with_country(
                CountryEntry::new("US")
                    .with_national_pattern(r"[2-9]\d{9}")
                    .with_usage(
                        UsagePattern::new(UsageType::FixedLine, r"(?:202|650)[2-9]\d{6}")
                            .with_national_lengths([10]),
                    )
                    .with_usage(
                        UsagePattern::new(UsageType::Mobile, r"[2-9]\d{9}")
                            .with_national_lengths([10]),
                    ),
            )
            .with_format_rule(FormatRule::new(r"(\d{3})(\d{3})(\d{4})", "$1 $2-$3")),
        CallingCodeEntry::new("44")
            .with_main_country("GB")
            .with_country(
                CountryEntry::new("GB")
                    .with_national_pattern(r"[127]\d{8,9}")
                    .with_usage(
                        UsagePattern::new(UsageType::FixedLine, r"[12]\d{8,9}")
                            .with_national_lengths([9, 10]),
                    ),
            )
            .with_format_rule(
                FormatRule::new(r"(\d{2})(\d{4})(\d{4})", "$1 $2 $3").with_leading_digits("2"),
            ),
    ])
}

/// A mixed corpus: national, international, IDD-prefixed, vanity, URI and
/// EPP inputs, so the benchmark is not dominated by one code path.
fn setup_parsing_data() -> Vec<(&'static str, Option<&'static str>)> {
    vec![
        ("0011 44 20 7946 0853", None),
        ("(650) 253-0000", Some("1")),
        ("+44 20 7946 0853", None),
        ("020 7946 0853", Some("44")),
        ("+1 202 555 0123", None),
        ("1-800-Flowers", Some("1")),
        ("tel:+1-202-555-0123;ext=42", None),
        ("+1.2025550123", None),
    ]
}

fn parsing_benchmark(c: &mut Criterion) {
    let scanner = PhoneNumberScanner::new(bench_metadata());
    let numbers_to_parse = setup_parsing_data();

    let mut group = c.benchmark_group("Parsing");

    group.bench_function("parse()", |b| {
        b.iter(|| {
            for (number_str, fallback) in &numbers_to_parse {
                let _ = scanner.parse(black_box(number_str), black_box(*fallback));
            }
        })
    });

    group.bench_function("parse_guessing_calling_code()", |b| {
        b.iter(|| {
            for (number_str, fallback) in &numbers_to_parse {
                let _ = scanner
                    .parse_guessing_calling_code(black_box(number_str), black_box(*fallback));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, parsing_benchmark);
criterion_main!(benches);
