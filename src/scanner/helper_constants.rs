/// International dialing prefixes the scanner recognizes. This is a fixed
/// list, not metadata-driven, and it MUST stay sorted longest first: the
/// matcher takes the first candidate that equals the input's leading
/// characters, so "0011" has to be tried before "00", and "00" before "0".
pub const INTERNATIONAL_PREFIXES: &[&str] = &[
    "0011", "810", "119", "020", "011", "010", "009", "001", "000", "00", "0", "+", "\u{FF0B}",
];

/// The maximum length of a calling code, in digits.
pub const MAX_LENGTH_CALLING_CODE: usize = 3;

pub const PLUS_SIGN: &str = "+";

pub const RFC3966_PREFIX: &str = "tel:";
pub const RFC3966_EXT_KEY: &str = "ext";
pub const RFC3966_ISDN_SUBADDRESS_KEY: &str = "isdn-subaddress";

/// Marks the start of an extension outside of `tel:` URIs, as in
/// `555-0123~42`.
pub const EXTENSION_MARKER: char = '~';

pub const PARAM_SEPARATOR: char = ';';

/// Source of the character class a number run is made of: ASCII digits and
/// letters (letters double as keypad digits), the Unicode digit variants the
/// normalizer folds, and the separators legal inside a written number.
/// Anything else terminates the run.
pub const NUMBER_RUN_CLASS: &str =
    "[0-9A-Za-z\u{FF10}-\u{FF19}\u{0660}-\u{0669}\u{06F0}-\u{06F9} ()\\[\\]./\\-]+";

/// Source of the class of characters a number region can start with: digits
/// (including the Unicode variants) or a plus sign. Everything before the
/// first of these is meaningless lead-in and gets skipped.
pub const NUMBER_START_CLASS: &str =
    "[0-9\u{FF10}-\u{FF19}\u{0660}-\u{0669}\u{06F0}-\u{06F9}+\u{FF0B}]";

/// Source of the single-digit class (ASCII plus the recognized Unicode
/// variants). Number runs are extracted from the first such character; the
/// junk before it carries no information.
pub const DIGIT_CLASS: &str = "[0-9\u{FF10}-\u{FF19}\u{0660}-\u{0669}\u{06F0}-\u{06F9}]";

/// Source of the strict digit-run class used for extensions; no letters, no
/// Unicode tolerance.
pub const DIGIT_RUN_CLASS: &str = "[0-9]+";
