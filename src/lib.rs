pub mod metadata;
pub mod scanner;
mod regexp_cache;
pub(crate) mod regex_util;
pub(crate) mod string_util;

#[cfg(test)]
mod tests;

pub use metadata::{CallingCodeEntry, CountryEntry, FormatRule, NumberMetadata, UsagePattern};
pub use regexp_cache::InvalidRegexError;
pub use scanner::errors::UnknownCallingCodeError;
pub use scanner::{MatchResolution, NumberFormat, PhoneNumber, PhoneNumberScanner, UsageType};
