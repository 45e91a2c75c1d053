mod helper_constants;
mod helper_functions;
mod phone_number;
mod scan_regexps_and_mappings;
pub mod enums;
pub mod errors;
pub mod scanner;

pub use enums::{MatchResolution, NumberFormat, UsageType};
pub use phone_number::PhoneNumber;
pub use scanner::PhoneNumberScanner;
