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

use thiserror::Error;

use crate::regexp_cache::InvalidRegexError;

/// The metadata provider was asked for a calling code it does not know.
///
/// This is the only lookup failure the provider reports; it never invents a
/// country for an unknown code.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Unknown calling code: {0}")]
pub struct UnknownCallingCodeError(pub String);

/// Converts the internal regex-compilation result into the public
/// infallible contract.
///
/// Parsing and formatting never fail on user input; the only way the
/// internal plumbing errors is a metadata pattern that does not compile,
/// which indicates a corrupted provider rather than a bad phone number.
pub(super) fn expect_valid_metadata<T>(result: Result<T, InvalidRegexError>) -> T {
    result.unwrap_or_else(|err| {
        panic!("A valid regex is expected in metadata; this indicates a corrupted provider! {err}")
    })
}
