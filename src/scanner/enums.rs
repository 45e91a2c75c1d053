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

use strum::EnumIter;

/// The textual conventions a phone number can be written in. Parsing records
/// which convention produced a number; formatting picks which one to render.
///
/// For a Washington, DC number the renderings are:
/// - **NUM**: `2025550123` (bare national digits)
/// - **LOC**: `202 555-0123` (national digits through the local format rule)
/// - **NAT**: `+1 202 555-0123` (space between calling code and number)
/// - **RAW**: `12025550123` (calling code and digits, no prefix literal)
/// - **INT**: `+12025550123`
/// - **EPP**: `+1.2025550123` (dot separator, as used in EPP contact data)
/// - **TEL**: `tel:+12025550123;ext=42` (RFC 3966 URI with parameters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NumberFormat {
    /// **Bare number.**
    /// National digits without a calling code. This is the default for
    /// inputs where no international context was detected.
    #[default]
    Num,
    /// **Local format.**
    /// Like [`NumberFormat::Num`], but the input carried grouping
    /// separators, and rendering applies the country's format rule.
    Loc,
    /// **National display format.**
    /// Calling code, a space, then the national number rendered through the
    /// country's format rule.
    Nat,
    /// **Raw E.164-style digits.**
    /// Calling code immediately followed by the national number, with no
    /// prefix literal and no separators.
    Raw,
    /// **International format.**
    /// An international dialing prefix, the calling code, then the national
    /// digits unmodified.
    Int,
    /// **EPP contact format.**
    /// `+`, calling code, a dot, then the national digits, per the EPP
    /// `contact:voice` convention.
    Epp,
    /// **RFC 3966 `tel:` URI.**
    /// Carries the extension and any generic parameters; `ext` and
    /// `isdn-subaddress` always render first.
    Tel,
}

/// Categorizes phone numbers based on their primary use.
#[derive(Debug, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsageType {
    /// Traditional landline numbers tied to a geographic location.
    FixedLine,
    /// Numbers assigned to wireless devices.
    Mobile,
    /// Calls are free for the caller; the recipient pays.
    TollFree,
    /// Numbers charging a higher rate than normal calls.
    PremiumRate,
    /// The call cost is split between caller and recipient.
    SharedCost,
    /// A number attached to a person rather than a location or device.
    PersonalNumber,
    /// Numbers carried over the internet rather than the phone network.
    VoIP,
    /// Universal Access Numbers routing to different company endpoints.
    UAN,
    /// Direct voicemail access numbers.
    VoiceMail,
    /// Numbers for messaging pager devices.
    Pager,
}

/// Outcome of a scored candidate search (calling-code matching and country
/// resolution).
///
/// When scoring cannot single out a winner, every candidate that scored is
/// handed back, weakest first, and the caller decides. The weakest-first
/// order is deliberate: it is what the scorer has always produced, and
/// callers that only act on [`MatchResolution::Single`] never observe it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResolution {
    /// Exactly one candidate won.
    Single(String),
    /// No single winner; all scored candidates ordered ascending by score.
    Ambiguous(Vec<String>),
    /// Nothing scored at all.
    NoMatch,
}

impl MatchResolution {
    /// The winning candidate, when there is one.
    pub fn single(&self) -> Option<&str> {
        match self {
            MatchResolution::Single(candidate) => Some(candidate),
            _ => None,
        }
    }
}
