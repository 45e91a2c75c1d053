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

use std::collections::HashMap;

use regex::Regex;

use crate::regexp_cache::RegexCache;

use super::helper_constants::{DIGIT_CLASS, DIGIT_RUN_CLASS, NUMBER_RUN_CLASS, NUMBER_START_CLASS};

/// Helper struct holding the scanner's character-class regexes and keypad
/// mappings, compiled once when the engine is constructed.
pub(super) struct ScanRegExpsAndMappings {
    /// Shared cache the metadata patterns are compiled through.
    pub regexp_cache: RegexCache,

    /// These mappings map a character (key) to the ASCII digit that replaces
    /// it during normalization. ASCII digits map to themselves; uppercase
    /// letters map to their ITU E.161 keypad digit. Lookups upper-case the
    /// character first, so lowercase letters resolve through the same
    /// entries.
    pub keypad_mappings: HashMap<char, char>,

    /// The first character a number region can start with: a digit (any of
    /// the recognized Unicode variants) or a plus sign. Everything before
    /// the first match is lead-in junk.
    pub number_start_pattern: Regex,

    /// A single digit, in any of the recognized scripts. Extraction stages
    /// skip ahead to the first one before taking a run.
    pub digit_pattern: Regex,

    /// A maximal run of number characters: digits, keypad letters and the
    /// separators legal inside a written number. Extraction stages take the
    /// run starting at the first digit and normalize it.
    pub number_run_pattern: Regex,

    /// A strict ASCII digit run, used for extensions.
    pub digit_run_pattern: Regex,
}

impl ScanRegExpsAndMappings {
    fn initialize_keypad_mappings(&mut self) {
        let mut keypad_map = HashMap::with_capacity(40);
        for digit in '0'..='9' {
            keypad_map.insert(digit, digit);
        }
        keypad_map.insert('A', '2');
        keypad_map.insert('B', '2');
        keypad_map.insert('C', '2');
        keypad_map.insert('D', '3');
        keypad_map.insert('E', '3');
        keypad_map.insert('F', '3');
        keypad_map.insert('G', '4');
        keypad_map.insert('H', '4');
        keypad_map.insert('I', '4');
        keypad_map.insert('J', '5');
        keypad_map.insert('K', '5');
        keypad_map.insert('L', '5');
        keypad_map.insert('M', '6');
        keypad_map.insert('N', '6');
        keypad_map.insert('O', '6');
        keypad_map.insert('P', '7');
        keypad_map.insert('Q', '7');
        keypad_map.insert('R', '7');
        keypad_map.insert('S', '7');
        keypad_map.insert('T', '8');
        keypad_map.insert('U', '8');
        keypad_map.insert('V', '8');
        keypad_map.insert('W', '9');
        keypad_map.insert('X', '9');
        keypad_map.insert('Y', '9');
        keypad_map.insert('Z', '9');
        // IMPORTANT: only uppercase letters; lookups upper-case first.

        self.keypad_mappings = keypad_map;
    }

    pub fn new() -> Self {
        let mut instance = Self {
            regexp_cache: RegexCache::with_capacity(128),
            keypad_mappings: Default::default(),
            number_start_pattern: Regex::new(NUMBER_START_CLASS).unwrap(),
            digit_pattern: Regex::new(DIGIT_CLASS).unwrap(),
            number_run_pattern: Regex::new(NUMBER_RUN_CLASS).unwrap(),
            digit_run_pattern: Regex::new(DIGIT_RUN_CLASS).unwrap(),
        };
        instance.initialize_keypad_mappings();
        instance
    }
}
