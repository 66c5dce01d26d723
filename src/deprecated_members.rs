// Copyright (C) 2024 Jelmer Vernooij <jelmer@samba.org>
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Suppression of `deprecated_member_use` warnings for the `Color` channel
//! getters (`.red`, `.green`, `.blue`) and `.value`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::Rewrite;
use crate::lines::{dominant_terminator, indentation, physical_lines, split_terminator};

pub const IGNORE_MARKER: &str = "// ignore: deprecated_member_use";

static CHANNEL_ACCESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<receiver>\w+)?\.(?:red|green|blue)\b").expect("channel pattern is valid")
});

static VALUE_ACCESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.value\b").expect("value pattern is valid"));

static LINE_IGNORE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"//\s*ignore:.*\bdeprecated_member_use\b").expect("ignore pattern is valid")
});

static FILE_IGNORE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*//\s*ignore_for_file:.*\bdeprecated_member_use\b")
        .expect("ignore_for_file pattern is valid")
});

/// Whether a line references one of the deprecated members.
///
/// `Colors.red` and friends are palette constants rather than channel getters
/// and do not count.
pub fn references_deprecated_member(line: &str) -> bool {
    if line.trim_start().starts_with("//") {
        return false;
    }
    if VALUE_ACCESS.is_match(line) {
        return true;
    }
    CHANNEL_ACCESS
        .captures_iter(line)
        .any(|caps| caps.name("receiver").map(|m| m.as_str()) != Some("Colors"))
}

/// Whether a line carries an `// ignore:` comment naming `deprecated_member_use`.
pub fn is_ignore_comment(line: &str) -> bool {
    LINE_IGNORE.is_match(line)
}

/// Insert [`IGNORE_MARKER`] before every line referencing a deprecated member
/// that is not already suppressed.
pub fn annotate_deprecated_members(source: &str) -> Rewrite {
    if FILE_IGNORE.is_match(source) {
        tracing::debug!("deprecated_member_use ignored for the whole file");
        return Rewrite::unchanged(source);
    }

    let mut changes = 0;
    let mut content = String::with_capacity(source.len() + 256);
    let mut previous: Option<&str> = None;

    for line in physical_lines(source) {
        let (body, terminator) = split_terminator(line);
        let suppressed = is_ignore_comment(body) || previous.is_some_and(is_ignore_comment);
        if !suppressed && references_deprecated_member(body) {
            let terminator = if terminator.is_empty() {
                dominant_terminator(source)
            } else {
                terminator
            };
            content.push_str(indentation(body));
            content.push_str(IGNORE_MARKER);
            content.push_str(terminator);
            changes += 1;
        }
        content.push_str(line);
        previous = Some(body);
    }

    if changes == 0 {
        return Rewrite::unchanged(source);
    }
    tracing::debug!("Inserted {} deprecation marker(s)", changes);
    Rewrite { changes, content }
}
