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

//! Conversion of nullable, uninitialized private fields to `late` fields
//! (`use_late_for_private_fields_and_variables`).
//!
//! Only whole-line declarations of the exact shapes below are rewritten, and
//! only inside a window of line numbers:
//!
//! ```text
//! TextEditingController? _controller;   =>   late final TextEditingController _controller;
//! bool? _isClassful;                    =>   late bool _isClassful;
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::{LineWindow, Rewrite};
use crate::lines::{physical_lines, split_terminator};

static NULLABLE_CONTROLLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<indent>[ \t]*)TextEditingController\?[ \t]+(?P<name>[A-Za-z_$][\w$]*)[ \t]*;(?P<trailing>[ \t]*(?://.*)?)$",
    )
    .expect("controller declaration pattern is valid")
});

static NULLABLE_PRIVATE_BOOL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<indent>[ \t]*)bool\?[ \t]+(?P<name>_[\w$]*)[ \t]*;(?P<trailing>[ \t]*(?://.*)?)$",
    )
    .expect("bool declaration pattern is valid")
});

/// Rewrite a single declaration line (without terminator), if it has one of
/// the supported nullable shapes.
pub fn rewrite_declaration(line: &str) -> Option<String> {
    if let Some(caps) = NULLABLE_CONTROLLER.captures(line) {
        return Some(format!(
            "{}late final TextEditingController {};{}",
            &caps["indent"], &caps["name"], &caps["trailing"]
        ));
    }
    if let Some(caps) = NULLABLE_PRIVATE_BOOL.captures(line) {
        return Some(format!(
            "{}late bool {};{}",
            &caps["indent"], &caps["name"], &caps["trailing"]
        ));
    }
    None
}

/// Apply [`rewrite_declaration`] to every line inside `window`.
pub fn make_fields_late(source: &str, window: LineWindow) -> Rewrite {
    let mut changes = 0;
    let mut content = String::with_capacity(source.len() + 64);

    for (idx, line) in physical_lines(source).into_iter().enumerate() {
        let line_number = idx + 1;
        let (body, terminator) = split_terminator(line);
        match rewrite_declaration(body) {
            Some(rewritten) if window.contains(line_number) => {
                tracing::debug!("Line {}: {:?} -> {:?}", line_number, body, rewritten);
                content.push_str(&rewritten);
                content.push_str(terminator);
                changes += 1;
            }
            _ => content.push_str(line),
        }
    }

    if changes == 0 {
        return Rewrite::unchanged(source);
    }
    Rewrite { changes, content }
}
