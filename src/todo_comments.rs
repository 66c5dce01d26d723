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

//! Normalization of TODO comments to the `TODO(username): description` style
//! required by the `flutter_style_todos` lint.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::core::Rewrite;

/// Attribution inserted into every normalized TODO comment.
pub const TODO_ATTRIBUTION: &str = "copilot";

// `TODO` followed by a colon, whitespace or end of line. `TODO(` is already
// attributed and is left alone, as are words like `todos`.
static TODO_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)//[ \t]*todo(?:[ \t]*:[ \t]*|[ \t]+|(?P<eol>\r?)$)")
        .expect("TODO marker pattern is valid")
});

/// Whether the source contains a TODO comment that still needs attribution.
pub fn has_unattributed_todo(source: &str) -> bool {
    TODO_MARKER.is_match(source)
}

/// Rewrite every unattributed TODO comment into `// TODO(copilot): `.
pub fn normalize_todo_comments(source: &str) -> Rewrite {
    let mut changes = 0;
    let content = TODO_MARKER.replace_all(source, |caps: &Captures| {
        changes += 1;
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        let canonical = format!("// TODO({}):", TODO_ATTRIBUTION);
        if let Some(eol) = caps.name("eol") {
            return format!("{}{}", canonical, eol.as_str());
        }
        let rest = &source[whole.end..];
        if rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n") {
            canonical
        } else {
            format!("{} ", canonical)
        }
    });

    if changes == 0 {
        return Rewrite::unchanged(source);
    }
    tracing::debug!("Normalized {} TODO comment(s)", changes);
    Rewrite {
        changes,
        content: content.into_owned(),
    }
}
