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

//! Wrapping of fire-and-forget futures in `unawaited(...)`
//! (`discarded_futures` / `unawaited_futures`).
//!
//! A statement is wrapped when its first line starts with one of the
//! [`CallShape`]s. The statement may continue over several lines; it ends at
//! the first `;` outside any bracket. Statements without such a terminator are
//! left untouched, so the terminator always survives the rewrite:
//!
//! ```text
//! _loadData();                      =>   unawaited(_loadData());
//! Navigator.push(                   =>   unawaited(Navigator.push(
//!   context,                               context,
//!   route,                                 route,
//! );                                     ));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::Rewrite;
use crate::imports::{ensure_wrapper_import, is_part_file};
use crate::lines::{indentation, physical_lines, split_terminator};

const WRAPPER_OPEN: &str = "unawaited(";

/// Call expressions known to return a future that is commonly discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    /// `Navigator.push(...)`
    NavigatorPush,
    /// `_initialize()`, `_loadData()`, ...
    PrivateCall,
    /// `showDialog(...)`
    ShowDialog,
    /// `ScaffoldMessenger.of(context)...`
    ScaffoldMessenger,
}

static SHAPES: Lazy<Vec<(CallShape, Regex)>> = Lazy::new(|| {
    [
        (CallShape::NavigatorPush, r"^Navigator\.push(?:<[^>]*>)?\("),
        (CallShape::PrivateCall, r"^_[\w$]+\(\)"),
        (CallShape::ShowDialog, r"^showDialog(?:<[^>]*>)?\("),
        (CallShape::ScaffoldMessenger, r"^ScaffoldMessenger\."),
    ]
    .into_iter()
    .map(|(shape, pattern)| (shape, Regex::new(pattern).expect("call shape pattern is valid")))
    .collect()
});

static AWAIT_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bawait\b").expect("await pattern is valid"));

static WRAPPER_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bunawaited\s*\(").expect("wrapper call pattern is valid"));

static CASE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:case\b|default\s*:)").expect("case label pattern is valid"));

/// Classify the start of a (left-trimmed) line.
pub fn call_shape(trimmed: &str) -> Option<CallShape> {
    SHAPES
        .iter()
        .find(|(_, re)| re.is_match(trimmed))
        .map(|(shape, _)| *shape)
}

/// Whether the line already awaits or wraps its future.
pub fn is_already_handled(line: &str) -> bool {
    AWAIT_KEYWORD.is_match(line) || WRAPPER_CALL.is_match(line)
}

/// Whether the code preceding `line_idx` lets a new statement start there.
fn starts_statement(bodies: &[&str], line_idx: usize) -> bool {
    let previous = bodies[..line_idx]
        .iter()
        .rev()
        .map(|body| body.trim())
        .find(|body| !body.is_empty() && !body.starts_with("//"));
    match previous {
        None => true,
        // A `:` ends a label, unless it is the middle of a conditional expression.
        Some(code) if code.ends_with(':') => CASE_LABEL.is_match(code) || !code.contains('?'),
        Some(code) => code.ends_with(&[';', '{', '}', ')'][..]) || code.ends_with("else"),
    }
}

/// Locate the `;` terminating the statement that starts at `start_line`,
/// as (line index, byte offset).
///
/// Brackets are balanced across lines, and string literals and line comments
/// are skipped. Returns `None` when the enclosing block closes first or the
/// input ends.
fn statement_end(bodies: &[&str], start_line: usize) -> Option<(usize, usize)> {
    let mut depth: i32 = 0;
    for (line_idx, body) in bodies.iter().enumerate().skip(start_line) {
        let mut quote: Option<char> = None;
        let mut escaped = false;
        let mut chars = body.char_indices().peekable();
        while let Some((offset, c)) = chars.next() {
            if let Some(q) = quote {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
                continue;
            }
            match c {
                '\'' | '"' => quote = Some(c),
                '/' if chars.peek().map(|&(_, next)| next) == Some('/') => break,
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => {
                    depth -= 1;
                    if depth < 0 {
                        return None;
                    }
                }
                ';' if depth == 0 => return Some((line_idx, offset)),
                _ => {}
            }
        }
    }
    None
}

/// Wrap every discarded future in `unawaited(...)` and import the wrapper if
/// anything was wrapped.
pub fn wrap_unawaited_calls(source: &str) -> Rewrite {
    let lines = physical_lines(source);
    let bodies: Vec<&str> = lines.iter().map(|line| split_terminator(line).0).collect();

    // (line, byte offset, text), applied back to front within each line.
    let mut insertions: Vec<(usize, usize, &str)> = Vec::new();
    let mut changes = 0;

    for (idx, body) in bodies.iter().enumerate() {
        let indent = indentation(body);
        let trimmed = &body[indent.len()..];
        let Some(shape) = call_shape(trimmed) else {
            continue;
        };
        if is_already_handled(trimmed) {
            continue;
        }
        if !starts_statement(&bodies, idx) {
            tracing::debug!("Line {}: {:?} is not a statement start", idx + 1, shape);
            continue;
        }
        let Some((end_line, end_offset)) = statement_end(&bodies, idx) else {
            tracing::debug!("Line {}: {:?} has no statement terminator", idx + 1, shape);
            continue;
        };

        if bodies[idx + 1..=end_line]
            .iter()
            .any(|body| is_already_handled(body))
        {
            tracing::debug!("Line {}: {:?} already awaited or wrapped", idx + 1, shape);
            continue;
        }

        let close_at = bodies[end_line][..end_offset].trim_end().len();
        insertions.push((idx, indent.len(), WRAPPER_OPEN));
        insertions.push((end_line, close_at, ")"));
        changes += 1;
        tracing::debug!("Line {}: wrapping {:?}", idx + 1, shape);
    }

    if changes == 0 {
        return Rewrite::unchanged(source);
    }

    insertions.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
    let mut edited: Vec<String> = lines.iter().map(|line| line.to_string()).collect();
    for (line_idx, offset, text) in insertions {
        edited[line_idx].insert_str(offset, text);
    }
    let content = edited.concat();

    if is_part_file(&content) {
        tracing::warn!("Wrapped calls in a part file; import unawaited in its library");
        return Rewrite { changes, content };
    }
    let imported = ensure_wrapper_import(&content);
    Rewrite {
        changes,
        content: imported.content,
    }
}
