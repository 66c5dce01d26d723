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

//! Insertion of import directives into Dart source.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::Rewrite;
use crate::lines::{dominant_terminator, physical_lines, split_terminator};

/// Import providing `unawaited`.
pub const WRAPPER_IMPORT: &str = "import 'package:flutter/foundation.dart';";

static WRAPPER_AVAILABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?m)^\s*import\s+['"](?:package:flutter/foundation\.dart|dart:async)['"](?P<clauses>[^;]*);"#,
    )
    .expect("wrapper import pattern is valid")
});

static IMPORT_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*import\s*['"]"#).expect("import pattern is valid"));

static LIBRARY_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^library(?:\s+[\w.]+)?\s*;").expect("library pattern is valid"));

static PART_OF_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*part\s+of\b").expect("part of pattern is valid"));

pub fn is_import_line(line: &str) -> bool {
    IMPORT_DIRECTIVE.is_match(line)
}

/// Whether `unawaited` is already importable in this file.
pub fn has_wrapper_import(source: &str) -> bool {
    WRAPPER_AVAILABLE
        .captures_iter(source)
        .any(|caps| exposes_wrapper(&caps["clauses"]))
}

/// Whether an import with these trailing clauses brings `unawaited` into
/// scope unprefixed.
fn exposes_wrapper(clauses: &str) -> bool {
    #[derive(PartialEq)]
    enum Combinator {
        None,
        Show,
        Hide,
    }

    let mut current = Combinator::None;
    let mut has_show = false;
    let mut shown = false;
    for token in clauses
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
    {
        match token {
            "as" => return false,
            "show" => {
                current = Combinator::Show;
                has_show = true;
            }
            "hide" => current = Combinator::Hide,
            "unawaited" if current == Combinator::Hide => return false,
            "unawaited" if current == Combinator::Show => shown = true,
            _ => {}
        }
    }
    !has_show || shown
}

/// Whether the source is a `part of` file, which cannot carry imports.
pub fn is_part_file(source: &str) -> bool {
    PART_OF_DIRECTIVE.is_match(source)
}

/// Index of the line after which a new import goes, or `None` for the top of
/// the file.
///
/// This is the last line of the last import directive (directives may span
/// several lines). Without imports, a leading `library` directive is kept
/// first.
fn insertion_anchor(lines: &[&str]) -> Option<usize> {
    let last_import = lines
        .iter()
        .rposition(|line| is_import_line(split_terminator(line).0));

    let Some(start) = last_import else {
        return lines
            .iter()
            .position(|line| LIBRARY_DIRECTIVE.is_match(line))
            .map(|idx| directive_end(lines, idx));
    };
    Some(directive_end(lines, start))
}

fn directive_end(lines: &[&str], start: usize) -> usize {
    (start..lines.len())
        .find(|&idx| lines[idx].contains(';'))
        .unwrap_or(start)
}

/// Insert `import_line` after the last import directive, or at the top of the
/// file if there is none.
pub fn insert_import(source: &str, import_line: &str) -> Rewrite {
    let lines = physical_lines(source);
    let terminator = dominant_terminator(source);
    let mut content = String::with_capacity(source.len() + import_line.len() + 2);

    match insertion_anchor(&lines) {
        None => {
            content.push_str(import_line);
            content.push_str(terminator);
            content.push_str(source);
        }
        Some(anchor) => {
            for (idx, line) in lines.iter().enumerate() {
                content.push_str(line);
                if idx == anchor {
                    if split_terminator(line).1.is_empty() {
                        content.push_str(terminator);
                    }
                    content.push_str(import_line);
                    content.push_str(terminator);
                }
            }
        }
    }

    Rewrite {
        changes: 1,
        content,
    }
}

/// Make sure the file imports [`WRAPPER_IMPORT`] (or `dart:async`).
pub fn ensure_wrapper_import(source: &str) -> Rewrite {
    if has_wrapper_import(source) {
        return Rewrite::unchanged(source);
    }
    tracing::debug!("Adding {}", WRAPPER_IMPORT);
    insert_import(source, WRAPPER_IMPORT)
}
