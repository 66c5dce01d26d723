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

//! Helpers for line-oriented transforms that must keep line terminators intact.

/// Split source into physical lines, each keeping its terminator.
pub fn physical_lines(source: &str) -> Vec<&str> {
    source.split_inclusive('\n').collect()
}

/// Split a physical line into its body and its terminator (`""`, `"\n"` or `"\r\n"`).
pub fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Leading whitespace of a line.
pub fn indentation(line: &str) -> &str {
    let trimmed = line.trim_start();
    &line[..line.len() - trimmed.len()]
}

/// Terminator used by the first terminated line, defaulting to `\n`.
pub fn dominant_terminator(source: &str) -> &'static str {
    match source.find('\n') {
        Some(idx) if idx > 0 && source.as_bytes()[idx - 1] == b'\r' => "\r\n",
        _ => "\n",
    }
}
