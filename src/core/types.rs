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

use serde::Serialize;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A class of lint issue addressed by one dedicated transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    TodoComments,
    LateFields,
    DeprecatedMembers,
    UnawaitedFutures,
}

impl Category {
    /// All categories, in the order the driver runs them.
    pub const ALL: [Category; 4] = [
        Category::TodoComments,
        Category::LateFields,
        Category::DeprecatedMembers,
        Category::UnawaitedFutures,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::TodoComments => "todo-comments",
            Category::LateFields => "late-fields",
            Category::DeprecatedMembers => "deprecated-members",
            Category::UnawaitedFutures => "unawaited-futures",
        }
    }

    /// Progress text printed before the category runs.
    pub fn description(&self) -> &'static str {
        match self {
            Category::TodoComments => "Fixing TODO comments",
            Category::LateFields => "Fixing late fields",
            Category::DeprecatedMembers => "Fixing deprecated Color API",
            Category::UnawaitedFutures => "Wrapping unawaited futures",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive range of 1-based line numbers a line-oriented transform may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineWindow {
    pub first: usize,
    pub last: usize,
}

impl LineWindow {
    pub fn new(first: usize, last: usize) -> Self {
        Self { first, last }
    }

    pub fn contains(&self, line_number: usize) -> bool {
        self.first <= line_number && line_number <= self.last
    }
}

/// Window holding the nullable field declarations of `ip_calculator_screen.dart`.
impl Default for LineWindow {
    fn default() -> Self {
        Self::new(19, 33)
    }
}

/// Result of running a transform over a source string.
///
/// `changes` counts the individual rewrites applied; `content` is the full
/// text after the transform, identical to the input when `changes == 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub changes: usize,
    pub content: String,
}

impl Rewrite {
    pub fn unchanged(source: &str) -> Self {
        Self {
            changes: 0,
            content: source.to_string(),
        }
    }

    pub fn is_changed(&self) -> bool {
        self.changes > 0
    }
}

#[derive(Error, Debug)]
pub enum FixError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FixError {
    pub fn path(&self) -> &PathBuf {
        match self {
            FixError::Read { path, .. } | FixError::Write { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_bounds() {
        let window = LineWindow::default();
        assert!(!window.contains(18));
        assert!(window.contains(19));
        assert!(window.contains(33));
        assert!(!window.contains(34));
    }

    #[test]
    fn test_category_order() {
        assert_eq!(Category::ALL[0], Category::TodoComments);
        assert_eq!(Category::ALL[3], Category::UnawaitedFutures);
        assert_eq!(Category::LateFields.to_string(), "late-fields");
    }

    #[test]
    fn test_error_names_path() {
        let err = FixError::Write {
            path: PathBuf::from("lib/main.dart"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.path(), &PathBuf::from("lib/main.dart"));
        assert!(err.to_string().contains("lib/main.dart"));
    }
}
