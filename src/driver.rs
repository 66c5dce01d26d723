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

//! Running every fixer over its targets and reporting the result.

use anyhow::{Context, Result};
use indexmap::IndexSet;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::core::{Category, Rewrite};
use crate::deprecated_members::annotate_deprecated_members;
use crate::late_fields::make_fields_late;
use crate::patcher::{patch_file, PatchOutcome};
use crate::todo_comments::normalize_todo_comments;
use crate::unawaited::wrap_unawaited_calls;

/// Run the transform for `category` over `source`.
pub fn apply_fixer(category: Category, source: &str, config: &Config) -> Rewrite {
    match category {
        Category::TodoComments => normalize_todo_comments(source),
        Category::LateFields => make_fields_late(source, config.late_field_window),
        Category::DeprecatedMembers => annotate_deprecated_members(source),
        Category::UnawaitedFutures => wrap_unawaited_calls(source),
    }
}

/// One file rewritten by one fixer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Modification {
    pub category: Category,
    pub path: PathBuf,
    pub changes: usize,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Every (fixer, file) pair that changed something, in run order.
    pub modifications: Vec<Modification>,
    /// Targets that did not exist.
    pub skipped: Vec<PathBuf>,
    /// Number of distinct files rewritten.
    pub files_modified: usize,
    #[serde(skip)]
    modified_paths: IndexSet<PathBuf>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_modification(&mut self, category: Category, path: &Path, changes: usize) {
        if self.modified_paths.insert(path.to_path_buf()) {
            self.files_modified += 1;
        }
        self.modifications.push(Modification {
            category,
            path: path.to_path_buf(),
            changes,
        });
    }

    pub fn add_skipped(&mut self, path: &Path) {
        self.skipped.push(path.to_path_buf());
    }
}

/// Run every fixer in `config` in order, writing progress to `out`.
///
/// Missing targets are skipped. The first read or write failure aborts the
/// run.
pub fn run(config: &Config, out: &mut dyn Write) -> Result<RunReport> {
    let mut report = RunReport::new();

    writeln!(out, "Starting automated lint fixes...")?;

    for (step, (category, paths)) in config.targets_by_category().into_iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "Step {}: {}...", step + 1, category.description())?;

        for relative in paths {
            let path = config.resolve(relative);
            let outcome = patch_file(&path, |source| apply_fixer(category, source, config))
                .with_context(|| {
                    format!("{} fixer failed on {}", category, relative.display())
                })?;

            match outcome {
                PatchOutcome::Missing => report.add_skipped(relative),
                PatchOutcome::Unchanged => {
                    tracing::debug!("{}: nothing to fix in {}", category, relative.display());
                }
                PatchOutcome::Modified { changes } => {
                    report.add_modification(category, relative, changes);
                    writeln!(
                        out,
                        "  Fixed {} ({} change{})",
                        relative.display(),
                        changes,
                        if changes == 1 { "" } else { "s" }
                    )?;
                }
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "Modified {} files", report.files_modified)?;
    writeln!(out)?;
    writeln!(
        out,
        "Remaining issues will need manual fixes (cascade_invocations, etc.)"
    )?;
    writeln!(out, "Run 'flutter analyze' to see remaining issues.")?;

    if !report.skipped.is_empty() {
        tracing::info!("Skipped {} missing file(s)", report.skipped.len());
    }

    Ok(report)
}
